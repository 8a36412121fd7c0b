use crate::gui::app::AppState;
use crate::overlay::write_png;
use crate::params::{EdgeColor, BRUSH_SIZE_RANGE, DILATION_RANGE, SENSITIVITY_RANGE};
use crate::session::Mode;

/// Helper function to encapsulate the file loading logic.
pub fn ui_load_image_button(ui: &mut egui::Ui, app_state: &mut AppState) {
    if ui.button("Load Image").clicked() {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Image files", &["png", "jpg", "jpeg", "bmp"])
            .pick_file()
        else {
            // cancelled
            return;
        };
        match app_state.session.load_image(&path) {
            Ok((width, height)) => {
                app_state.autofill_size();
                app_state.report_status(format!("Loaded {width}x{height} image"));
            }
            Err(e) => app_state.report_error(e.to_string()),
        }
    }
}

/// Save Overlay: builds the overlay first, then asks where to put it.
pub fn ui_save_overlay_button(ui: &mut egui::Ui, app_state: &mut AppState) {
    if ui.button("Save Overlay").clicked() {
        let Some(overlay) = app_state.session.build_overlay() else {
            return;
        };
        let Some(mut path) = rfd::FileDialog::new()
            .add_filter("PNG files", &["png"])
            .set_file_name("overlay.png")
            .save_file()
        else {
            return;
        };
        if path.extension().is_none() {
            path.set_extension("png");
        }
        match write_png(&overlay, &path) {
            Ok(()) => app_state.report_status(format!("Saved overlay to {}", path.display())),
            Err(e) => app_state.report_error(e.to_string()),
        }
    }
}

fn ui_mode_toggles(ui: &mut egui::Ui, app_state: &mut AppState) {
    let mode = app_state.session.mode();
    ui.horizontal(|ui| {
        if ui.selectable_label(mode == Mode::Eraser, "Eraser").clicked() {
            app_state.session.toggle_eraser();
        }
        if ui.selectable_label(mode == Mode::Draw, "Draw").clicked() {
            app_state.session.toggle_draw();
        }
    });
}

fn ui_manual_resize(ui: &mut egui::Ui, app_state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.label("Length:");
        ui.add(egui::TextEdit::singleline(&mut app_state.length_str).desired_width(80.0));
    });
    ui.horizontal(|ui| {
        ui.label("Breadth:");
        ui.add(egui::TextEdit::singleline(&mut app_state.breadth_str).desired_width(80.0));
    });

    if ui.button("Resize Manually").clicked() {
        let (length, breadth) = (app_state.length_str.clone(), app_state.breadth_str.clone());
        match app_state.session.resize_manual(&length, &breadth) {
            Ok(()) => app_state.report_status(format!("Resized to {length}x{breadth}")),
            Err(e) => app_state.report_error(e.to_string()),
        }
    }
    if ui.button("Autofill Current Values").clicked() {
        app_state.autofill_size();
    }
}

pub fn populate_controls_menu(app_state: &mut AppState, ui: &mut egui::Ui) {
    ui_load_image_button(ui, app_state);
    if ui.button("Detect Edges").clicked() {
        app_state.session.detect_edges();
    }
    ui_mode_toggles(ui, app_state);
    ui_save_overlay_button(ui, app_state);

    ui.separator();

    ui.label("Eraser/Draw Size:");
    ui.add(egui::Slider::new(&mut app_state.session.brush.size, BRUSH_SIZE_RANGE));

    ui.label("Detected Edge Color:");
    egui::ComboBox::from_id_source("edge_color_combo")
        .selected_text(app_state.session.brush.color.to_string())
        .show_ui(ui, |ui| {
            for color in EdgeColor::ALL {
                ui.selectable_value(&mut app_state.session.brush.color, color, color.to_string());
            }
        });

    ui.label("Edge Sensitivity:");
    ui.add(egui::Slider::new(&mut app_state.session.edge_params.sensitivity, SENSITIVITY_RANGE));

    ui.label("Dilation Scale:");
    let mut dilation = app_state.session.edge_params.dilation;
    if ui.add(egui::Slider::new(&mut dilation, DILATION_RANGE)).changed() {
        app_state.session.set_dilation(dilation);
    }

    ui.separator();

    ui_manual_resize(ui, app_state);

    ui.separator();

    if let Some(err) = &app_state.error_msg {
        ui.label(egui::RichText::new(err).color(ui.style().visuals.error_fg_color));
    } else if let Some(msg) = &app_state.status_msg {
        ui.label(msg);
    }
    let session = &app_state.session;
    ui.small(format!(
        "{} erase / {} draw points pending",
        session.eraser_points().len(),
        session.drawn_points().len()
    ));
    if session.is_mask_stale() {
        ui.small("Edges are from before the resize; detect again to refresh.");
    }
}

pub fn populate_upload_menu(app_state: &mut AppState, ui: &mut egui::Ui) {
    ui.with_layout(egui::Layout::top_down(egui::Align::Center), |ui| {
        ui.add_space(ui.available_height() * 0.4);
        ui.heading("Edge Modification App");
        ui.label("Please load an image to begin.");
        ui.add_space(10.0);
        ui_load_image_button(ui, app_state);
        if let Some(err) = &app_state.error_msg {
            ui.label(egui::RichText::new(err).color(ui.style().visuals.error_fg_color));
        }
    });
}
