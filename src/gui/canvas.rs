use egui::{Color32, Key, LayerId, Pos2, Rect, Sense, TextureHandle, TextureOptions, Vec2};

use crate::gesture::{PointerButton, PointerEvent};
use crate::gui::app::AppState;
use crate::session::EditorSession;
use crate::utils::Point;

/// GPU copy of the session's display buffer.
#[derive(Default)]
pub struct CanvasTexture {
    handle: Option<TextureHandle>,
    revision: Option<u64>,
}

impl CanvasTexture {
    /// Re-uploads the display buffer if the session changed it since the last
    /// frame.
    pub fn sync(&mut self, session: &EditorSession, ctx: &egui::Context) {
        let Some(view) = session.view() else {
            self.handle = None;
            self.revision = None;
            return;
        };
        if self.revision == Some(session.view_revision()) && self.handle.is_some() {
            return;
        }

        let image = egui::ColorImage::from_rgb(
            [view.width() as usize, view.height() as usize],
            view.as_raw(),
        );
        match &mut self.handle {
            Some(handle) => handle.set(image, TextureOptions::NEAREST),
            None => self.handle = Some(ctx.load_texture("canvas", image, TextureOptions::NEAREST)),
        }
        self.revision = Some(session.view_revision());
    }
}

/// Maps a screen position to raw image pixel coordinates.
fn to_image_coords(pos: Pos2, rect: Rect, image_size: [u32; 2]) -> Point {
    let sx = image_size[0] as f32 / rect.width().max(1.0);
    let sy = image_size[1] as f32 / rect.height().max(1.0);
    Point::new(
        ((pos.x - rect.min.x) * sx).floor() as i32,
        ((pos.y - rect.min.y) * sy).floor() as i32,
    )
}

fn to_pointer_button(button: egui::PointerButton) -> Option<PointerButton> {
    match button {
        egui::PointerButton::Primary => Some(PointerButton::Primary),
        egui::PointerButton::Secondary => Some(PointerButton::Secondary),
        _ => None,
    }
}

/// Whether a press at `pos` should start a gesture: it must hit the visible
/// part of the image, and no popup or window may be on top of it there.
fn press_starts_on_canvas(
    pos: Pos2,
    visible: Rect,
    top_layer: Option<LayerId>,
    canvas_layer: LayerId,
) -> bool {
    visible.contains(pos) && top_layer.map_or(true, |layer| layer == canvas_layer)
}

/// Draws the image at one image pixel per physical pixel and forwards the
/// pointer input over it to the session.
pub fn show_canvas(app_state: &mut AppState, ui: &mut egui::Ui) {
    app_state.canvas.sync(&app_state.session, ui.ctx());

    let (Some(texture), Some((width, height))) =
        (&app_state.canvas.handle, app_state.session.dimensions())
    else {
        ui.centered_and_justified(|ui| {
            ui.label("Please load an image to begin.");
        });
        return;
    };
    let texture_id = texture.id();

    let ppp = ui.ctx().pixels_per_point();
    let size = Vec2::new(width as f32 / ppp, height as f32 / ppp);

    egui::ScrollArea::both()
        .drag_to_scroll(false)
        .show(ui, |ui| {
            let (rect, _response) = ui.allocate_exact_size(size, Sense::click_and_drag());
            ui.painter().image(
                texture_id,
                rect,
                Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                Color32::WHITE,
            );

            let visible = ui.clip_rect().intersect(rect);
            let canvas_layer = ui.layer_id();
            let events = ui.input(|i| i.events.clone());
            let session = &mut app_state.session;
            for event in events {
                let pointer_event = match event {
                    egui::Event::PointerButton { pos, button, pressed: true, .. } => {
                        let top_layer = ui.ctx().layer_id_at(pos);
                        if !press_starts_on_canvas(pos, visible, top_layer, canvas_layer) {
                            continue;
                        }
                        let Some(button) = to_pointer_button(button) else { continue };
                        PointerEvent::Press {
                            button,
                            pos: to_image_coords(pos, rect, [width, height]),
                        }
                    }
                    egui::Event::PointerButton { button, pressed: false, .. } => {
                        let Some(button) = to_pointer_button(button) else { continue };
                        PointerEvent::Release { button }
                    }
                    egui::Event::PointerMoved(pos) if session.gesture().is_active() => {
                        PointerEvent::Motion {
                            pos: to_image_coords(pos, rect, [width, height]),
                        }
                    }
                    _ => continue,
                };
                session.handle_pointer(pointer_event);
            }
        });
}

/// Keyboard bindings: Backspace discards, Enter commits, Up/Down re-apply the
/// dilation. Ignored while a text field has focus.
pub fn handle_shortcuts(app_state: &mut AppState, ctx: &egui::Context) {
    if ctx.wants_keyboard_input() {
        return;
    }
    let (discard, commit, dilation) = ctx.input(|i| {
        (
            i.key_pressed(Key::Backspace),
            i.key_pressed(Key::Enter),
            i.key_pressed(Key::ArrowUp) || i.key_pressed(Key::ArrowDown),
        )
    });

    let session = &mut app_state.session;
    if discard {
        session.discard_points();
    }
    if commit {
        session.commit_drawn_points();
    }
    if dilation {
        session.refresh_dilation();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_positions_map_to_image_pixels() {
        let rect = Rect::from_min_size(Pos2::new(100.0, 50.0), Vec2::new(50.0, 25.0));
        // 2x scale: 100x50 image shown in 50x25 points
        assert_eq!(
            to_image_coords(Pos2::new(100.0, 50.0), rect, [100, 50]),
            Point::new(0, 0)
        );
        assert_eq!(
            to_image_coords(Pos2::new(110.2, 60.0), rect, [100, 50]),
            Point::new(20, 20)
        );
        assert_eq!(
            to_image_coords(Pos2::new(90.0, 40.0), rect, [100, 50]),
            Point::new(-20, -20)
        );
    }

    #[test]
    fn presses_under_a_popup_do_not_reach_the_canvas() {
        let visible = Rect::from_min_size(Pos2::new(0.0, 0.0), Vec2::new(200.0, 100.0));
        let canvas = LayerId::background();
        let popup = LayerId::new(egui::Order::Foreground, egui::Id::new("edge_color_combo"));
        let inside = Pos2::new(50.0, 50.0);

        assert!(press_starts_on_canvas(inside, visible, None, canvas));
        assert!(press_starts_on_canvas(inside, visible, Some(canvas), canvas));
        assert!(!press_starts_on_canvas(inside, visible, Some(popup), canvas));
        assert!(!press_starts_on_canvas(Pos2::new(250.0, 50.0), visible, None, canvas));
    }
}
