use egui_wgpu::wgpu;
use egui_winit::winit::{self, event::{Event, WindowEvent}, event_loop::EventLoop, window::Window};
use log::{info, warn};
use std::sync::Arc;
use egui_wgpu::Renderer as EguiRenderer;
use egui_winit::State as EguiState;

use crate::error::AppError;
use crate::gui::{
    canvas::{handle_shortcuts, show_canvas, CanvasTexture},
    menu::{populate_controls_menu, populate_upload_menu},
};
use crate::session::EditorSession;

// Background behind the canvas, same dark gray as the waiting screen.
const CLEAR_COLOR: wgpu::Color = wgpu::Color { r: 0.1, g: 0.1, b: 0.12, a: 1.0 };

// This struct manages all the wgpu-related state.
struct RenderState<'a> {
    _window: Arc<Window>, // Store the Arc to keep the window alive
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
}

impl<'a> RenderState<'a> {
    async fn new(_window: Arc<Window>) -> Result<Self, AppError> {
        let size = _window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(_window.clone())?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(AppError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps.formats.iter()
            .copied()
            .find(|f| !f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        info!("rendering with {:?} on {}", surface_format, adapter.get_info().name);

        Ok(Self {
            _window,
            surface,
            device,
            queue,
            config,
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }
}

/// Everything the UI owns: the editor session plus widget-side state.
pub struct AppState {
    pub session: EditorSession,

    // --- Manual resize fields ---
    pub length_str: String,
    pub breadth_str: String,

    // --- Feedback shown under the controls ---
    pub status_msg: Option<String>,
    pub error_msg: Option<String>,

    pub canvas: CanvasTexture,
}

impl AppState {
    fn new() -> Self {
        Self {
            session: EditorSession::new(),
            length_str: String::new(),
            breadth_str: String::new(),
            status_msg: None,
            error_msg: None,
            canvas: CanvasTexture::default(),
        }
    }

    /// Copies the current image dimensions into the Length/Breadth fields.
    pub fn autofill_size(&mut self) {
        if let Some((width, height)) = self.session.dimensions() {
            self.length_str = width.to_string();
            self.breadth_str = height.to_string();
        }
    }

    pub fn report_error(&mut self, msg: String) {
        warn!("{msg}");
        self.status_msg = None;
        self.error_msg = Some(msg);
    }

    pub fn report_status(&mut self, msg: String) {
        info!("{msg}");
        self.error_msg = None;
        self.status_msg = Some(msg);
    }
}


pub async fn run_app() -> Result<(), AppError> {
    // --- Basic Setup ---
    let event_loop = EventLoop::new()?;
    let window = Arc::new(winit::window::WindowBuilder::new()
        .with_title("Edge Modification App")
        .with_inner_size(winit::dpi::LogicalSize::new(1200, 800))
        .build(&event_loop)?);

    // --- State Initialization ---
    let mut render_state = RenderState::new(Arc::clone(&window)).await?;
    let mut app_state = AppState::new();

    // --- Egui Setup ---
    let egui_ctx = egui::Context::default();
    let mut egui_state = EguiState::new(
        egui_ctx.clone(),
        egui::ViewportId::ROOT,
        &window,
        None,
        None,
    );
    let mut egui_renderer = EguiRenderer::new(
        &render_state.device,
        render_state.config.format,
        None, // No depth buffer
        1,    // msaa_samples
    );

    // --- Event Loop ---
    event_loop.run(move |event, elwt| {
        match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => {
                let response = egui_state.on_window_event(&window, &event);
                if response.repaint {
                    window.request_redraw();
                }
                if response.consumed {
                    return;
                }

                match event {
                    WindowEvent::CloseRequested => elwt.exit(),
                    WindowEvent::Resized(physical_size) => {
                        render_state.resize(physical_size);
                    }
                    WindowEvent::RedrawRequested => {
                        // --- Egui Frame ---
                        let raw_input = egui_state.take_egui_input(&window);
                        egui_ctx.begin_frame(raw_input);

                        egui::SidePanel::right("controls_panel").show(&egui_ctx, |ui| {
                            if app_state.session.image().is_some() {
                                populate_controls_menu(&mut app_state, ui);
                            } else {
                                populate_upload_menu(&mut app_state, ui);
                            }
                        });

                        egui::CentralPanel::default()
                            .frame(egui::Frame::none())
                            .show(&egui_ctx, |ui| {
                                show_canvas(&mut app_state, ui);
                            });

                        handle_shortcuts(&mut app_state, &egui_ctx);

                        let egui_output = egui_ctx.end_frame();
                        egui_state.handle_platform_output(
                            &window,
                            egui_output.platform_output
                        );

                        // Handle texture updates *before* tessellating.
                        for (id, image_delta) in &egui_output.textures_delta.set {
                            egui_renderer.update_texture(
                                &render_state.device,
                                &render_state.queue,
                                *id,
                                image_delta
                            );
                        }

                        let paint_jobs = egui_ctx.tessellate(
                            egui_output.shapes,
                            egui_output.pixels_per_point
                        );

                        // Free any textures that egui no longer needs.
                        for id in &egui_output.textures_delta.free {
                            egui_renderer.free_texture(id);
                        }

                        // --- Get Surface Texture for Drawing ---
                        let output_frame = match render_state.surface.get_current_texture() {
                            Ok(frame) => frame,
                            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                render_state.reconfigure();
                                return;
                            }
                            Err(e) => { warn!("Dropped frame: {:?}", e); return; }
                        };
                        let output_view = output_frame.texture.create_view(
                            &wgpu::TextureViewDescriptor::default()
                        );

                        // --- Record Rendering Commands ---
                        let mut encoder = render_state.device.create_command_encoder(
                            &wgpu::CommandEncoderDescriptor::default()
                        );
                        let screen_descriptor = egui_wgpu::ScreenDescriptor {
                            size_in_pixels: [render_state.config.width, render_state.config.height],
                            pixels_per_point: egui_output.pixels_per_point,
                        };

                        let user_cmd_bufs = egui_renderer.update_buffers(
                            &render_state.device,
                            &render_state.queue,
                            &mut encoder,
                            &paint_jobs,
                            &screen_descriptor
                        );
                        {
                            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                                label: Some("Editor Pass"),
                                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                                    view: &output_view,
                                    resolve_target: None,
                                    ops: wgpu::Operations {
                                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                                        store: wgpu::StoreOp::Store,
                                    },
                                })],
                                depth_stencil_attachment: None,
                                timestamp_writes: None,
                                occlusion_query_set: None,
                            });
                            egui_renderer.render(
                                &mut render_pass,
                                &paint_jobs,
                                &screen_descriptor
                            );
                        }

                        // --- Submit and Present ---
                        render_state.queue.submit(
                            user_cmd_bufs.into_iter().chain(std::iter::once(encoder.finish()))
                        );
                        output_frame.present();
                    }
                    _ => {}
                }
            }
            Event::AboutToWait => {
                window.request_redraw();
            }
            _ => (),
        }
    })?;

    Ok(())
}
