use std::path::PathBuf;

/// Errors surfaced by editor operations.
///
/// None of these are fatal to the session: the GUI reports them in the
/// control panel and carries on with the previous state.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("failed to read image {path}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to write overlay {path}: {source}")]
    OverlayWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("invalid input for {field}: {value:?}")]
    InvalidDimension { field: &'static str, value: String },
    #[error("no edges detected yet")]
    NoComposite,
}

/// Errors that stop the application before the event loop is running.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] egui_winit::winit::error::EventLoopError),
    #[error("window creation failed: {0}")]
    Window(#[from] egui_winit::winit::error::OsError),
    #[error("surface creation failed: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter found")]
    NoAdapter,
    #[error("GPU device request failed: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}
