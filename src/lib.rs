pub mod detection;
pub mod error;
pub mod gesture;
pub mod gui;
pub mod masking;
pub mod overlay;
pub mod params;
pub mod session;
pub mod utils;

// The editor core (everything outside `gui`) never touches the windowing stack,
// so it can be driven directly from tests or another front end.

pub use error::{AppError, EditorError};
pub use gesture::{Gesture, GestureAction, PointerButton, PointerEvent, StrokeKind};
pub use params::{BrushParams, EdgeColor, EdgeParams};
pub use session::{EditorSession, Mode};
pub use utils::{Point, PointSet};
