//! Pointer gesture handling: turns raw pointer samples into physics drags
//! and, on release, into a fling plus a navigation action.

mod drag;
mod tuning;

pub use drag::{DragTranslator, GestureMode, GestureOutcome, ReleaseDecision};
pub use tuning::GestureTuning;
