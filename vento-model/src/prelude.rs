//! Snapshot of the types surface for renderer and plugin crates.
//! Prefer importing from this module instead of individual tree nodes.

pub use super::action::GalleryAction;
pub use super::frame::{Frame, FrameId, VideoInfo, VideoProvider};
pub use super::input::{
    InputEvent, Key, KeyInput, PointerEvent, PointerPhase, PointerTarget,
};
pub use super::options::{
    Axis, GalleryOptions, KeyboardBindings, NavKind, NavPosition,
};
pub use super::state::{GalleryState, GalleryStatus, TransitionType, WrapMode};
