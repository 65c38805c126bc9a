//! Core data model definitions shared across Vento crates.
#![allow(missing_docs)]

pub mod action;
pub mod error;
pub mod frame;
pub mod input;
pub mod options;
pub mod prelude;
pub mod state;

pub use action::GalleryAction;
pub use error::{ModelError, Result as ModelResult};
pub use frame::{Frame, FrameId, VideoInfo, VideoProvider};
pub use input::{
    InputEvent, Key, KeyInput, PointerEvent, PointerPhase, PointerTarget,
};
pub use options::{Axis, GalleryOptions, KeyboardBindings, NavKind, NavPosition};
pub use state::{GalleryState, GalleryStatus, TransitionType, WrapMode};
