//! Immutable gallery state snapshot.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::ModelError;
use crate::frame::Frame;

/// Interaction mode of the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum GalleryStatus {
    #[default]
    Idle,
    Transitioning,
    Dragging,
}

impl fmt::Display for GalleryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "IDLE"),
            Self::Transitioning => write!(f, "TRANSITIONING"),
            Self::Dragging => write!(f, "DRAGGING"),
        }
    }
}

/// Rendering hint only; the reducer never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TransitionType {
    #[default]
    Slide,
    Fade,
    Crossfade,
}

impl FromStr for TransitionType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slide" => Ok(Self::Slide),
            "fade" => Ok(Self::Fade),
            "crossfade" => Ok(Self::Crossfade),
            other => Err(ModelError::UnknownVariant {
                field: "transition",
                value: other.to_string(),
            }),
        }
    }
}

/// Index boundary behavior for NEXT/PREV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum WrapMode {
    /// Clamped at both ends.
    #[default]
    Finite,
    /// NEXT past the last frame wraps to the first, PREV before the first
    /// wraps to the last.
    Loop,
}

impl WrapMode {
    pub fn from_loop(looping: bool) -> Self {
        if looping { Self::Loop } else { Self::Finite }
    }

    pub fn is_loop(self) -> bool {
        matches!(self, Self::Loop)
    }
}

/// Snapshot of the gallery. Replaced wholesale on every transition; never
/// mutated in place once published by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryState {
    /// Fixed for the lifetime of one store.
    pub frames: Arc<[Frame]>,
    /// Always a valid index into `frames`.
    pub current_index: usize,
    pub status: GalleryStatus,
    pub is_fullscreen: bool,
    pub is_playing: bool,
    pub playing_video_id: Option<String>,
    pub transition_type: TransitionType,
    pub wrap_mode: WrapMode,
}

impl GalleryState {
    /// Initial snapshot. `start_index` is clamped into range.
    pub fn new(
        frames: impl Into<Arc<[Frame]>>,
        start_index: usize,
        transition_type: TransitionType,
        wrap_mode: WrapMode,
    ) -> Result<Self, ModelError> {
        let frames = frames.into();
        if frames.is_empty() {
            return Err(ModelError::EmptyGallery);
        }
        let current_index = start_index.min(frames.len() - 1);
        Ok(Self {
            frames,
            current_index,
            status: GalleryStatus::Idle,
            is_fullscreen: false,
            is_playing: false,
            playing_video_id: None,
            transition_type,
            wrap_mode,
        })
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn last_index(&self) -> usize {
        self.frames.len().saturating_sub(1)
    }

    pub fn is_loop(&self) -> bool {
        self.wrap_mode.is_loop()
    }

    pub fn current_frame(&self) -> Option<&Frame> {
        self.frames.get(self.current_index)
    }

    pub fn can_go_prev(&self) -> bool {
        self.is_loop() || self.current_index > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.is_loop() || self.current_index < self.last_index()
    }

    /// Index of the frame with the given id, if present.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.frames.iter().position(|f| f.id.as_str() == id)
    }
}
