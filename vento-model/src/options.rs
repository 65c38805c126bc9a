//! Construction options for a gallery instance.

use std::time::Duration;

use crate::state::{TransitionType, WrapMode};

/// Navigation strip flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NavKind {
    Thumbs,
    #[default]
    Dots,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NavPosition {
    Top,
    #[default]
    Bottom,
}

/// The single translatable axis of a strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
}

/// Per-key enablement for the keyboard plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KeyboardBindings {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub space: bool,
    pub home: bool,
    pub end: bool,
}

impl KeyboardBindings {
    /// Arrow keys only; space/home/end stay off.
    pub const fn arrows(enabled: bool) -> Self {
        Self {
            left: enabled,
            right: enabled,
            up: enabled,
            down: enabled,
            space: false,
            home: false,
            end: false,
        }
    }

    pub const fn all() -> Self {
        Self {
            left: true,
            right: true,
            up: true,
            down: true,
            space: true,
            home: true,
            end: true,
        }
    }

    pub fn any(&self) -> bool {
        self.left
            || self.right
            || self.up
            || self.down
            || self.space
            || self.home
            || self.end
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GalleryOptions {
    /// Wrap NEXT/PREV at the ends.
    #[cfg_attr(feature = "serde", serde(rename = "loop"))]
    pub looping: bool,
    pub transition: TransitionType,
    /// Time a transition stays in `TRANSITIONING` before `END_TRANSITION`.
    pub transition_duration_ms: u64,
    pub start_index: usize,
    /// Autoplay interval; `None` disables autoplay.
    pub autoplay_ms: Option<u64>,
    pub nav: NavKind,
    pub nav_position: NavPosition,
    pub nav_direction: Axis,
    pub fullscreen: bool,
    pub keyboard: KeyboardBindings,
    pub arrows: bool,
    pub click: bool,
    pub swipe: bool,
    pub show_caption: bool,
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self {
            looping: false,
            transition: TransitionType::Slide,
            transition_duration_ms: 300,
            start_index: 0,
            autoplay_ms: None,
            nav: NavKind::Dots,
            nav_position: NavPosition::Bottom,
            nav_direction: Axis::Horizontal,
            fullscreen: false,
            keyboard: KeyboardBindings::default(),
            arrows: true,
            click: true,
            swipe: false,
            show_caption: true,
        }
    }
}

impl GalleryOptions {
    pub fn wrap_mode(&self) -> WrapMode {
        WrapMode::from_loop(self.looping)
    }

    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_duration_ms)
    }

    pub fn autoplay_interval(&self) -> Option<Duration> {
        self.autoplay_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }
}
