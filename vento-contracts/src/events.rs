//! Gallery lifecycle events observable through `on`/`off`.

use std::fmt;
use std::sync::Arc;

use vento_model::GalleryState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GalleryEvent {
    /// Any state change reached the gallery.
    Change,
    /// Construction finished and the first state was rendered.
    Ready,
    /// A navigation (next/prev/go_to) was requested.
    Show,
    /// A transition settled back to idle.
    ShowEnd,
    FullscreenEnter,
    FullscreenExit,
    LoadVideo,
    UnloadVideo,
}

impl GalleryEvent {
    pub const ALL: [Self; 8] = [
        Self::Change,
        Self::Ready,
        Self::Show,
        Self::ShowEnd,
        Self::FullscreenEnter,
        Self::FullscreenExit,
        Self::LoadVideo,
        Self::UnloadVideo,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Change => "change",
            Self::Ready => "ready",
            Self::Show => "show",
            Self::ShowEnd => "showend",
            Self::FullscreenEnter => "fullscreenenter",
            Self::FullscreenExit => "fullscreenexit",
            Self::LoadVideo => "loadvideo",
            Self::UnloadVideo => "unloadvideo",
        }
    }
}

impl fmt::Display for GalleryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Event callback. Receives the state current at emission time.
pub type EventHandler = Arc<dyn Fn(GalleryEvent, &GalleryState) + Send + Sync>;

/// Identifies a registered handler for `off`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(pub u64);
