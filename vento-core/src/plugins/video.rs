use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;
use vento_contracts::gallery::GalleryHandle;
use vento_contracts::plugin::Plugin;
use vento_contracts::subscription::Subscription;
use vento_model::{FrameId, GalleryState};

/// The player the host should currently show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveEmbed {
    pub frame_index: usize,
    pub frame_id: FrameId,
    pub url: String,
}

impl ActiveEmbed {
    /// Embed for the current frame, if it is the video being played.
    fn for_state(state: &GalleryState) -> Option<Self> {
        if !state.is_playing {
            return None;
        }
        let frame = state.current_frame()?;
        let video = frame.video.as_ref()?;
        if state.playing_video_id.as_deref() != Some(video.id.as_str()) {
            return None;
        }
        Some(Self {
            frame_index: state.current_index,
            frame_id: frame.id.clone(),
            url: video.embed_url()?,
        })
    }
}

/// Read side of a [`VideoPlugin`].
#[derive(Clone, Default)]
pub struct VideoEmbeds {
    active: Arc<Mutex<Option<ActiveEmbed>>>,
}

impl VideoEmbeds {
    pub fn current(&self) -> Option<ActiveEmbed> {
        self.active.lock().clone()
    }
}

impl fmt::Debug for VideoEmbeds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VideoEmbeds")
            .field("active", &self.current())
            .finish()
    }
}

/// Tracks which frame carries a live video embed.
///
/// The embed exists while the current frame's video is the one playing; it
/// is dropped when playback stops or the gallery moves to another frame.
#[derive(Default)]
pub struct VideoPlugin {
    embeds: VideoEmbeds,
    subscription: Option<Subscription>,
}

impl VideoPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn embeds(&self) -> VideoEmbeds {
        self.embeds.clone()
    }
}

impl Plugin for VideoPlugin {
    fn name(&self) -> &'static str {
        "video"
    }

    fn attach(&mut self, gallery: Arc<dyn GalleryHandle>) {
        let active = Arc::clone(&self.embeds.active);
        self.subscription = Some(gallery.subscribe(Arc::new(
            move |state: &Arc<GalleryState>| {
                let next = ActiveEmbed::for_state(state);
                let mut current = active.lock();
                if *current == next {
                    return;
                }
                if let Some(embed) = &next {
                    debug!(frame = %embed.frame_id, url = %embed.url, "video embed loaded");
                } else {
                    debug!("video embed removed");
                }
                *current = next;
            },
        )));
    }

    fn detach(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        *self.embeds.active.lock() = None;
    }
}

impl fmt::Debug for VideoPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VideoPlugin")
            .field("embeds", &self.embeds)
            .field("attached", &self.subscription.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{StoreGallery, frames, with_video};
    use vento_model::{GalleryAction, WrapMode};

    fn attached() -> (Arc<StoreGallery>, VideoPlugin) {
        let gallery =
            StoreGallery::new(with_video(frames(3), 1), 1, WrapMode::Finite);
        let mut plugin = VideoPlugin::new();
        plugin.attach(gallery.clone());
        (gallery, plugin)
    }

    #[test]
    fn playing_current_video_exposes_embed() {
        let (gallery, plugin) = attached();
        assert_eq!(plugin.embeds().current(), None);

        gallery.dispatch(GalleryAction::play_video("yt1"));
        let embed = plugin.embeds().current().expect("embed");
        assert_eq!(embed.frame_index, 1);
        assert_eq!(embed.url, "https://www.youtube.com/embed/yt1");
    }

    #[test]
    fn stop_or_navigation_clears_embed() {
        let (gallery, plugin) = attached();
        gallery.dispatch(GalleryAction::play_video("yt1"));
        gallery.dispatch(GalleryAction::StopVideo);
        assert_eq!(plugin.embeds().current(), None);

        gallery.dispatch(GalleryAction::play_video("yt1"));
        gallery.dispatch(GalleryAction::Next);
        assert_eq!(plugin.embeds().current(), None);
    }

    #[test]
    fn detach_clears_embed_and_listener() {
        let (gallery, mut plugin) = attached();
        gallery.dispatch(GalleryAction::play_video("yt1"));
        plugin.detach();
        assert_eq!(plugin.embeds().current(), None);
        assert_eq!(gallery.store.listener_count(), 0);
    }
}
