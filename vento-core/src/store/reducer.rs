//! Pure transition function of the gallery state machine.

use std::sync::Arc;

use vento_model::{GalleryAction, GalleryState, GalleryStatus};

/// Compute the next snapshot.
///
/// Returns the *same* `Arc` when the action does not touch state (autoplay
/// intents, unknown kinds) so the store can skip notifying listeners. Every
/// other recognised action produces a fresh snapshot, even when the contents
/// end up equal (e.g. NEXT on the last frame of a finite gallery).
pub fn reduce(
    state: &Arc<GalleryState>,
    action: &GalleryAction,
) -> Arc<GalleryState> {
    let n = state.frame_count();
    let i = state.current_index;
    let looping = state.is_loop();

    let next = match action {
        GalleryAction::Next => {
            let index = if looping {
                (i + 1) % n
            } else {
                (i + 1).min(n - 1)
            };
            navigate(state, index)
        }
        GalleryAction::Prev => {
            let index = if looping {
                (i + n - 1) % n
            } else {
                i.saturating_sub(1)
            };
            navigate(state, index)
        }
        GalleryAction::GoTo { index } => {
            let last = state.last_index() as i64;
            navigate(state, (*index).clamp(0, last) as usize)
        }
        GalleryAction::StartTransition => GalleryState {
            status: GalleryStatus::Transitioning,
            ..(**state).clone()
        },
        GalleryAction::EndTransition => GalleryState {
            status: GalleryStatus::Idle,
            ..(**state).clone()
        },
        GalleryAction::ToggleFullscreen => GalleryState {
            is_fullscreen: !state.is_fullscreen,
            ..(**state).clone()
        },
        GalleryAction::PlayVideo { video_id } => GalleryState {
            is_playing: true,
            playing_video_id: Some(video_id.clone()),
            ..(**state).clone()
        },
        GalleryAction::StopVideo => GalleryState {
            is_playing: false,
            playing_video_id: None,
            ..(**state).clone()
        },
        GalleryAction::SetDragging { is_dragging } => GalleryState {
            // Clearing the flag leaves the status alone; whoever owns the
            // running transition returns the gallery to idle.
            status: if *is_dragging {
                GalleryStatus::Dragging
            } else {
                state.status
            },
            ..(**state).clone()
        },
        // Autoplay intent lives in the plugin.
        GalleryAction::StartAutoplay
        | GalleryAction::StopAutoplay
        | GalleryAction::Unknown => return Arc::clone(state),
    };

    Arc::new(next)
}

fn navigate(state: &GalleryState, index: usize) -> GalleryState {
    GalleryState {
        current_index: index,
        status: GalleryStatus::Transitioning,
        ..state.clone()
    }
}
