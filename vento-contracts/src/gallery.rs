//! Capability interface handed to plugins and interaction translators.

use std::sync::Arc;

use vento_model::{GalleryAction, GalleryState};

use crate::events::{EventHandler, GalleryEvent, HandlerId};
use crate::subscription::Subscription;

/// Store listener. Invoked synchronously with every new snapshot.
pub type Listener = Arc<dyn Fn(&Arc<GalleryState>) + Send + Sync>;

/// The narrow surface a plugin may depend on.
///
/// Anything beyond dispatching actions, reading and subscribing to state,
/// knowing the mount point, and listening to events stays private to the
/// gallery implementation.
pub trait GalleryHandle: Send + Sync {
    fn dispatch(&self, action: GalleryAction);

    fn state(&self) -> Arc<GalleryState>;

    /// Adds `listener` and invokes it once with the current state before
    /// returning.
    fn subscribe(&self, listener: Listener) -> Subscription;

    /// Identifier of the host element the gallery is mounted into.
    fn container(&self) -> &str;

    fn on(&self, event: GalleryEvent, handler: EventHandler) -> HandlerId;

    /// Returns whether a handler was removed.
    fn off(&self, event: GalleryEvent, id: HandlerId) -> bool;

    fn next(&self) {
        self.dispatch(GalleryAction::Next);
    }

    fn prev(&self) {
        self.dispatch(GalleryAction::Prev);
    }

    fn go_to(&self, index: usize) {
        self.dispatch(GalleryAction::go_to(index));
    }

    fn toggle_fullscreen(&self) {
        self.dispatch(GalleryAction::ToggleFullscreen);
    }
}
