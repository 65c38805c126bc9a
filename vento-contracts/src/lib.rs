//! Trait surfaces that describe interactions with Vento gallery models.

pub mod events;
pub mod gallery;
pub mod physics;
pub mod plugin;
pub mod subscription;

/// Frequently used contracts for renderer and plugin crates.
pub mod prelude {
    pub use super::events::{EventHandler, GalleryEvent, HandlerId};
    pub use super::gallery::{GalleryHandle, Listener};
    pub use super::physics::{Bounds, PhysicsStrategy};
    pub use super::plugin::Plugin;
    pub use super::subscription::Subscription;
}
