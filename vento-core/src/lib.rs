//! # Vento Core
//!
//! Motion engine of the Vento media gallery. It keeps *which* frame is
//! current apart from *where* the strip of frames visually sits:
//!
//! - **Store** ([`store`]): an observable cell holding an immutable
//!   [`GalleryState`](vento_model::GalleryState), advanced only through the
//!   pure [`reduce`](store::reduce) function.
//! - **Physics** ([`physics`]): per-strip simulations. [`SnapPhysics`] locks
//!   the stage onto frame positions; [`FreeScrollPhysics`] scrolls thumbnail
//!   strips inertially with rubber-band edges.
//! - **Time loop** ([`time_loop`]): one shared per-frame pump with a clamped
//!   delta, running only while something is registered.
//! - **Renderers** ([`renderer`]): reconcile the two by turning the current
//!   index into a physics target and painting the simulated position.
//! - **Interaction** ([`interaction`]): pointer drags in, flings and
//!   navigation actions out.
//! - **Gallery** ([`Gallery`]): binds all of the above plus events and the
//!   standard [`plugins`] to a mount point.
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use vento_core::{Gallery, StripLayout, TimeLoop};
//! use vento_model::{Frame, GalleryOptions};
//!
//! let (time_loop, frames) = TimeLoop::manual();
//! let gallery = Gallery::builder(
//!     "gallery",
//!     (0..3).map(|i| Frame::image(format!("f{i}"), format!("/{i}.jpg"))),
//!     &time_loop,
//! )
//! .options(GalleryOptions::default())
//! .stage(StripLayout::stage(800.0), None)
//! .build()
//! .expect("valid gallery");
//!
//! gallery.next();
//! frames.run(60, Duration::from_millis(16));
//! assert_eq!(gallery.state().current_index, 1);
//! assert_eq!(gallery.stage_position(), Some(-800.0));
//! ```

pub mod error;
pub mod events;
pub mod gallery;
pub mod interaction;
mod isolation;
pub mod physics;
pub mod plugins;
pub mod renderer;
pub mod store;
pub mod time_loop;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{GalleryError, Result};
pub use gallery::{Gallery, GalleryBuilder};
pub use interaction::{DragTranslator, GestureMode, GestureTuning};
pub use physics::{
    FreeScrollPhysics, PhysicsTuning, SharedPhysics, SnapPhysics, SpringConfig,
};
pub use renderer::{StripKind, StripLayout, StripRenderer};
pub use store::GalleryStore;
pub use time_loop::{ManualFrames, TickGuard, TickerId, TimeLoop};
