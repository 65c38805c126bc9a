//! Headless strip renderers.
//!
//! A renderer reconciles the two halves of the engine: it reads the logical
//! index from store snapshots, turns it into a physics target, and on every
//! tick advances the physics and hands the resulting position to a paint
//! sink supplied by the host.

mod layout;
mod strip;

pub use layout::{StripKind, StripLayout};
pub use strip::{PaintSink, StripPaint, StripRenderer};
