//! Standard plugins. Each talks to the gallery only through
//! [`GalleryHandle`](vento_contracts::gallery::GalleryHandle).

mod autoplay;
mod keyboard;
mod touch;
mod video;

pub use autoplay::{AutoplayControl, AutoplayPlugin};
pub use keyboard::KeyboardPlugin;
pub use touch::TouchPlugin;
pub use video::{ActiveEmbed, VideoEmbeds, VideoPlugin};
