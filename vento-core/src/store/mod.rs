//! Central gallery state: the pure reducer and the observable store holding
//! the current snapshot.

mod gallery_store;
mod reducer;

pub use gallery_store::GalleryStore;
pub use reducer::reduce;
