use std::sync::Arc;

use vento_model::InputEvent;

use crate::gallery::GalleryHandle;

/// Optional behaviour layered onto a gallery through its capability handle.
///
/// `attach` is called once after the gallery is constructed; `detach` on
/// destroy. Implementations must release every subscription and tick
/// registration they took in `attach`.
pub trait Plugin: Send {
    fn name(&self) -> &'static str;

    fn attach(&mut self, gallery: Arc<dyn GalleryHandle>);

    fn detach(&mut self);

    /// Offer host input to the plugin. Returns whether it was consumed.
    fn handle_input(&mut self, _input: &InputEvent) -> bool {
        false
    }
}
