use std::fmt;
use std::sync::Arc;

use tracing::trace;
use vento_contracts::gallery::GalleryHandle;
use vento_contracts::plugin::Plugin;
use vento_model::{InputEvent, Key, KeyInput, KeyboardBindings};

/// Maps logical keys onto gallery navigation.
pub struct KeyboardPlugin {
    bindings: KeyboardBindings,
    gallery: Option<Arc<dyn GalleryHandle>>,
}

impl KeyboardPlugin {
    pub fn new(bindings: KeyboardBindings) -> Self {
        Self {
            bindings,
            gallery: None,
        }
    }

    pub fn bindings(&self) -> KeyboardBindings {
        self.bindings
    }

    /// Returns whether the key was consumed.
    pub fn handle_key(&self, input: &KeyInput) -> bool {
        let Some(gallery) = self.gallery.as_ref() else {
            return false;
        };
        // Typing in a text field must not page the gallery.
        if input.editable_target {
            return false;
        }

        let keys = &self.bindings;
        let consumed = match input.key {
            Key::ArrowLeft if keys.left => {
                gallery.prev();
                true
            }
            Key::ArrowRight if keys.right => {
                gallery.next();
                true
            }
            Key::ArrowUp if keys.up => {
                gallery.prev();
                true
            }
            Key::ArrowDown if keys.down => {
                gallery.next();
                true
            }
            Key::Space if keys.space && !input.shift => {
                gallery.next();
                true
            }
            Key::Home if keys.home => {
                gallery.go_to(0);
                true
            }
            Key::End if keys.end => {
                gallery.go_to(gallery.state().last_index());
                true
            }
            Key::Escape if gallery.state().is_fullscreen => {
                gallery.toggle_fullscreen();
                true
            }
            _ => false,
        };
        if consumed {
            trace!(key = ?input.key, "key handled");
        }
        consumed
    }
}

impl Plugin for KeyboardPlugin {
    fn name(&self) -> &'static str {
        "keyboard"
    }

    fn attach(&mut self, gallery: Arc<dyn GalleryHandle>) {
        self.gallery = Some(gallery);
    }

    fn detach(&mut self) {
        self.gallery = None;
    }

    fn handle_input(&mut self, input: &InputEvent) -> bool {
        match input {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Pointer(_) => false,
        }
    }
}

impl fmt::Debug for KeyboardPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyboardPlugin")
            .field("bindings", &self.bindings)
            .field("attached", &self.gallery.is_some())
            .finish()
    }
}
