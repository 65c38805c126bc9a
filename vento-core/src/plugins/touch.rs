use std::fmt;
use std::sync::Arc;

use vento_contracts::gallery::GalleryHandle;
use vento_contracts::plugin::Plugin;
use vento_model::{Axis, InputEvent, PointerEvent, PointerTarget};

use crate::interaction::{
    DragTranslator, GestureMode, GestureOutcome, GestureTuning,
};
use crate::physics::SharedPhysics;

/// Direct manipulation of a strip by pointer.
pub struct TouchPlugin {
    physics: SharedPhysics,
    axis: Axis,
    mode: GestureMode,
    tuning: GestureTuning,
    target: PointerTarget,
    translator: Option<DragTranslator>,
}

impl TouchPlugin {
    pub fn new(
        physics: SharedPhysics,
        axis: Axis,
        mode: GestureMode,
        tuning: GestureTuning,
    ) -> Self {
        Self {
            physics,
            axis,
            mode,
            tuning,
            target: PointerTarget::Stage,
            translator: None,
        }
    }

    /// Touch on the main stage with snap resolution.
    pub fn stage(physics: SharedPhysics, tuning: GestureTuning) -> Self {
        Self::new(physics, Axis::Horizontal, GestureMode::Snap, tuning)
    }

    /// Free scrolling of the thumbnail strip. Only pointer events aimed at
    /// the thumbs reach it.
    pub fn thumbs(
        physics: SharedPhysics,
        frame_extent: f64,
        axis: Axis,
        tuning: GestureTuning,
    ) -> Self {
        Self {
            target: PointerTarget::Thumbs,
            ..Self::new(
                physics,
                axis,
                GestureMode::FreeScroll { frame_extent },
                tuning,
            )
        }
    }

    pub fn handle_pointer(&mut self, event: &PointerEvent) -> GestureOutcome {
        match self.translator.as_mut() {
            Some(translator) => translator.handle(event),
            None => GestureOutcome::Ignored,
        }
    }
}

impl Plugin for TouchPlugin {
    fn name(&self) -> &'static str {
        match self.target {
            PointerTarget::Stage => "touch",
            PointerTarget::Thumbs => "thumbs-touch",
        }
    }

    fn attach(&mut self, gallery: Arc<dyn GalleryHandle>) {
        self.translator = Some(DragTranslator::new(
            gallery,
            Arc::clone(&self.physics),
            self.axis,
            self.mode,
            self.tuning,
        ));
    }

    fn detach(&mut self) {
        // Settle a gesture still in flight so the gallery is not left
        // dragging.
        if let Some(mut translator) = self.translator.take()
            && translator.is_active()
        {
            translator.handle(&PointerEvent::cancel(0.0, 0.0, 0.0));
        }
    }

    fn handle_input(&mut self, input: &InputEvent) -> bool {
        match input {
            InputEvent::Pointer(event) if event.target == self.target => {
                self.handle_pointer(event) != GestureOutcome::Ignored
            }
            InputEvent::Pointer(_) => false,
            InputEvent::Key(_) => false,
        }
    }
}

impl fmt::Debug for TouchPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TouchPlugin")
            .field("axis", &self.axis)
            .field("mode", &self.mode)
            .field("target", &self.target)
            .field("translator", &self.translator)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{self, FreeScrollPhysics, SnapPhysics};
    use vento_contracts::physics::PhysicsStrategy;
    use crate::testing::{StoreGallery, frames};
    use vento_model::{GalleryStatus, WrapMode};

    #[test]
    fn forwards_pointer_input_once_attached() {
        let gallery = StoreGallery::new(frames(3), 0, WrapMode::Finite);
        let mut plugin = TouchPlugin::stage(
            physics::shared(SnapPhysics::default()),
            GestureTuning::default(),
        );
        let down: InputEvent = PointerEvent::down(0.0, 0.0, 0.0).into();
        assert!(!plugin.handle_input(&down));

        plugin.attach(gallery.clone());
        assert!(plugin.handle_input(&down));
        assert_eq!(gallery.state().status, GalleryStatus::Dragging);
    }

    #[test]
    fn detach_mid_gesture_clears_dragging() {
        let gallery = StoreGallery::new(frames(3), 1, WrapMode::Finite);
        let mut plugin = TouchPlugin::stage(
            physics::shared(SnapPhysics::default()),
            GestureTuning::default(),
        );
        plugin.attach(gallery.clone());
        plugin.handle_pointer(&PointerEvent::down(100.0, 0.0, 0.0));
        plugin.detach();
        assert_ne!(gallery.state().status, GalleryStatus::Dragging);
        assert_eq!(gallery.state().current_index, 1);
    }

    #[test]
    fn thumbs_plugin_only_takes_thumbs_pointers() {
        let gallery = StoreGallery::new(frames(6), 0, WrapMode::Finite);
        let mut free = FreeScrollPhysics::default();
        free.set_bounds(-300.0, 0.0);
        let physics = physics::shared(free);
        let mut plugin = TouchPlugin::thumbs(
            physics.clone(),
            60.0,
            Axis::Horizontal,
            GestureTuning::default(),
        );
        plugin.attach(gallery.clone());
        assert_eq!(plugin.name(), "thumbs-touch");

        let stage: InputEvent = PointerEvent::down(200.0, 0.0, 0.0).into();
        assert!(!plugin.handle_input(&stage));
        assert_eq!(gallery.state().status, GalleryStatus::Idle);

        let press = PointerEvent::down(200.0, 0.0, 0.0)
            .with_target(PointerTarget::Thumbs);
        assert!(plugin.handle_input(&press.into()));
        let drag = PointerEvent::moved(150.0, 0.0, 200.0)
            .with_target(PointerTarget::Thumbs);
        assert!(plugin.handle_input(&drag.into()));
        assert_eq!(physics.lock().position(), -50.0);
        assert_eq!(gallery.state().status, GalleryStatus::Dragging);
    }
}
