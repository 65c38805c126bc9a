use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};
use vento_contracts::gallery::GalleryHandle;
use vento_model::{Axis, GalleryAction, GalleryStatus, PointerEvent, PointerPhase};

use super::GestureTuning;
use crate::physics::SharedPhysics;

/// How a finished drag is resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureMode {
    /// Stage strip: a swipe navigates one frame, anything else snaps back.
    Snap,
    /// Free strip: a swipe coasts; a slow drag settles on the nearest frame.
    FreeScroll { frame_extent: f64 },
}

/// What a pointer event did.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureOutcome {
    /// No gesture in progress, or the event was filtered out.
    Ignored,
    /// A gesture started.
    Pressed,
    /// Movement is still below the drag threshold.
    Tracking,
    /// The strip followed the pointer.
    Dragged { position: f64 },
    Released(ReleaseDecision),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseDecision {
    pub swipe: bool,
    /// Last sampled pointer speed along the axis, px/ms.
    pub speed: f64,
    pub navigation: Option<GalleryAction>,
}

#[derive(Debug, Clone, Copy)]
struct Gesture {
    origin: f64,
    /// Pointer coordinate last forwarded to the physics.
    forwarded: f64,
    sample: f64,
    sample_time: f64,
    speed: f64,
    engaged: bool,
}

/// Pointer state machine bound to one strip.
///
/// The gallery only learns about the gesture through `SET_DRAGGING` and the
/// navigation issued on release; the visual position lives in the physics.
pub struct DragTranslator {
    gallery: Arc<dyn GalleryHandle>,
    physics: SharedPhysics,
    axis: Axis,
    mode: GestureMode,
    tuning: GestureTuning,
    gesture: Option<Gesture>,
}

impl DragTranslator {
    pub fn new(
        gallery: Arc<dyn GalleryHandle>,
        physics: SharedPhysics,
        axis: Axis,
        mode: GestureMode,
        tuning: GestureTuning,
    ) -> Self {
        Self {
            gallery,
            physics,
            axis,
            mode,
            tuning,
            gesture: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn handle(&mut self, event: &PointerEvent) -> GestureOutcome {
        match event.phase {
            PointerPhase::Down => self.press(event),
            PointerPhase::Move => self.track(event),
            PointerPhase::Up | PointerPhase::Cancel => self.release(),
        }
    }

    fn coordinate(&self, event: &PointerEvent) -> f64 {
        match self.axis {
            Axis::Horizontal => event.x,
            Axis::Vertical => event.y,
        }
    }

    fn press(&mut self, event: &PointerEvent) -> GestureOutcome {
        if !event.is_primary() {
            return GestureOutcome::Ignored;
        }
        if self.gallery.state().status == GalleryStatus::Transitioning {
            trace!("pointer down ignored while transitioning");
            return GestureOutcome::Ignored;
        }

        let origin = self.coordinate(event);
        self.gesture = Some(Gesture {
            origin,
            forwarded: origin,
            sample: origin,
            sample_time: event.time_ms,
            speed: 0.0,
            engaged: false,
        });

        self.gallery.dispatch(GalleryAction::set_dragging(true));
        self.physics.lock().stop();
        GestureOutcome::Pressed
    }

    fn track(&mut self, event: &PointerEvent) -> GestureOutcome {
        let coordinate = self.coordinate(event);
        let Some(gesture) = self.gesture.as_mut() else {
            return GestureOutcome::Ignored;
        };

        let dt = event.time_ms - gesture.sample_time;
        if dt > 0.0 {
            gesture.speed = (coordinate - gesture.sample) / dt;
        }
        gesture.sample = coordinate;
        gesture.sample_time = event.time_ms;

        if !gesture.engaged {
            if (coordinate - gesture.origin).abs() <= self.tuning.move_threshold
            {
                return GestureOutcome::Tracking;
            }
            gesture.engaged = true;
        }

        let delta = coordinate - gesture.forwarded;
        gesture.forwarded = coordinate;
        let position = self.physics.lock().drag(delta);
        GestureOutcome::Dragged { position }
    }

    fn release(&mut self) -> GestureOutcome {
        let Some(gesture) = self.gesture.take() else {
            return GestureOutcome::Ignored;
        };

        let state = self.gallery.state();
        let distance = gesture.sample - gesture.origin;
        // A slow drag on a free strip is positioning, however long it is.
        let swipe = gesture.engaged
            && match self.mode {
                GestureMode::Snap => {
                    self.tuning.is_swipe(distance, gesture.speed)
                }
                GestureMode::FreeScroll { .. } => {
                    gesture.speed.abs() > self.tuning.swipe_speed
                }
            };

        let navigation = match self.mode {
            GestureMode::Snap if swipe => {
                self.fling(gesture.speed);
                let direction = if distance != 0.0 {
                    distance
                } else {
                    gesture.speed
                };
                Some(if direction > 0.0 {
                    GalleryAction::Prev
                } else {
                    GalleryAction::Next
                })
            }
            GestureMode::Snap => Some(GalleryAction::go_to(state.current_index)),
            GestureMode::FreeScroll { .. } if swipe => {
                self.fling(gesture.speed);
                None
            }
            GestureMode::FreeScroll { frame_extent }
                if gesture.engaged && frame_extent > 0.0 =>
            {
                // Strips scroll toward negative positions, so an overshoot
                // past the leading edge belongs to the first frame.
                let offset = (-self.physics.lock().position()).max(0.0);
                let nearest = ((offset / frame_extent).round() as usize)
                    .min(state.last_index());
                (nearest != state.current_index)
                    .then(|| GalleryAction::go_to(nearest))
            }
            GestureMode::FreeScroll { .. } => None,
        };

        debug!(
            distance,
            speed = gesture.speed,
            swipe,
            navigation = ?navigation,
            "gesture released"
        );

        if let Some(action) = navigation.clone() {
            self.gallery.dispatch(action);
        }
        self.gallery.dispatch(GalleryAction::set_dragging(false));

        // Nothing navigated, so no transition will bring the gallery back
        // to rest.
        if self.gallery.state().status == GalleryStatus::Dragging {
            self.gallery.dispatch(GalleryAction::EndTransition);
        }

        GestureOutcome::Released(ReleaseDecision {
            swipe,
            speed: gesture.speed,
            navigation,
        })
    }

    fn fling(&self, speed: f64) {
        self.physics
            .lock()
            .release(speed * self.tuning.release_scale);
    }
}

impl fmt::Debug for DragTranslator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragTranslator")
            .field("axis", &self.axis)
            .field("mode", &self.mode)
            .field("tuning", &self.tuning)
            .field("gesture", &self.gesture)
            .finish()
    }
}
