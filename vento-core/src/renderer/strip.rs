use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::debug;
use vento_contracts::gallery::GalleryHandle;
use vento_contracts::subscription::Subscription;
use vento_model::{GalleryState, GalleryStatus};

use super::{StripKind, StripLayout};
use crate::physics::SharedPhysics;
use crate::time_loop::{TickGuard, TimeLoop};

/// What the host paints for one strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripPaint {
    pub position: f64,
    pub active_index: usize,
    pub status: GalleryStatus,
}

pub type PaintSink = Arc<dyn Fn(&StripPaint) + Send + Sync>;

struct View {
    layout: StripLayout,
    frame_count: usize,
    active_index: usize,
    status: GalleryStatus,
    painted: Option<f64>,
}

struct Shared {
    kind: StripKind,
    physics: SharedPhysics,
    view: Mutex<View>,
    sink: Option<PaintSink>,
}

impl Shared {
    fn apply(&self, state: &GalleryState) {
        let (target, index_changed) = {
            let mut view = self.view.lock();
            let index_changed = view.active_index != state.current_index;
            view.active_index = state.current_index;
            view.frame_count = state.frame_count();
            view.status = state.status;
            let target = view.layout.target(
                self.kind,
                view.frame_count,
                view.active_index,
            );
            (target, index_changed)
        };

        // The pointer owns the strip while dragging.
        if state.status == GalleryStatus::Dragging {
            return;
        }
        // Thumbnails only follow index changes so a fling can coast freely.
        if self.kind == StripKind::Thumbs && !index_changed {
            return;
        }
        self.physics.lock().seek(target);
    }

    fn tick(&self) {
        let (moving, position) = {
            let mut physics = self.physics.lock();
            let moving = physics.update();
            (moving, physics.position())
        };

        let paint = {
            let mut view = self.view.lock();
            if !moving && view.painted == Some(position) {
                return;
            }
            view.painted = Some(position);
            StripPaint {
                position,
                active_index: view.active_index,
                status: view.status,
            }
        };
        if let Some(sink) = &self.sink {
            sink(&paint);
        }
    }
}

/// Drives one strip from store snapshots and time-loop ticks.
///
/// Registers its tick on construction and deregisters on [`destroy`] or
/// drop, whichever comes first.
///
/// [`destroy`]: StripRenderer::destroy
pub struct StripRenderer {
    shared: Arc<Shared>,
    subscription: Subscription,
    tick: Mutex<Option<TickGuard>>,
}

impl StripRenderer {
    pub fn new(
        kind: StripKind,
        layout: StripLayout,
        physics: SharedPhysics,
        gallery: &dyn GalleryHandle,
        time_loop: &TimeLoop,
        sink: Option<PaintSink>,
    ) -> Self {
        let state = gallery.state();
        let frame_count = state.frame_count();
        {
            let bounds = layout.bounds(kind, frame_count);
            let mut physics = physics.lock();
            physics.set_bounds(bounds.min, bounds.max);
            physics.force_set(layout.target(
                kind,
                frame_count,
                state.current_index,
            ));
        }

        let shared = Arc::new(Shared {
            kind,
            physics,
            view: Mutex::new(View {
                layout,
                frame_count,
                active_index: state.current_index,
                status: state.status,
                painted: None,
            }),
            sink,
        });

        let weak: Weak<Shared> = Arc::downgrade(&shared);
        let subscription =
            gallery.subscribe(Arc::new(move |state: &Arc<GalleryState>| {
                if let Some(shared) = weak.upgrade() {
                    shared.apply(state);
                }
            }));

        let weak = Arc::downgrade(&shared);
        let tick = time_loop.add_guarded(move |_dt| {
            if let Some(shared) = weak.upgrade() {
                shared.tick();
            }
        });

        debug!(?kind, ?layout, frame_count, "strip renderer attached");
        Self {
            shared,
            subscription,
            tick: Mutex::new(Some(tick)),
        }
    }

    pub fn kind(&self) -> StripKind {
        self.shared.kind
    }

    pub fn layout(&self) -> StripLayout {
        self.shared.view.lock().layout
    }

    pub fn physics(&self) -> SharedPhysics {
        Arc::clone(&self.shared.physics)
    }

    pub fn position(&self) -> f64 {
        self.shared.physics.lock().position()
    }

    /// Resting position for the current index under the current layout.
    pub fn target(&self) -> f64 {
        let view = self.shared.view.lock();
        view.layout
            .target(self.shared.kind, view.frame_count, view.active_index)
    }

    /// Apply new geometry and jump straight to the matching position.
    pub fn resize(&self, layout: StripLayout) {
        let (bounds, target) = {
            let mut view = self.shared.view.lock();
            view.layout = layout;
            (
                layout.bounds(self.shared.kind, view.frame_count),
                layout.target(
                    self.shared.kind,
                    view.frame_count,
                    view.active_index,
                ),
            )
        };
        let mut physics = self.shared.physics.lock();
        physics.set_bounds(bounds.min, bounds.max);
        physics.force_set(target);
        debug!(kind = ?self.shared.kind, position = target, "strip resized");
    }

    pub fn is_destroyed(&self) -> bool {
        self.tick.lock().is_none()
    }

    /// Stop listening to the store and leave the time loop. Idempotent.
    pub fn destroy(&self) {
        let tick = self.tick.lock().take();
        if tick.is_none() {
            return;
        }
        self.subscription.unsubscribe();
        drop(tick);
        debug!(kind = ?self.shared.kind, "strip renderer destroyed");
    }
}

impl Drop for StripRenderer {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl fmt::Debug for StripRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StripRenderer")
            .field("kind", &self.shared.kind)
            .field("layout", &self.layout())
            .field("position", &self.position())
            .field("destroyed", &self.is_destroyed())
            .finish()
    }
}
