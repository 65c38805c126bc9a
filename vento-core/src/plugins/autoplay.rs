use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tracing::debug;
use vento_contracts::gallery::GalleryHandle;
use vento_contracts::plugin::Plugin;
use vento_contracts::subscription::Subscription;
use vento_model::{GalleryAction, GalleryState, GalleryStatus};

use crate::time_loop::{TickGuard, TimeLoop};

#[derive(Default)]
struct Run {
    paused: bool,
    elapsed: Duration,
    tick: Option<TickGuard>,
}

struct Shared {
    interval: Duration,
    time_loop: TimeLoop,
    gallery: Mutex<Option<Arc<dyn GalleryHandle>>>,
    run: Mutex<Run>,
}

impl Shared {
    fn on_state(self: &Arc<Self>, state: &GalleryState) {
        let counting = {
            let run = self.run.lock();
            state.status == GalleryStatus::Idle
                && !state.is_playing
                && !run.paused
        };
        if counting {
            self.start();
        } else {
            self.stop();
        }
    }

    fn start(self: &Arc<Self>) {
        let mut run = self.run.lock();
        if run.tick.is_some() {
            return;
        }
        run.elapsed = Duration::ZERO;
        let weak: Weak<Shared> = Arc::downgrade(self);
        run.tick = Some(self.time_loop.add_guarded(move |dt| {
            if let Some(shared) = weak.upgrade() {
                shared.advance(dt);
            }
        }));
    }

    fn stop(&self) {
        let tick = {
            let mut run = self.run.lock();
            run.elapsed = Duration::ZERO;
            run.tick.take()
        };
        drop(tick);
    }

    fn advance(&self, dt: Duration) {
        {
            let mut run = self.run.lock();
            run.elapsed += dt;
            if run.elapsed < self.interval {
                return;
            }
            run.elapsed = Duration::ZERO;
        }
        let gallery = self.gallery.lock().clone();
        if let Some(gallery) = gallery {
            debug!("autoplay advancing");
            gallery.dispatch(GalleryAction::Next);
        }
    }
}

/// Advances the gallery every `interval` of idle time.
///
/// Counting runs on the shared time loop and only while the gallery is idle,
/// no video plays, and the plugin is not paused; leaving that state resets
/// the count.
pub struct AutoplayPlugin {
    shared: Arc<Shared>,
    subscription: Option<Subscription>,
}

impl AutoplayPlugin {
    pub fn new(interval: Duration, time_loop: TimeLoop) -> Self {
        Self {
            shared: Arc::new(Shared {
                interval,
                time_loop,
                gallery: Mutex::new(None),
                run: Mutex::new(Run::default()),
            }),
            subscription: None,
        }
    }

    pub fn control(&self) -> AutoplayControl {
        AutoplayControl {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl Plugin for AutoplayPlugin {
    fn name(&self) -> &'static str {
        "autoplay"
    }

    fn attach(&mut self, gallery: Arc<dyn GalleryHandle>) {
        *self.shared.gallery.lock() = Some(Arc::clone(&gallery));
        let weak = Arc::downgrade(&self.shared);
        self.subscription = Some(gallery.subscribe(Arc::new(
            move |state: &Arc<GalleryState>| {
                if let Some(shared) = weak.upgrade() {
                    shared.on_state(state);
                }
            },
        )));
    }

    fn detach(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        self.shared.stop();
        *self.shared.gallery.lock() = None;
    }
}

impl fmt::Debug for AutoplayPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoplayPlugin")
            .field("interval", &self.shared.interval)
            .field("attached", &self.subscription.is_some())
            .finish()
    }
}

/// Host-facing pause/resume switch for an [`AutoplayPlugin`].
#[derive(Clone)]
pub struct AutoplayControl {
    shared: Arc<Shared>,
}

impl AutoplayControl {
    pub fn pause(&self) {
        self.shared.run.lock().paused = true;
        self.shared.stop();
    }

    pub fn resume(&self) {
        self.shared.run.lock().paused = false;
        let gallery = self.shared.gallery.lock().clone();
        if let Some(gallery) = gallery {
            self.shared.on_state(&gallery.state());
        }
    }

    pub fn is_paused(&self) -> bool {
        self.shared.run.lock().paused
    }

    /// Whether idle time is currently being counted.
    pub fn is_counting(&self) -> bool {
        self.shared.run.lock().tick.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.shared.interval
    }
}

impl fmt::Debug for AutoplayControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoplayControl")
            .field("paused", &self.is_paused())
            .field("counting", &self.is_counting())
            .finish()
    }
}
