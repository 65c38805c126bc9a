//! Shared per-frame clock.
//!
//! Every animated part of a gallery registers a tick callback on one
//! [`TimeLoop`]. The loop requests frames from its [`FrameScheduler`] only
//! while at least one callback is registered, and hands each callback the
//! elapsed time since the previous frame, clamped to [`MAX_FRAME_DELTA`] so
//! a stalled host does not produce a single huge jump.

mod scheduler;

pub use scheduler::{
    DEFAULT_FRAME_PERIOD, FrameScheduler, ManualFrames, ManualScheduler,
    TokioScheduler,
};

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::isolation::run_isolated;

/// Upper bound on the delta delivered to tick callbacks.
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(64);

pub type TickCallback = Arc<dyn Fn(Duration) + Send + Sync>;

/// Registration handle returned by [`TimeLoop::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickerId(u64);

/// Cloneable handle to a shared frame loop.
#[derive(Clone)]
pub struct TimeLoop {
    inner: Arc<LoopInner>,
}

struct LoopInner {
    callbacks: Mutex<Vec<(TickerId, TickCallback)>>,
    clock: Mutex<Clock>,
    scheduler: Box<dyn FrameScheduler>,
    next_id: AtomicU64,
}

#[derive(Default)]
struct Clock {
    running: bool,
    last: Option<Instant>,
}

impl TimeLoop {
    pub fn new(scheduler: impl FrameScheduler + 'static) -> Self {
        Self {
            inner: Arc::new(LoopInner {
                callbacks: Mutex::new(Vec::new()),
                clock: Mutex::new(Clock::default()),
                scheduler: Box::new(scheduler),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Loop driven by hand through the returned [`ManualFrames`].
    pub fn manual() -> (Self, ManualFrames) {
        let (scheduler, frames) = ManualScheduler::new();
        (Self::new(scheduler), frames)
    }

    /// Register `callback`; starts the loop if it was idle.
    pub fn add(
        &self,
        callback: impl Fn(Duration) + Send + Sync + 'static,
    ) -> TickerId {
        let id = TickerId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        self.inner.callbacks.lock().push((id, Arc::new(callback)));
        self.inner.ensure_running();
        id
    }

    /// Like [`add`](TimeLoop::add), deregistering when the guard drops.
    pub fn add_guarded(
        &self,
        callback: impl Fn(Duration) + Send + Sync + 'static,
    ) -> TickGuard {
        TickGuard {
            time_loop: self.clone(),
            id: Some(self.add(callback)),
        }
    }

    /// Deregister `id`. Stops the loop when nothing is left. Returns whether
    /// the callback was registered.
    pub fn remove(&self, id: TickerId) -> bool {
        let (removed, empty) = {
            let mut callbacks = self.inner.callbacks.lock();
            let before = callbacks.len();
            callbacks.retain(|(other, _)| *other != id);
            (callbacks.len() != before, callbacks.is_empty())
        };
        if removed && empty {
            self.inner.stop_if_idle();
        }
        removed
    }

    pub fn is_running(&self) -> bool {
        self.inner.clock.lock().running
    }

    pub fn len(&self) -> usize {
        self.inner.callbacks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for TimeLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeLoop")
            .field("callbacks", &self.len())
            .field("running", &self.is_running())
            .finish()
    }
}

impl LoopInner {
    fn ensure_running(self: &Arc<Self>) {
        let mut clock = self.clock.lock();
        if clock.running {
            return;
        }
        clock.running = true;
        clock.last = Some(self.scheduler.now());
        debug!("time loop started");
        self.scheduler.start(FramePump {
            inner: Arc::downgrade(self),
        });
    }

    fn stop_if_idle(&self) {
        let mut clock = self.clock.lock();
        if !clock.running || !self.callbacks.lock().is_empty() {
            return;
        }
        clock.running = false;
        clock.last = None;
        self.scheduler.cancel();
        debug!("time loop stopped");
    }

    fn is_registered(&self, id: TickerId) -> bool {
        self.callbacks.lock().iter().any(|(other, _)| *other == id)
    }
}

/// Scheduler-side entry point into a loop.
#[derive(Clone)]
pub struct FramePump {
    inner: Weak<LoopInner>,
}

impl FramePump {
    /// Deliver one frame stamped `now` to every registered callback, in
    /// registration order. Returns whether the loop wants further frames.
    pub fn frame(&self, now: Instant) -> bool {
        let Some(inner) = self.inner.upgrade() else {
            return false;
        };
        let delta = {
            let mut clock = inner.clock.lock();
            if !clock.running {
                return false;
            }
            let last = clock.last.replace(now).unwrap_or(now);
            now.saturating_duration_since(last).min(MAX_FRAME_DELTA)
        };
        trace!(delta_ms = delta.as_secs_f64() * 1000.0, "frame");

        let callbacks = inner.callbacks.lock().clone();
        for (id, callback) in callbacks {
            if !inner.is_registered(id) {
                continue;
            }
            run_isolated("tick callback", || callback(delta));
        }

        inner.clock.lock().running
    }
}

impl fmt::Debug for FramePump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FramePump")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

/// Removes its tick callback from the loop when dropped.
pub struct TickGuard {
    time_loop: TimeLoop,
    id: Option<TickerId>,
}

impl TickGuard {
    pub fn id(&self) -> Option<TickerId> {
        self.id
    }

    /// Deregister now instead of on drop.
    pub fn cancel(&mut self) {
        if let Some(id) = self.id.take() {
            self.time_loop.remove(id);
        }
    }
}

impl Drop for TickGuard {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for TickGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickGuard").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn recorder(
        tag: &'static str,
        log: &Arc<Mutex<Vec<(&'static str, Duration)>>>,
    ) -> impl Fn(Duration) + Send + Sync + 'static {
        let log = Arc::clone(log);
        move |dt| log.lock().push((tag, dt))
    }

    #[test]
    fn callbacks_share_delta_in_registration_order() {
        let (time_loop, frames) = TimeLoop::manual();
        let log = Arc::new(Mutex::new(Vec::new()));
        let a = time_loop.add(recorder("a", &log));
        let _b = time_loop.add(recorder("b", &log));

        assert!(frames.step(FRAME));
        assert_eq!(*log.lock(), vec![("a", FRAME), ("b", FRAME)]);

        log.lock().clear();
        assert!(time_loop.remove(a));
        frames.step(FRAME);
        assert_eq!(*log.lock(), vec![("b", FRAME)]);
    }

    #[test]
    fn last_removal_stops_and_cancels() {
        let (time_loop, frames) = TimeLoop::manual();
        let log = Arc::new(Mutex::new(Vec::new()));
        let id = time_loop.add(recorder("a", &log));
        assert!(time_loop.is_running());
        assert!(frames.is_scheduled());

        assert!(time_loop.remove(id));
        assert!(!time_loop.remove(id));
        assert!(!time_loop.is_running());
        assert!(!frames.is_scheduled());
        assert!(!frames.step(FRAME));
        assert!(log.lock().is_empty());
    }

    #[test]
    fn delta_is_clamped() {
        let (time_loop, frames) = TimeLoop::manual();
        let log = Arc::new(Mutex::new(Vec::new()));
        let _id = time_loop.add(recorder("a", &log));

        frames.step(Duration::from_millis(500));
        frames.step(Duration::from_millis(64));
        frames.step(Duration::from_millis(65));
        let deltas: Vec<_> = log.lock().iter().map(|(_, dt)| *dt).collect();
        assert_eq!(deltas, vec![MAX_FRAME_DELTA; 3]);
    }

    #[test]
    fn restart_measures_from_new_start() {
        let (time_loop, frames) = TimeLoop::manual();
        let log = Arc::new(Mutex::new(Vec::new()));
        let id = time_loop.add(recorder("a", &log));
        time_loop.remove(id);

        // Idle time between runs is not billed to the next frame.
        frames.step(Duration::from_secs(10));
        let _id = time_loop.add(recorder("b", &log));
        frames.step(FRAME);
        assert_eq!(*log.lock(), vec![("b", FRAME)]);
    }

    #[test]
    fn guard_deregisters_on_drop() {
        let (time_loop, frames) = TimeLoop::manual();
        let log = Arc::new(Mutex::new(Vec::new()));
        let guard = time_loop.add_guarded(recorder("a", &log));
        frames.step(FRAME);
        drop(guard);
        assert!(time_loop.is_empty());
        assert!(!frames.step(FRAME));
        assert_eq!(log.lock().len(), 1);
    }

    #[test]
    fn callback_may_remove_itself_mid_frame() {
        let (time_loop, frames) = TimeLoop::manual();
        let slot: Arc<Mutex<Option<TickerId>>> = Arc::new(Mutex::new(None));
        let handle = time_loop.clone();
        let own = Arc::clone(&slot);
        let id = time_loop.add(move |_| {
            if let Some(id) = own.lock().take() {
                handle.remove(id);
            }
        });
        *slot.lock() = Some(id);

        assert!(frames.step(FRAME));
        assert!(!time_loop.is_running());
        assert!(!frames.is_scheduled());
    }

    #[test]
    fn panicking_callback_does_not_stop_the_frame() {
        let (time_loop, frames) = TimeLoop::manual();
        let log = Arc::new(Mutex::new(Vec::new()));
        let _bad = time_loop.add(|_| panic!("tick failure"));
        let _good = time_loop.add(recorder("good", &log));
        frames.step(FRAME);
        frames.step(FRAME);
        assert_eq!(log.lock().len(), 2);
    }
}
