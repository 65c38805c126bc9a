//! Frame sources that drive a [`TimeLoop`](super::TimeLoop).

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::FramePump;

/// Nominal 60 Hz refresh period.
pub const DEFAULT_FRAME_PERIOD: Duration = Duration::from_micros(16_667);

/// Source of refresh callbacks.
///
/// The loop calls [`start`](FrameScheduler::start) when its first callback
/// registers and [`cancel`](FrameScheduler::cancel) when the last one leaves.
/// A scheduler also acts as the loop's clock.
pub trait FrameScheduler: Send + Sync {
    /// Begin delivering frames to `pump` until cancelled or until
    /// [`FramePump::frame`] returns `false`.
    fn start(&self, pump: FramePump);

    /// Drop any pending wake-up.
    fn cancel(&self);

    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct ManualState {
    pump: Option<FramePump>,
    now: Instant,
}

/// Scheduler for hosts that own their refresh callback, and for tests.
///
/// Frames are only delivered when the paired [`ManualFrames`] handle is
/// stepped, against a virtual clock.
pub struct ManualScheduler {
    state: Arc<Mutex<ManualState>>,
}

/// Host side of a [`ManualScheduler`].
#[derive(Clone)]
pub struct ManualFrames {
    state: Arc<Mutex<ManualState>>,
}

impl ManualScheduler {
    pub fn new() -> (Self, ManualFrames) {
        let state = Arc::new(Mutex::new(ManualState {
            pump: None,
            now: Instant::now(),
        }));
        (
            Self {
                state: Arc::clone(&state),
            },
            ManualFrames { state },
        )
    }
}

impl FrameScheduler for ManualScheduler {
    fn start(&self, pump: FramePump) {
        self.state.lock().pump = Some(pump);
    }

    fn cancel(&self) {
        self.state.lock().pump = None;
    }

    fn now(&self) -> Instant {
        self.state.lock().now
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualScheduler").finish_non_exhaustive()
    }
}

impl ManualFrames {
    /// Advance the virtual clock by `dt` and deliver one frame if the loop
    /// is running. Returns whether a frame was delivered.
    pub fn step(&self, dt: Duration) -> bool {
        let (pump, now) = {
            let mut state = self.state.lock();
            state.now += dt;
            (state.pump.clone(), state.now)
        };
        let Some(pump) = pump else {
            return false;
        };
        if !pump.frame(now) {
            self.state.lock().pump = None;
        }
        true
    }

    /// Step `frames` times; returns how many frames were delivered.
    pub fn run(&self, frames: usize, dt: Duration) -> usize {
        (0..frames).filter(|_| self.step(dt)).count()
    }

    /// Whether a wake-up is pending.
    pub fn is_scheduled(&self) -> bool {
        self.state.lock().pump.is_some()
    }

    pub fn now(&self) -> Instant {
        self.state.lock().now
    }
}

impl fmt::Debug for ManualFrames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualFrames")
            .field("scheduled", &self.is_scheduled())
            .finish()
    }
}

/// Drives the loop from a tokio interval task.
pub struct TokioScheduler {
    handle: Handle,
    period: Duration,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl TokioScheduler {
    pub fn new(handle: Handle, period: Duration) -> Self {
        Self {
            handle,
            period: period.max(Duration::from_millis(1)),
            task: Mutex::new(None),
        }
    }

    /// Scheduler bound to the ambient runtime, if there is one.
    pub fn from_current(period: Duration) -> Option<Self> {
        Handle::try_current()
            .ok()
            .map(|handle| Self::new(handle, period))
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl FrameScheduler for TokioScheduler {
    fn start(&self, pump: FramePump) {
        let period = self.period;
        let task = self.handle.spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick of an interval completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                if !pump.frame(Instant::now()) {
                    break;
                }
            }
        });
        if let Some(previous) = self.task.lock().replace(task) {
            previous.abort();
        }
    }

    fn cancel(&self) {
        if let Some(task) = self.task.lock().take() {
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for TokioScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokioScheduler")
            .field("period", &self.period)
            .field("running", &self.task.lock().is_some())
            .finish()
    }
}
