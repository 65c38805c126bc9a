use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, trace};
use vento_contracts::gallery::Listener;
use vento_contracts::subscription::Subscription;
use vento_model::{GalleryAction, GalleryState};

use super::reducer::reduce;
use crate::isolation::run_isolated;

/// Observable holder of the current [`GalleryState`].
///
/// Cloning yields another handle to the same store. Listeners run
/// synchronously inside [`dispatch`](GalleryStore::dispatch), in
/// subscription order, with no lock held, so a listener may itself dispatch.
#[derive(Clone)]
pub struct GalleryStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    state: RwLock<Arc<GalleryState>>,
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_id: AtomicU64,
}

impl GalleryStore {
    pub fn new(initial: GalleryState) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(Arc::new(initial)),
                listeners: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    pub fn get_state(&self) -> Arc<GalleryState> {
        Arc::clone(&self.inner.state.read())
    }

    /// Reduce `action` against the current snapshot and notify listeners if
    /// the reducer produced a new one.
    pub fn dispatch(&self, action: GalleryAction) {
        let (next, listeners) = {
            let mut current = self.inner.state.write();
            let next = reduce(&current, &action);
            if Arc::ptr_eq(&next, &current) {
                trace!(action = %action, "action left state untouched");
                return;
            }
            *current = Arc::clone(&next);
            (next, self.inner.listeners.lock().clone())
        };

        debug!(
            action = %action,
            index = next.current_index,
            status = %next.status,
            "state changed"
        );

        for (id, listener) in listeners {
            // A nested dispatch already notified everyone with a newer state.
            if !Arc::ptr_eq(&self.get_state(), &next) {
                trace!(action = %action, "state moved on mid-pass");
                break;
            }
            // Skip listeners removed by an earlier listener in this pass.
            if !self.is_subscribed(id) {
                continue;
            }
            run_isolated("store listener", || listener(&next));
        }
    }

    /// Register `listener` and invoke it immediately with the current state.
    pub fn subscribe(&self, listener: Listener) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .listeners
            .lock()
            .push((id, Arc::clone(&listener)));

        let current = self.get_state();
        run_isolated("store listener", || listener(&current));

        let weak = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.listeners.lock().retain(|(other, _)| *other != id);
            }
        })
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.lock().len()
    }

    fn is_subscribed(&self, id: u64) -> bool {
        self.inner
            .listeners
            .lock()
            .iter()
            .any(|(other, _)| *other == id)
    }
}

impl fmt::Debug for GalleryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.get_state();
        f.debug_struct("GalleryStore")
            .field("current_index", &state.current_index)
            .field("status", &state.status)
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vento_model::{Frame, GalleryStatus, TransitionType, WrapMode};

    fn store(n: usize) -> GalleryStore {
        let frames: Vec<Frame> =
            (0..n).map(|i| Frame::new(format!("f{i}"))).collect();
        GalleryStore::new(
            GalleryState::new(frames, 0, TransitionType::Slide, WrapMode::Finite)
                .unwrap(),
        )
    }

    fn recorder() -> (Arc<Mutex<Vec<usize>>>, Listener) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let listener: Listener = Arc::new(move |s: &Arc<GalleryState>| {
            sink.lock().push(s.current_index);
        });
        (seen, listener)
    }

    #[test]
    fn subscribe_replays_current_state() {
        let store = store(3);
        store.dispatch(GalleryAction::go_to(2));
        let (seen, listener) = recorder();
        let _sub = store.subscribe(listener);
        assert_eq!(*seen.lock(), vec![2]);
    }

    #[test]
    fn listeners_run_in_subscription_order() {
        let store = store(3);
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut subs = Vec::new();
        for tag in ["a", "b", "c"] {
            let order = Arc::clone(&order);
            subs.push(store.subscribe(Arc::new(move |_: &Arc<GalleryState>| {
                order.lock().push(tag);
            })));
        }
        order.lock().clear();

        store.dispatch(GalleryAction::Next);
        assert_eq!(*order.lock(), vec!["a", "b", "c"]);
    }

    #[test]
    fn identical_snapshot_is_not_broadcast() {
        let store = store(3);
        let (seen, listener) = recorder();
        let _sub = store.subscribe(listener);
        let before = store.get_state();

        store.dispatch(GalleryAction::Unknown);
        store.dispatch(GalleryAction::StartAutoplay);

        assert!(Arc::ptr_eq(&before, &store.get_state()));
        assert_eq!(seen.lock().len(), 1);
    }

    #[test]
    fn unsubscribe_is_idempotent_and_final() {
        let store = store(3);
        let (seen, listener) = recorder();
        let sub = store.subscribe(listener);
        sub.unsubscribe();
        sub.unsubscribe();
        assert_eq!(store.listener_count(), 0);

        store.dispatch(GalleryAction::Next);
        assert_eq!(seen.lock().len(), 1);
    }

    #[test]
    fn panicking_listener_does_not_starve_others() {
        let store = store(3);
        let _bad = store.subscribe(Arc::new(|s: &Arc<GalleryState>| {
            if s.current_index == 1 {
                panic!("listener failure");
            }
        }));
        let (seen, listener) = recorder();
        let _good = store.subscribe(listener);

        store.dispatch(GalleryAction::Next);
        assert_eq!(*seen.lock(), vec![0, 1]);
        assert_eq!(store.get_state().current_index, 1);
    }

    #[test]
    fn listener_may_dispatch_reentrantly() {
        let store = store(3);
        let inner = store.clone();
        let _sub = store.subscribe(Arc::new(move |s: &Arc<GalleryState>| {
            if s.status == GalleryStatus::Transitioning {
                inner.dispatch(GalleryAction::EndTransition);
            }
        }));

        store.dispatch(GalleryAction::Next);
        let state = store.get_state();
        assert_eq!(state.current_index, 1);
        assert_eq!(state.status, GalleryStatus::Idle);
    }

    #[test]
    fn later_listener_never_sees_superseded_state() {
        let store = store(3);
        let inner = store.clone();
        let _ender = store.subscribe(Arc::new(move |s: &Arc<GalleryState>| {
            if s.status == GalleryStatus::Transitioning {
                inner.dispatch(GalleryAction::EndTransition);
            }
        }));
        let statuses = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&statuses);
        let _watcher = store.subscribe(Arc::new(move |s: &Arc<GalleryState>| {
            sink.lock().push(s.status);
        }));

        store.dispatch(GalleryAction::Next);
        let seen = statuses.lock().clone();
        assert_eq!(seen, vec![GalleryStatus::Idle, GalleryStatus::Idle]);
        assert_eq!(seen.last(), Some(&store.get_state().status));
    }

    #[test]
    fn listener_removed_mid_pass_is_skipped() {
        let store = store(3);
        let (seen, listener) = recorder();
        let victim: Arc<Mutex<Option<Subscription>>> =
            Arc::new(Mutex::new(None));
        let handle = Arc::clone(&victim);
        let _killer = store.subscribe(Arc::new(move |s: &Arc<GalleryState>| {
            if s.current_index == 1
                && let Some(sub) = handle.lock().as_ref()
            {
                sub.unsubscribe();
            }
        }));
        *victim.lock() = Some(store.subscribe(listener));

        store.dispatch(GalleryAction::Next);
        assert_eq!(*seen.lock(), vec![0]);
    }
}
