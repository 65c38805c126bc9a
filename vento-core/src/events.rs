//! Named gallery events with per-handler isolation.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tracing::trace;
use vento_contracts::events::{EventHandler, GalleryEvent, HandlerId};
use vento_model::GalleryState;

use crate::isolation::run_isolated;

#[derive(Default)]
pub struct EventBus {
    handlers: Mutex<Vec<(GalleryEvent, HandlerId, EventHandler)>>,
    next_id: AtomicU64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&self, event: GalleryEvent, handler: EventHandler) -> HandlerId {
        let id = HandlerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers.lock().push((event, id, handler));
        id
    }

    pub fn off(&self, event: GalleryEvent, id: HandlerId) -> bool {
        let mut handlers = self.handlers.lock();
        let before = handlers.len();
        handlers.retain(|(e, h, _)| !(*e == event && *h == id));
        handlers.len() != before
    }

    /// Invoke every handler registered for `event`, in registration order.
    /// A panicking handler is logged and skipped.
    pub fn emit(&self, event: GalleryEvent, state: &GalleryState) {
        let targets: Vec<EventHandler> = self
            .handlers
            .lock()
            .iter()
            .filter(|(e, _, _)| *e == event)
            .map(|(_, _, handler)| handler.clone())
            .collect();
        if targets.is_empty() {
            return;
        }
        trace!(%event, handlers = targets.len(), "emit");
        for handler in targets {
            run_isolated("event handler", || handler(event, state));
        }
    }

    pub fn clear(&self) {
        self.handlers.lock().clear();
    }

    pub fn handler_count(&self, event: GalleryEvent) -> usize {
        self.handlers
            .lock()
            .iter()
            .filter(|(e, _, _)| *e == event)
            .count()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.handlers.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use vento_model::{TransitionType, WrapMode};

    fn state() -> GalleryState {
        GalleryState::new(
            crate::testing::frames(2),
            0,
            TransitionType::Slide,
            WrapMode::Finite,
        )
        .unwrap()
    }

    fn counter(
        hits: &Arc<Mutex<Vec<&'static str>>>,
        tag: &'static str,
    ) -> EventHandler {
        let hits = Arc::clone(hits);
        Arc::new(move |_: GalleryEvent, _: &GalleryState| {
            hits.lock().push(tag);
        })
    }

    #[test]
    fn emit_reaches_only_matching_handlers() {
        let bus = EventBus::new();
        let hits = Arc::new(Mutex::new(Vec::new()));
        bus.on(GalleryEvent::Show, counter(&hits, "show"));
        bus.on(GalleryEvent::Change, counter(&hits, "change"));

        bus.emit(GalleryEvent::Show, &state());
        assert_eq!(*hits.lock(), vec!["show"]);
    }

    #[test]
    fn off_removes_one_handler() {
        let bus = EventBus::new();
        let hits = Arc::new(Mutex::new(Vec::new()));
        let a = bus.on(GalleryEvent::Show, counter(&hits, "a"));
        bus.on(GalleryEvent::Show, counter(&hits, "b"));

        assert!(!bus.off(GalleryEvent::Change, a));
        assert!(bus.off(GalleryEvent::Show, a));
        assert!(!bus.off(GalleryEvent::Show, a));

        bus.emit(GalleryEvent::Show, &state());
        assert_eq!(*hits.lock(), vec!["b"]);
    }

    #[test]
    fn panicking_handler_is_isolated() {
        let bus = EventBus::new();
        let hits = Arc::new(Mutex::new(Vec::new()));
        bus.on(
            GalleryEvent::Ready,
            Arc::new(|_: GalleryEvent, _: &GalleryState| panic!("handler")),
        );
        bus.on(GalleryEvent::Ready, counter(&hits, "after"));

        bus.emit(GalleryEvent::Ready, &state());
        assert_eq!(*hits.lock(), vec!["after"]);
    }

    #[test]
    fn clear_drops_everything() {
        let bus = EventBus::new();
        let hits = Arc::new(Mutex::new(Vec::new()));
        for event in GalleryEvent::ALL {
            bus.on(event, counter(&hits, "x"));
        }
        bus.clear();
        assert_eq!(bus.handler_count(GalleryEvent::Change), 0);
        bus.emit(GalleryEvent::Change, &state());
        assert!(hits.lock().is_empty());
    }
}
