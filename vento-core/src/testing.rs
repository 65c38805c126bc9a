//! Fixtures shared by unit tests.

use std::sync::Arc;

use parking_lot::Mutex;
use vento_contracts::events::{EventHandler, GalleryEvent, HandlerId};
use vento_contracts::gallery::{GalleryHandle, Listener};
use vento_contracts::subscription::Subscription;
use vento_model::{
    Frame, GalleryAction, GalleryState, TransitionType, VideoInfo, WrapMode,
};

use crate::store::GalleryStore;

pub(crate) fn frames(n: usize) -> Vec<Frame> {
    (0..n)
        .map(|i| Frame::image(format!("f{i}"), format!("/img/{i}.jpg")))
        .collect()
}

pub(crate) fn with_video(mut frames: Vec<Frame>, index: usize) -> Vec<Frame> {
    let id = frames[index].id.clone();
    frames[index] = Frame::video(id, VideoInfo::youtube(format!("yt{index}")));
    frames
}

/// Store-backed handle that records every dispatched action.
pub(crate) struct StoreGallery {
    pub store: GalleryStore,
    pub log: Mutex<Vec<GalleryAction>>,
}

impl StoreGallery {
    pub fn new(frames: Vec<Frame>, start: usize, wrap: WrapMode) -> Arc<Self> {
        let state =
            GalleryState::new(frames, start, TransitionType::Slide, wrap)
                .expect("fixture frames are non-empty");
        Arc::new(Self {
            store: GalleryStore::new(state),
            log: Mutex::new(Vec::new()),
        })
    }

    pub fn actions(&self) -> Vec<GalleryAction> {
        self.log.lock().clone()
    }

    pub fn clear_log(&self) {
        self.log.lock().clear();
    }
}

impl GalleryHandle for StoreGallery {
    fn dispatch(&self, action: GalleryAction) {
        self.log.lock().push(action.clone());
        self.store.dispatch(action);
    }

    fn state(&self) -> Arc<GalleryState> {
        self.store.get_state()
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        self.store.subscribe(listener)
    }

    fn container(&self) -> &str {
        "test-gallery"
    }

    fn on(&self, _event: GalleryEvent, _handler: EventHandler) -> HandlerId {
        HandlerId(0)
    }

    fn off(&self, _event: GalleryEvent, _id: HandlerId) -> bool {
        false
    }
}
