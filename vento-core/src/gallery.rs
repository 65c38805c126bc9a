//! The gallery instance: store, events, transition timing, renderers and
//! plugins bound to one mount point.

use std::fmt;
use std::mem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, info, warn};
use vento_contracts::events::{EventHandler, GalleryEvent, HandlerId};
use vento_contracts::gallery::{GalleryHandle, Listener};
use vento_contracts::plugin::Plugin;
use vento_contracts::subscription::Subscription;
use vento_model::{
    Frame, GalleryAction, GalleryOptions, GalleryState, GalleryStatus,
    InputEvent, NavKind,
};

use crate::error::{GalleryError, Result};
use crate::events::EventBus;
use crate::interaction::{GestureMode, GestureTuning};
use crate::physics::{self, PhysicsTuning, SharedPhysics};
use crate::plugins::{
    ActiveEmbed, AutoplayControl, AutoplayPlugin, KeyboardPlugin, TouchPlugin,
    VideoEmbeds, VideoPlugin,
};
use crate::renderer::{PaintSink, StripKind, StripLayout, StripRenderer};
use crate::store::GalleryStore;
use crate::time_loop::{TickGuard, TimeLoop};

#[derive(Default)]
struct TransitionTimer {
    elapsed: Duration,
    tick: Option<TickGuard>,
}

struct Strips {
    stage: Option<StripRenderer>,
    thumbs: Option<StripRenderer>,
}

struct GalleryInner {
    container: String,
    options: GalleryOptions,
    store: GalleryStore,
    events: EventBus,
    time_loop: TimeLoop,
    transition: Mutex<TransitionTimer>,
    last_state: Mutex<Option<Arc<GalleryState>>>,
    subscription: Mutex<Option<Subscription>>,
    strips: Mutex<Strips>,
    plugins: Mutex<Vec<Box<dyn Plugin>>>,
    destroyed: AtomicBool,
}

impl GalleryInner {
    fn on_state(self: &Arc<Self>, state: &Arc<GalleryState>) {
        let previous = self.last_state.lock().replace(Arc::clone(state));

        if state.status == GalleryStatus::Transitioning {
            let entered = previous.as_ref().is_none_or(|prev| {
                prev.status != GalleryStatus::Transitioning
                    || prev.current_index != state.current_index
            });
            if entered {
                self.arm_transition();
            }
        } else {
            self.disarm_transition();
        }

        if let Some(prev) = previous
            && prev.is_fullscreen != state.is_fullscreen
        {
            let event = if state.is_fullscreen {
                GalleryEvent::FullscreenEnter
            } else {
                GalleryEvent::FullscreenExit
            };
            self.events.emit(event, state);
        }

        // A handler above dispatched again and the nested pass reported
        // the newer state.
        let current = self
            .last_state
            .lock()
            .as_ref()
            .is_some_and(|last| Arc::ptr_eq(last, state));
        if !current {
            return;
        }

        // Last, since change handlers may dispatch again.
        self.events.emit(GalleryEvent::Change, state);
    }

    /// (Re)start the countdown to `END_TRANSITION`.
    fn arm_transition(self: &Arc<Self>) {
        let mut timer = self.transition.lock();
        timer.elapsed = Duration::ZERO;
        if timer.tick.is_some() {
            return;
        }
        let weak: Weak<GalleryInner> = Arc::downgrade(self);
        timer.tick = Some(self.time_loop.add_guarded(move |dt| {
            if let Some(inner) = weak.upgrade() {
                inner.advance_transition(dt);
            }
        }));
    }

    fn disarm_transition(&self) {
        let tick = self.transition.lock().tick.take();
        drop(tick);
    }

    fn advance_transition(&self, dt: Duration) {
        let finished = {
            let mut timer = self.transition.lock();
            timer.elapsed += dt;
            if timer.elapsed < self.options.transition_duration() {
                return;
            }
            timer.tick.take()
        };
        drop(finished);

        self.store.dispatch(GalleryAction::EndTransition);
        let state = self.store.get_state();
        self.events.emit(GalleryEvent::ShowEnd, &state);
    }

    fn emit(&self, event: GalleryEvent) {
        let state = self.store.get_state();
        self.events.emit(event, &state);
    }

    fn navigate(&self, action: GalleryAction) {
        self.store.dispatch(action);
        self.emit(GalleryEvent::Show);
    }

    fn destroy(&self) {
        if self.destroyed.swap(true, Ordering::SeqCst) {
            return;
        }

        let plugins = mem::take(&mut *self.plugins.lock());
        for mut plugin in plugins {
            debug!(plugin = plugin.name(), "detaching plugin");
            plugin.detach();
        }

        if let Some(subscription) = self.subscription.lock().take() {
            subscription.unsubscribe();
        }
        self.disarm_transition();

        let strips = {
            let mut strips = self.strips.lock();
            (strips.stage.take(), strips.thumbs.take())
        };
        drop(strips);

        self.events.clear();
        info!(container = %self.container, "gallery destroyed");
    }
}

impl GalleryHandle for GalleryInner {
    fn dispatch(&self, action: GalleryAction) {
        self.store.dispatch(action);
    }

    fn state(&self) -> Arc<GalleryState> {
        self.store.get_state()
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        self.store.subscribe(listener)
    }

    fn container(&self) -> &str {
        &self.container
    }

    fn on(&self, event: GalleryEvent, handler: EventHandler) -> HandlerId {
        self.events.on(event, handler)
    }

    fn off(&self, event: GalleryEvent, id: HandlerId) -> bool {
        self.events.off(event, id)
    }

    fn next(&self) {
        self.navigate(GalleryAction::Next);
    }

    fn prev(&self) {
        self.navigate(GalleryAction::Prev);
    }

    fn go_to(&self, index: usize) {
        self.navigate(GalleryAction::go_to(index));
    }
}

/// Builder for [`Gallery`]. See [`Gallery::builder`].
pub struct GalleryBuilder {
    container: String,
    frames: Vec<Frame>,
    options: GalleryOptions,
    physics: PhysicsTuning,
    gesture: GestureTuning,
    time_loop: TimeLoop,
    stage: Option<(StripLayout, Option<PaintSink>)>,
    thumbs: Option<(StripLayout, Option<PaintSink>)>,
    plugins: Vec<Box<dyn Plugin>>,
    handlers: Vec<(GalleryEvent, EventHandler)>,
}

impl GalleryBuilder {
    pub fn options(mut self, options: GalleryOptions) -> Self {
        self.options = options;
        self
    }

    pub fn physics(mut self, physics: PhysicsTuning) -> Self {
        self.physics = physics;
        self
    }

    pub fn gesture(mut self, gesture: GestureTuning) -> Self {
        self.gesture = gesture;
        self
    }

    /// Drive a stage strip with the given geometry.
    pub fn stage(mut self, layout: StripLayout, sink: Option<PaintSink>) -> Self {
        self.stage = Some((layout, sink));
        self
    }

    /// Drive a thumbnail strip. Ignored unless `nav` is `thumbs`.
    pub fn thumbs(mut self, layout: StripLayout, sink: Option<PaintSink>) -> Self {
        self.thumbs = Some((layout, sink));
        self
    }

    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Register a handler before construction so it observes `Ready`.
    pub fn on(mut self, event: GalleryEvent, handler: EventHandler) -> Self {
        self.handlers.push((event, handler));
        self
    }

    pub fn build(self) -> Result<Gallery> {
        let container = self.container.trim().to_string();
        if container.is_empty() {
            return Err(GalleryError::MissingMount);
        }
        if self.frames.is_empty() {
            return Err(GalleryError::NoFrames);
        }

        let options = self.options;
        let state = GalleryState::new(
            self.frames,
            options.start_index,
            options.transition,
            options.wrap_mode(),
        )?;

        let inner = Arc::new(GalleryInner {
            container,
            options: options.clone(),
            store: GalleryStore::new(state),
            events: EventBus::new(),
            time_loop: self.time_loop.clone(),
            transition: Mutex::new(TransitionTimer::default()),
            last_state: Mutex::new(None),
            subscription: Mutex::new(None),
            strips: Mutex::new(Strips {
                stage: None,
                thumbs: None,
            }),
            plugins: Mutex::new(Vec::new()),
            destroyed: AtomicBool::new(false),
        });
        for (event, handler) in self.handlers {
            inner.events.on(event, handler);
        }

        let stage = self.stage.map(|(layout, sink)| {
            StripRenderer::new(
                StripKind::Stage,
                layout,
                physics::shared(self.physics.snap()),
                inner.as_ref(),
                &self.time_loop,
                sink,
            )
        });
        let thumbs = match (options.nav, self.thumbs) {
            (NavKind::Thumbs, Some((layout, sink))) => Some(StripRenderer::new(
                StripKind::Thumbs,
                layout,
                physics::shared(self.physics.free_scroll()),
                inner.as_ref(),
                &self.time_loop,
                sink,
            )),
            _ => None,
        };
        let stage_physics = stage.as_ref().map(StripRenderer::physics);
        let thumbs_physics = thumbs
            .as_ref()
            .map(|strip| (strip.physics(), strip.layout().frame_extent));
        {
            let mut strips = inner.strips.lock();
            strips.stage = stage;
            strips.thumbs = thumbs;
        }

        let weak = Arc::downgrade(&inner);
        let subscription =
            inner.store.subscribe(Arc::new(move |state: &Arc<GalleryState>| {
                if let Some(inner) = weak.upgrade() {
                    inner.on_state(state);
                }
            }));
        *inner.subscription.lock() = Some(subscription);

        let mut plugins: Vec<Box<dyn Plugin>> = Vec::new();
        let mut autoplay = None;
        if let Some(interval) = options.autoplay_interval() {
            let plugin = AutoplayPlugin::new(interval, self.time_loop.clone());
            autoplay = Some(plugin.control());
            plugins.push(Box::new(plugin));
        }
        if options.keyboard.any() {
            plugins.push(Box::new(KeyboardPlugin::new(options.keyboard)));
        }
        if options.swipe {
            match stage_physics {
                Some(physics) => plugins.push(Box::new(TouchPlugin::new(
                    physics,
                    options.nav_direction,
                    GestureMode::Snap,
                    self.gesture,
                ))),
                None => warn!("swipe enabled without a stage strip; ignoring"),
            }
            if let Some((physics, frame_extent)) = thumbs_physics {
                plugins.push(Box::new(TouchPlugin::thumbs(
                    physics,
                    frame_extent,
                    options.nav_direction,
                    self.gesture,
                )));
            }
        }
        let video = VideoPlugin::new();
        let embeds = video.embeds();
        plugins.push(Box::new(video));
        plugins.extend(self.plugins);

        let handle: Arc<dyn GalleryHandle> = inner.clone();
        for plugin in plugins.iter_mut() {
            debug!(plugin = plugin.name(), "attaching plugin");
            plugin.attach(Arc::clone(&handle));
        }
        *inner.plugins.lock() = plugins;

        info!(
            container = %inner.container,
            frames = inner.store.get_state().frame_count(),
            "gallery ready"
        );
        inner.emit(GalleryEvent::Ready);

        Ok(Gallery {
            inner,
            autoplay,
            embeds,
        })
    }
}

impl fmt::Debug for GalleryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GalleryBuilder")
            .field("container", &self.container)
            .field("frames", &self.frames.len())
            .field("options", &self.options)
            .field("plugins", &self.plugins.len())
            .finish_non_exhaustive()
    }
}

/// A gallery mounted on one container.
///
/// Dropping the gallery destroys it.
pub struct Gallery {
    inner: Arc<GalleryInner>,
    autoplay: Option<AutoplayControl>,
    embeds: VideoEmbeds,
}

impl Gallery {
    /// Start building a gallery on `container` driven by `time_loop`.
    pub fn builder(
        container: impl Into<String>,
        frames: impl IntoIterator<Item = Frame>,
        time_loop: &TimeLoop,
    ) -> GalleryBuilder {
        GalleryBuilder {
            container: container.into(),
            frames: frames.into_iter().collect(),
            options: GalleryOptions::default(),
            physics: PhysicsTuning::default(),
            gesture: GestureTuning::default(),
            time_loop: time_loop.clone(),
            stage: None,
            thumbs: None,
            plugins: Vec::new(),
            handlers: Vec::new(),
        }
    }

    pub fn new(
        container: impl Into<String>,
        frames: impl IntoIterator<Item = Frame>,
        options: GalleryOptions,
        time_loop: &TimeLoop,
    ) -> Result<Self> {
        Self::builder(container, frames, time_loop)
            .options(options)
            .build()
    }

    /// Capability handle for code that drives the gallery from outside.
    pub fn handle(&self) -> Arc<dyn GalleryHandle> {
        self.inner.clone()
    }

    pub fn container(&self) -> &str {
        &self.inner.container
    }

    pub fn options(&self) -> &GalleryOptions {
        &self.inner.options
    }

    pub fn state(&self) -> Arc<GalleryState> {
        self.inner.store.get_state()
    }

    pub fn dispatch(&self, action: GalleryAction) {
        self.inner.store.dispatch(action);
    }

    pub fn subscribe(&self, listener: Listener) -> Subscription {
        self.inner.store.subscribe(listener)
    }

    pub fn next(&self) {
        self.inner.navigate(GalleryAction::Next);
    }

    pub fn prev(&self) {
        self.inner.navigate(GalleryAction::Prev);
    }

    /// Navigate to `index`; out-of-range values are clamped.
    pub fn go_to(&self, index: i64) {
        self.inner.navigate(GalleryAction::GoTo { index });
    }

    /// Play the current frame's video. Returns `false` when the current
    /// frame has none.
    pub fn play(&self) -> bool {
        let state = self.state();
        let Some(video) = state.current_frame().and_then(|f| f.video.as_ref())
        else {
            return false;
        };
        self.dispatch(GalleryAction::play_video(video.id.clone()));
        self.inner.emit(GalleryEvent::LoadVideo);
        true
    }

    pub fn pause(&self) {
        self.dispatch(GalleryAction::StopVideo);
        self.inner.emit(GalleryEvent::UnloadVideo);
    }

    pub fn toggle_fullscreen(&self) {
        self.dispatch(GalleryAction::ToggleFullscreen);
    }

    pub fn can_go_prev(&self) -> bool {
        self.state().can_go_prev()
    }

    pub fn can_go_next(&self) -> bool {
        self.state().can_go_next()
    }

    pub fn on(&self, event: GalleryEvent, handler: EventHandler) -> HandlerId {
        self.inner.events.on(event, handler)
    }

    pub fn off(&self, event: GalleryEvent, id: HandlerId) -> bool {
        self.inner.events.off(event, id)
    }

    pub fn emit(&self, event: GalleryEvent) {
        self.inner.emit(event);
    }

    /// Offer host input to the plugins in attach order; stops at the first
    /// one that consumes it.
    pub fn input(&self, input: impl Into<InputEvent>) -> bool {
        let input = input.into();
        // Plugins run outside the lock so they may call back into the
        // gallery, destroy included.
        let mut plugins = mem::take(&mut *self.inner.plugins.lock());
        let consumed = plugins.iter_mut().any(|p| p.handle_input(&input));

        if self.inner.destroyed.load(Ordering::SeqCst) {
            for mut plugin in plugins {
                plugin.detach();
            }
        } else {
            let mut slot = self.inner.plugins.lock();
            plugins.append(&mut slot);
            *slot = plugins;
        }
        consumed
    }

    pub fn autoplay(&self) -> Option<&AutoplayControl> {
        self.autoplay.as_ref()
    }

    pub fn active_embed(&self) -> Option<ActiveEmbed> {
        self.embeds.current()
    }

    pub fn stage_physics(&self) -> Option<SharedPhysics> {
        self.inner.strips.lock().stage.as_ref().map(StripRenderer::physics)
    }

    pub fn thumbs_physics(&self) -> Option<SharedPhysics> {
        self.inner.strips.lock().thumbs.as_ref().map(StripRenderer::physics)
    }

    pub fn stage_position(&self) -> Option<f64> {
        self.inner
            .strips
            .lock()
            .stage
            .as_ref()
            .map(StripRenderer::position)
    }

    pub fn thumbs_position(&self) -> Option<f64> {
        self.inner
            .strips
            .lock()
            .thumbs
            .as_ref()
            .map(StripRenderer::position)
    }

    pub fn resize_stage(&self, layout: StripLayout) {
        if let Some(stage) = self.inner.strips.lock().stage.as_ref() {
            stage.resize(layout);
        }
    }

    pub fn resize_thumbs(&self, layout: StripLayout) {
        if let Some(thumbs) = self.inner.strips.lock().thumbs.as_ref() {
            thumbs.resize(layout);
        }
    }

    pub fn plugin_names(&self) -> Vec<&'static str> {
        self.inner.plugins.lock().iter().map(|p| p.name()).collect()
    }

    /// Detach plugins, drop renderers and subscriptions, leave the time
    /// loop and clear event handlers. Calling it again does nothing.
    pub fn destroy(&self) {
        self.inner.destroy();
    }

    pub fn is_destroyed(&self) -> bool {
        self.inner.destroyed.load(Ordering::SeqCst)
    }
}

impl Drop for Gallery {
    fn drop(&mut self) {
        self.inner.destroy();
    }
}

impl fmt::Debug for Gallery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("Gallery")
            .field("container", &self.inner.container)
            .field("current_index", &state.current_index)
            .field("status", &state.status)
            .field("destroyed", &self.is_destroyed())
            .finish()
    }
}
