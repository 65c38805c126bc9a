//! Headless gallery driven by a script.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use parking_lot::Mutex;
use serde_json::json;
use tokio::runtime::Handle;
use tracing::{debug, info};
use vento_config::loader::CONFIG_PATH_VAR;
use vento_config::{ConfigLoader, VentoConfig};
use vento_core::renderer::{PaintSink, StripPaint};
use vento_core::time_loop::TokioScheduler;
use vento_core::{
    Gallery, ManualFrames, StripKind, StripLayout, TickGuard, TimeLoop,
};
use vento_contracts::events::GalleryEvent;
use vento_model::{
    Axis, Frame, GalleryState, Key, KeyInput, KeyboardBindings, NavKind,
    PointerEvent, VideoInfo,
};

use crate::cli::SimulateArgs;
use crate::script::Step;

/// Prints paints, events and actions against the simulated clock.
struct Reporter {
    json: bool,
    clock: Arc<Mutex<Duration>>,
}

impl Reporter {
    fn now_ms(&self) -> f64 {
        self.clock.lock().as_secs_f64() * 1000.0
    }

    fn paint(&self, kind: StripKind, paint: &StripPaint) {
        let strip = strip_name(kind);
        if self.json {
            println!(
                "{}",
                json!({
                    "t_ms": self.now_ms(),
                    "kind": "paint",
                    "strip": strip,
                    "index": paint.active_index,
                    "status": paint.status,
                    "position": paint.position,
                })
            );
        } else {
            println!(
                "{:>7.0}ms  {strip:<7} index={} status={} position={:.2}",
                self.now_ms(),
                paint.active_index,
                paint.status,
                paint.position,
            );
        }
    }

    fn event(&self, event: GalleryEvent, state: &GalleryState) {
        if self.json {
            println!(
                "{}",
                json!({
                    "t_ms": self.now_ms(),
                    "kind": "event",
                    "event": event.name(),
                    "index": state.current_index,
                    "status": state.status,
                })
            );
        } else {
            println!(
                "{:>7.0}ms  event   {} index={} status={}",
                self.now_ms(),
                event,
                state.current_index,
                state.status,
            );
        }
    }

    fn step(&self, step: &Step, handled: bool) {
        if self.json {
            println!(
                "{}",
                json!({
                    "t_ms": self.now_ms(),
                    "kind": "step",
                    "step": step.to_string(),
                    "handled": handled,
                })
            );
        } else {
            let note = if handled { "" } else { " (ignored)" };
            println!("{:>7.0}ms  step    {step}{note}", self.now_ms());
        }
    }

    fn finish(&self, gallery: &Gallery) {
        let state = gallery.state();
        let stage = gallery.stage_position().unwrap_or_default();
        if self.json {
            println!(
                "{}",
                json!({
                    "t_ms": self.now_ms(),
                    "kind": "final",
                    "index": state.current_index,
                    "status": state.status,
                    "stage": stage,
                    "thumbs": gallery.thumbs_position(),
                })
            );
        } else {
            println!(
                "final index={} status={} stage={stage:.2}",
                state.current_index, state.status
            );
        }
    }
}

fn strip_name(kind: StripKind) -> &'static str {
    match kind {
        StripKind::Stage => "stage",
        StripKind::Thumbs => "thumbs",
    }
}

enum Driver {
    Manual(ManualFrames),
    Realtime,
}

struct Simulation {
    gallery: Gallery,
    driver: Driver,
    period: Duration,
    axis: Axis,
    origin: f64,
    reporter: Arc<Reporter>,
    _clock: TickGuard,
}

impl Simulation {
    async fn advance(&self, frames: usize) {
        match &self.driver {
            Driver::Manual(pump) => {
                pump.run(frames, self.period);
            }
            Driver::Realtime => {
                let frames = u32::try_from(frames).unwrap_or(u32::MAX);
                tokio::time::sleep(self.period.saturating_mul(frames)).await;
            }
        }
    }

    fn pointer_at(&self, offset: f64) -> (f64, f64) {
        match self.axis {
            Axis::Horizontal => (self.origin + offset, 0.0),
            Axis::Vertical => (0.0, self.origin + offset),
        }
    }

    async fn drag(&self, delta: f64, duration_ms: f64) -> bool {
        let period_ms = self.period.as_secs_f64() * 1000.0;
        let moves = ((duration_ms / period_ms).ceil() as usize).max(1);

        let (x, y) = self.pointer_at(0.0);
        let handled = self
            .gallery
            .input(PointerEvent::down(x, y, self.reporter.now_ms()));
        let mut last = (x, y);
        for step in 1..=moves {
            self.advance(1).await;
            let offset = delta * step as f64 / moves as f64;
            last = self.pointer_at(offset);
            self.gallery.input(PointerEvent::moved(
                last.0,
                last.1,
                self.reporter.now_ms(),
            ));
        }
        self.gallery
            .input(PointerEvent::up(last.0, last.1, self.reporter.now_ms()));
        handled
    }

    async fn run_step(&self, step: &Step) -> bool {
        match step {
            Step::Next => {
                self.gallery.next();
                true
            }
            Step::Prev => {
                self.gallery.prev();
                true
            }
            Step::GoTo(index) => {
                self.gallery.go_to(*index);
                true
            }
            Step::Key(name) => {
                self.gallery.input(KeyInput::new(Key::from_name(name)))
            }
            Step::Drag { delta, duration_ms } => {
                self.drag(*delta, *duration_ms).await
            }
            Step::Wait(frames) => {
                self.advance(*frames).await;
                true
            }
            Step::Fullscreen => {
                self.gallery.toggle_fullscreen();
                true
            }
            Step::Play => self.gallery.play(),
            Step::Pause => {
                self.gallery.pause();
                true
            }
        }
    }
}

fn load_config(args: &SimulateArgs) -> Result<VentoConfig> {
    let loader = match &args.config {
        Some(path) => ConfigLoader::new()
            .isolated()
            .var(CONFIG_PATH_VAR, path.to_string_lossy()),
        None => ConfigLoader::new(),
    };
    let mut config = loader.load().context("configuration rejected")?.config;

    if args.looping {
        config.gallery.looping = true;
    }
    if let Some(ms) = args.autoplay {
        config.gallery.autoplay_ms = Some(ms);
    }
    if args.script.iter().any(Step::is_drag) && !config.gallery.swipe {
        info!("script drags the stage; enabling swipe");
        config.gallery.swipe = true;
    }
    if args.script.iter().any(Step::is_key) && !config.gallery.keyboard.any() {
        info!("script presses keys; enabling all key bindings");
        config.gallery.keyboard = KeyboardBindings::all();
    }
    Ok(config)
}

fn build_frames(args: &SimulateArgs) -> Vec<Frame> {
    (0..args.frames)
        .map(|i| {
            if args.video_at == Some(i) {
                Frame::video(format!("frame-{i}"), VideoInfo::youtube(format!("clip{i}")))
            } else {
                Frame::image(format!("frame-{i}"), format!("/media/{i}.jpg"))
                    .with_thumb(format!("/media/thumbs/{i}.jpg"))
            }
        })
        .collect()
}

pub async fn run(args: SimulateArgs) -> Result<()> {
    if args.frames == 0 {
        bail!("--frames must be at least 1");
    }
    if args.frame_ms == 0 {
        bail!("--frame-ms must be at least 1");
    }
    let config = load_config(&args)?;
    let period = Duration::from_millis(args.frame_ms);

    let (time_loop, driver) = if args.realtime {
        let scheduler = TokioScheduler::new(Handle::current(), period);
        (TimeLoop::new(scheduler), Driver::Realtime)
    } else {
        let (time_loop, frames) = TimeLoop::manual();
        (time_loop, Driver::Manual(frames))
    };

    // Registered first so every frame sees an up-to-date clock.
    let clock = Arc::new(Mutex::new(Duration::ZERO));
    let clock_guard = {
        let clock = Arc::clone(&clock);
        time_loop.add_guarded(move |dt| *clock.lock() += dt)
    };
    let reporter = Arc::new(Reporter {
        json: args.json,
        clock,
    });

    let sink = |kind: StripKind| -> PaintSink {
        let reporter = Arc::clone(&reporter);
        Arc::new(move |paint: &StripPaint| reporter.paint(kind, paint))
    };

    let mut builder = Gallery::builder("ventoctl", build_frames(&args), &time_loop)
        .options(config.gallery.clone())
        .physics(config.physics)
        .gesture(config.gesture)
        .stage(StripLayout::stage(args.stage_width), Some(sink(StripKind::Stage)));
    if config.gallery.nav == NavKind::Thumbs {
        builder = builder.thumbs(
            StripLayout::new(args.thumb_width, args.thumbs_viewport),
            Some(sink(StripKind::Thumbs)),
        );
    }
    for event in GalleryEvent::ALL {
        if event == GalleryEvent::Change {
            continue;
        }
        let reporter = Arc::clone(&reporter);
        builder = builder.on(
            event,
            Arc::new(move |event: GalleryEvent, state: &GalleryState| {
                reporter.event(event, state)
            }),
        );
    }
    let gallery = builder.build().context("failed to build gallery")?;
    debug!(plugins = ?gallery.plugin_names(), "simulation ready");

    let simulation = Simulation {
        gallery,
        driver,
        period,
        axis: config.gallery.nav_direction,
        origin: args.stage_width / 2.0,
        reporter: Arc::clone(&reporter),
        _clock: clock_guard,
    };

    for step in &args.script {
        let handled = simulation.run_step(step).await;
        reporter.step(step, handled);
        simulation.advance(1).await;
    }
    simulation.advance(args.settle).await;

    reporter.finish(&simulation.gallery);
    Ok(())
}
