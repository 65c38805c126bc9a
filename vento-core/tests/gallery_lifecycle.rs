use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use vento_contracts::events::GalleryEvent;
use vento_contracts::gallery::GalleryHandle;
use vento_core::{Gallery, GalleryError, StripLayout, TimeLoop};
use vento_model::{
    Frame, GalleryAction, GalleryOptions, GalleryState, GalleryStatus, Key, KeyInput,
    KeyboardBindings, NavKind, PointerEvent, PointerTarget, VideoInfo,
};

const FRAME: Duration = Duration::from_millis(16);

fn frames(n: usize) -> Vec<Frame> {
    (0..n)
        .map(|i| Frame::image(format!("f{i}"), format!("/img/{i}.jpg")))
        .collect()
}

fn recorder(log: &Arc<Mutex<Vec<GalleryEvent>>>) -> vento_contracts::events::EventHandler {
    let log = Arc::clone(log);
    Arc::new(move |event: GalleryEvent, _: &GalleryState| log.lock().push(event))
}

#[test]
fn construction_requires_mount_and_frames() {
    let (time_loop, _frames) = TimeLoop::manual();
    let err = Gallery::new("  ", frames(2), GalleryOptions::default(), &time_loop)
        .unwrap_err();
    assert_eq!(err, GalleryError::MissingMount);

    let err = Gallery::new("root", Vec::new(), GalleryOptions::default(), &time_loop)
        .unwrap_err();
    assert_eq!(err, GalleryError::NoFrames);
    assert!(time_loop.is_empty());
}

#[test]
fn start_index_is_clamped() {
    let (time_loop, _frames) = TimeLoop::manual();
    let options = GalleryOptions {
        start_index: 40,
        ..Default::default()
    };
    let gallery = Gallery::new("root", frames(4), options, &time_loop).unwrap();
    assert_eq!(gallery.state().current_index, 3);
    assert!(gallery.can_go_prev());
    assert!(!gallery.can_go_next());
}

#[test]
fn ready_and_change_reach_builder_handlers() {
    let (time_loop, _frames) = TimeLoop::manual();
    let log = Arc::new(Mutex::new(Vec::new()));
    let _gallery = Gallery::builder("root", frames(2), &time_loop)
        .on(GalleryEvent::Ready, recorder(&log))
        .on(GalleryEvent::Change, recorder(&log))
        .build()
        .unwrap();
    assert_eq!(*log.lock(), vec![GalleryEvent::Change, GalleryEvent::Ready]);
}

#[test]
fn transition_ends_after_configured_duration() {
    let (time_loop, frames_pump) = TimeLoop::manual();
    let options = GalleryOptions {
        transition_duration_ms: 160,
        ..Default::default()
    };
    let gallery = Gallery::new("root", frames(3), options, &time_loop).unwrap();
    let log = Arc::new(Mutex::new(Vec::new()));
    gallery.on(GalleryEvent::Show, recorder(&log));
    gallery.on(GalleryEvent::ShowEnd, recorder(&log));

    gallery.next();
    assert_eq!(gallery.state().status, GalleryStatus::Transitioning);
    assert_eq!(*log.lock(), vec![GalleryEvent::Show]);

    frames_pump.run(9, FRAME);
    assert_eq!(gallery.state().status, GalleryStatus::Transitioning);
    frames_pump.step(FRAME);
    assert_eq!(gallery.state().status, GalleryStatus::Idle);
    assert_eq!(*log.lock(), vec![GalleryEvent::Show, GalleryEvent::ShowEnd]);

    // Without a stage strip nothing else needs frames.
    assert!(time_loop.is_empty());
}

#[test]
fn change_handler_may_end_the_transition() {
    let (time_loop, frames_pump) = TimeLoop::manual();
    let gallery =
        Gallery::new("root", frames(3), GalleryOptions::default(), &time_loop).unwrap();
    let handle = Arc::downgrade(&gallery.handle());
    gallery.on(
        GalleryEvent::Change,
        Arc::new(move |_: GalleryEvent, state: &GalleryState| {
            if state.status == GalleryStatus::Transitioning
                && let Some(handle) = handle.upgrade()
            {
                handle.dispatch(GalleryAction::EndTransition);
            }
        }),
    );
    let log = Arc::new(Mutex::new(Vec::new()));
    gallery.on(GalleryEvent::ShowEnd, recorder(&log));

    gallery.next();
    assert_eq!(gallery.state().current_index, 1);
    assert_eq!(gallery.state().status, GalleryStatus::Idle);
    assert!(time_loop.is_empty());

    frames_pump.run(60, FRAME);
    assert!(log.lock().is_empty());
    assert_eq!(gallery.state().status, GalleryStatus::Idle);
}

#[test]
fn stage_strip_follows_navigation() {
    let (time_loop, frames_pump) = TimeLoop::manual();
    let gallery = Gallery::builder("root", frames(3), &time_loop)
        .stage(StripLayout::stage(400.0), None)
        .build()
        .unwrap();

    gallery.go_to(2);
    frames_pump.run(600, FRAME);
    assert_eq!(gallery.stage_position(), Some(-800.0));

    gallery.resize_stage(StripLayout::stage(300.0));
    assert_eq!(gallery.stage_position(), Some(-600.0));
}

#[test]
fn thumbs_strip_requires_thumbs_nav() {
    let (time_loop, _frames) = TimeLoop::manual();
    let dots = Gallery::builder("root", frames(12), &time_loop)
        .thumbs(StripLayout::new(80.0, 320.0), None)
        .build()
        .unwrap();
    assert_eq!(dots.thumbs_position(), None);

    let thumbs = Gallery::builder("root", frames(12), &time_loop)
        .options(GalleryOptions {
            nav: NavKind::Thumbs,
            start_index: 11,
            ..Default::default()
        })
        .thumbs(StripLayout::new(80.0, 320.0), None)
        .build()
        .unwrap();
    assert_eq!(thumbs.thumbs_position(), Some(-640.0));
}

#[test]
fn fullscreen_events_fire_on_flag_changes() {
    let (time_loop, _frames) = TimeLoop::manual();
    let gallery =
        Gallery::new("root", frames(2), GalleryOptions::default(), &time_loop).unwrap();
    let log = Arc::new(Mutex::new(Vec::new()));
    gallery.on(GalleryEvent::FullscreenEnter, recorder(&log));
    gallery.on(GalleryEvent::FullscreenExit, recorder(&log));

    gallery.toggle_fullscreen();
    gallery.next();
    gallery.toggle_fullscreen();
    assert_eq!(
        *log.lock(),
        vec![GalleryEvent::FullscreenEnter, GalleryEvent::FullscreenExit]
    );
}

#[test]
fn play_requires_a_video_frame() {
    let (time_loop, _frames) = TimeLoop::manual();
    let mut items = frames(2);
    items.push(Frame::video("clip", VideoInfo::vimeo("76979871")));
    let gallery =
        Gallery::new("root", items, GalleryOptions::default(), &time_loop).unwrap();
    let log = Arc::new(Mutex::new(Vec::new()));
    gallery.on(GalleryEvent::LoadVideo, recorder(&log));
    gallery.on(GalleryEvent::UnloadVideo, recorder(&log));

    assert!(!gallery.play());
    gallery.go_to(2);
    assert!(gallery.play());
    let embed = gallery.active_embed().expect("embed");
    assert_eq!(embed.url, "https://player.vimeo.com/video/76979871");

    gallery.pause();
    assert_eq!(gallery.active_embed(), None);
    assert_eq!(
        *log.lock(),
        vec![GalleryEvent::LoadVideo, GalleryEvent::UnloadVideo]
    );
}

#[test]
fn keyboard_input_is_routed_to_plugin() {
    let (time_loop, _frames) = TimeLoop::manual();
    let options = GalleryOptions {
        keyboard: KeyboardBindings::all(),
        ..Default::default()
    };
    let gallery = Gallery::new("root", frames(5), options, &time_loop).unwrap();
    assert!(gallery.plugin_names().contains(&"keyboard"));

    assert!(gallery.input(KeyInput::new(Key::End)));
    assert_eq!(gallery.state().current_index, 4);
    assert!(!gallery.input(KeyInput::new(Key::Home).in_editable()));
    assert_eq!(gallery.state().current_index, 4);
}

#[test]
fn swipe_on_stage_navigates() {
    let (time_loop, _frames) = TimeLoop::manual();
    let options = GalleryOptions {
        swipe: true,
        ..Default::default()
    };
    let gallery = Gallery::builder("root", frames(3), &time_loop)
        .options(options)
        .stage(StripLayout::stage(500.0), None)
        .build()
        .unwrap();

    gallery.input(PointerEvent::down(400.0, 10.0, 0.0));
    gallery.input(PointerEvent::moved(380.0, 10.0, 40.0));
    assert_eq!(gallery.state().status, GalleryStatus::Dragging);
    assert_eq!(gallery.stage_position(), Some(-20.0));
    gallery.input(PointerEvent::moved(300.0, 10.0, 120.0));
    gallery.input(PointerEvent::up(300.0, 10.0, 120.0));

    assert_eq!(gallery.state().current_index, 1);
    assert_eq!(gallery.state().status, GalleryStatus::Transitioning);
}

#[test]
fn dragging_thumbs_scrolls_the_strip_and_picks_a_frame() {
    let (time_loop, _frames) = TimeLoop::manual();
    let options = GalleryOptions {
        nav: NavKind::Thumbs,
        swipe: true,
        ..Default::default()
    };
    let gallery = Gallery::builder("root", frames(12), &time_loop)
        .options(options)
        .stage(StripLayout::stage(400.0), None)
        .thumbs(StripLayout::new(80.0, 320.0), None)
        .build()
        .unwrap();
    assert!(gallery.plugin_names().contains(&"thumbs-touch"));
    assert!(gallery.thumbs_physics().is_some());
    let on_thumbs = |event: PointerEvent| event.with_target(PointerTarget::Thumbs);

    assert!(gallery.input(on_thumbs(PointerEvent::down(300.0, 0.0, 0.0))));
    gallery.input(on_thumbs(PointerEvent::moved(290.0, 0.0, 100.0)));
    gallery.input(on_thumbs(PointerEvent::moved(110.0, 0.0, 2000.0)));
    assert_eq!(gallery.state().status, GalleryStatus::Dragging);
    assert_eq!(gallery.thumbs_position(), Some(-190.0));
    assert_eq!(gallery.stage_position(), Some(0.0));

    gallery.input(on_thumbs(PointerEvent::up(110.0, 0.0, 2000.0)));
    assert_eq!(gallery.state().current_index, 2);
    assert_eq!(gallery.state().status, GalleryStatus::Transitioning);
}

#[test]
fn autoplay_advances_and_can_pause() {
    let (time_loop, frames_pump) = TimeLoop::manual();
    let options = GalleryOptions {
        autoplay_ms: Some(320),
        transition_duration_ms: 160,
        looping: true,
        ..Default::default()
    };
    let gallery = Gallery::new("root", frames(3), options, &time_loop).unwrap();
    let control = gallery.autoplay().expect("autoplay configured").clone();

    frames_pump.run(21, FRAME);
    assert_eq!(gallery.state().current_index, 1);

    control.pause();
    frames_pump.run(200, FRAME);
    assert_eq!(gallery.state().current_index, 1);
    assert_eq!(gallery.state().status, GalleryStatus::Idle);
}

#[test]
fn destroy_is_idempotent_and_releases_the_loop() {
    let (time_loop, frames_pump) = TimeLoop::manual();
    let options = GalleryOptions {
        autoplay_ms: Some(1_000),
        ..Default::default()
    };
    let gallery = Gallery::builder("root", frames(3), &time_loop)
        .options(options)
        .stage(StripLayout::stage(500.0), None)
        .build()
        .unwrap();
    let log = Arc::new(Mutex::new(Vec::new()));
    gallery.on(GalleryEvent::Change, recorder(&log));
    gallery.next();
    assert!(!time_loop.is_empty());

    gallery.destroy();
    gallery.destroy();
    assert!(gallery.is_destroyed());
    assert!(time_loop.is_empty());
    assert!(!frames_pump.is_scheduled());
    assert!(gallery.plugin_names().is_empty());

    log.lock().clear();
    gallery.next();
    assert!(log.lock().is_empty());
}

#[test]
fn two_galleries_share_one_loop() {
    let (time_loop, frames_pump) = TimeLoop::manual();
    let a = Gallery::builder("a", frames(3), &time_loop)
        .stage(StripLayout::stage(100.0), None)
        .build()
        .unwrap();
    let b = Gallery::builder("b", frames(3), &time_loop)
        .stage(StripLayout::stage(200.0), None)
        .build()
        .unwrap();
    assert_eq!(time_loop.len(), 2);

    a.next();
    b.go_to(2);
    frames_pump.run(600, FRAME);
    assert_eq!(a.stage_position(), Some(-100.0));
    assert_eq!(b.stage_position(), Some(-400.0));

    drop(a);
    assert_eq!(time_loop.len(), 1);
    drop(b);
    assert!(!time_loop.is_running());
}
