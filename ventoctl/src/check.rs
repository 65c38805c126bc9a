use anyhow::{Context, Result};
use vento_config::loader::CONFIG_PATH_VAR;
use vento_config::{ConfigLoad, ConfigLoader, VentoConfig};

use crate::cli::CheckArgs;

pub fn run(args: CheckArgs) -> Result<()> {
    let loader = match &args.path {
        Some(path) => ConfigLoader::new()
            .isolated()
            .var(CONFIG_PATH_VAR, path.to_string_lossy()),
        None => ConfigLoader::new(),
    };
    let ConfigLoad {
        config,
        source,
        warnings,
    } = loader.load().context("configuration rejected")?;

    println!("config: {source}");
    print_summary(&config);
    for warning in &warnings.items {
        match &warning.hint {
            Some(hint) => println!("warning: {} (hint: {hint})", warning.message),
            None => println!("warning: {}", warning.message),
        }
    }

    if args.print {
        let rendered = toml::to_string_pretty(&config)
            .context("failed to render configuration as TOML")?;
        println!();
        print!("{rendered}");
    }

    println!("ok");
    Ok(())
}

fn print_summary(config: &VentoConfig) {
    let gallery = &config.gallery;
    let autoplay = gallery
        .autoplay_interval()
        .map(|interval| format!("{}ms", interval.as_millis()))
        .unwrap_or_else(|| "off".to_string());
    println!(
        "gallery: loop={} transition={:?} duration={}ms autoplay={autoplay} nav={:?} swipe={}",
        gallery.looping,
        gallery.transition,
        gallery.transition_duration_ms,
        gallery.nav,
        gallery.swipe,
    );
    let physics = &config.physics;
    println!(
        "physics: snap friction={} spring={} | free_scroll friction={} spring={}",
        physics.snap.friction,
        physics.snap.spring,
        physics.free_scroll.friction,
        physics.free_scroll.spring,
    );
    let gesture = &config.gesture;
    println!(
        "gesture: move_threshold={}px swipe_distance={}px swipe_speed={}px/ms release_scale={}",
        gesture.move_threshold,
        gesture.swipe_distance,
        gesture.swipe_speed,
        gesture.release_scale,
    );
}
