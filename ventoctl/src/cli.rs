use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::script::Step;

#[derive(Parser, Debug)]
#[command(
    name = "ventoctl",
    version,
    about = "Validate Vento configuration and drive headless galleries"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a configuration file and summarize the resolved settings
    Check(CheckArgs),
    /// Run a scripted gallery on a virtual clock and print strip positions
    /// for every painted tick
    Simulate(SimulateArgs),
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Config file (TOML or JSON). Resolved from $VENTO_CONFIG_PATH,
    /// $VENTO_CONFIG_JSON or ./vento.toml when omitted.
    pub path: Option<PathBuf>,

    /// Print the fully resolved configuration as TOML
    #[arg(long)]
    pub print: bool,
}

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Config file; defaults to the usual resolution order
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of synthetic image frames
    #[arg(long, default_value_t = 5)]
    pub frames: usize,

    /// Turn the frame at this index into a video
    #[arg(long)]
    pub video_at: Option<usize>,

    /// Stage viewport width (one frame per viewport), px
    #[arg(long, default_value_t = 800.0)]
    pub stage_width: f64,

    /// Thumbnail width, px. Only used with `nav = "thumbs"`.
    #[arg(long, default_value_t = 120.0)]
    pub thumb_width: f64,

    /// Thumbnail strip viewport width, px
    #[arg(long, default_value_t = 480.0)]
    pub thumbs_viewport: f64,

    /// Wrap around at the ends, overriding the config
    #[arg(long = "loop")]
    pub looping: bool,

    /// Autoplay interval in ms, overriding the config
    #[arg(long)]
    pub autoplay: Option<u64>,

    /// Comma separated steps: next, prev, goto:N, key:NAME, drag:DX:MS,
    /// wait:N, fullscreen, play, pause
    #[arg(long, value_delimiter = ',')]
    pub script: Vec<Step>,

    /// Frames to run after the script so motion can settle
    #[arg(long, default_value_t = 120)]
    pub settle: usize,

    /// Frame period in ms
    #[arg(long, default_value_t = 16)]
    pub frame_ms: u64,

    /// Drive the loop from a wall-clock timer instead of the virtual clock
    #[arg(long)]
    pub realtime: bool,

    /// Emit one JSON object per line
    #[arg(long)]
    pub json: bool,
}
