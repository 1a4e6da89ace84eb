use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use eframe::egui;

use splashwalls::app::SplashWallsApp;
use splashwalls::config::{ViewerConfig, NUM_WALLPAPERS};
use splashwalls::gesture::{DOUBLE_TAP_DELAY_MS, DOUBLE_TAP_RADIUS};
use splashwalls::image_utils::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Shows a few random wallpapers; double tap one to save it"
)]
struct Args {
    /// Directory that contains the wallpapers to pick from
    #[arg(value_name = "DIRECTORY")]
    directory: PathBuf,

    /// How many wallpapers to show per reload
    #[arg(short = 'n', long, default_value_t = NUM_WALLPAPERS)]
    count: usize,

    /// Directory that saved wallpapers are written to
    #[arg(short, long, default_value = "camera-roll")]
    library: PathBuf,

    /// Output format for saved wallpapers
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Jpg)]
    format: OutputFormat,

    /// Quality of saved wallpapers (1-100)
    #[arg(short, long, default_value_t = 90)]
    quality: u8,

    /// Recurse into subdirectories to find images (disabled by default)
    #[arg(short = 'r', long = "recursive", default_value_t = false)]
    recursive: bool,

    /// Glob of paths to skip, relative to DIRECTORY (repeatable)
    #[arg(short = 'x', long = "exclude", value_name = "GLOB")]
    exclude: Vec<String>,

    /// Longest gap between two taps of a double tap, in milliseconds
    #[arg(long, default_value_t = DOUBLE_TAP_DELAY_MS)]
    double_tap_delay: i64,

    /// Farthest two taps of a double tap may be apart, in points
    #[arg(long, default_value_t = DOUBLE_TAP_RADIUS)]
    double_tap_radius: f32,

    /// Seed for picking wallpapers, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

impl From<Args> for ViewerConfig {
    fn from(args: Args) -> Self {
        Self {
            directory: args.directory,
            recursive: args.recursive,
            exclude: args.exclude,
            count: args.count,
            library: args.library,
            format: args.format,
            quality: args.quality,
            double_tap_delay_ms: args.double_tap_delay,
            double_tap_radius: args.double_tap_radius,
            seed: args.seed,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ViewerConfig::from(Args::parse());
    log::info!(
        "showing {} wallpapers from {}, saving to {}",
        config.count,
        config.directory.display(),
        config.library.display()
    );

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([480.0, 854.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SplashWalls",
        native_options,
        Box::new(move |_cc| Ok(Box::new(SplashWallsApp::new(config)?))),
    )?;

    Ok(())
}
