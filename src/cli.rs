use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in scenes selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ScenePreset {
    /// Two diffuse spheres flanking a glass sphere over a ground sphere
    ThreeSpheres,
    /// The randomized book-cover field of ~500 spheres
    Cover,
}

/// Command line arguments structure using clap derive macros
#[derive(Parser)]
#[command(name = "lumapath")]
#[command(about = "A BVH-accelerated path tracer in Rust")]
pub struct Args {
    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Image width in pixels
    #[arg(long, default_value = "400", help = "Image width in pixels")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "300", help = "Image height in pixels")]
    pub height: u32,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value = "100", help = "Number of samples per pixel")]
    pub samples_per_pixel: u32,

    /// Base seed for the per-pixel PRNG streams
    #[arg(long, default_value = "1", help = "Base seed for the per-pixel PRNG streams")]
    pub seed: u64,

    /// Scene to render
    #[arg(long, value_enum, default_value = "three-spheres", help = "Scene to render")]
    pub scene: ScenePreset,

    /// Output file path (.png for 8-bit with gamma correction, .exr for HDR linear)
    #[arg(short, long, default_value = "images/out.png", help = "Output file path (.png for 8-bit with gamma correction, .exr for HDR linear)")]
    pub output: String,
}
