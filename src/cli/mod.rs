//! Command-line interface implementation
//!
//! This module parses arguments, sets up logging and dispatches to the
//! upscale command.

mod upscale;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Anime4K - upscale an image and sharpen its lines with push kernels
#[derive(Parser, Debug)]
#[command(name = "anime4k")]
#[command(about = "Anime4K - upscale line art with a bicubic resize and edge-directed push kernels")]
#[command(version)]
pub struct Cli {
    /// Input image (any format the image crate can decode)
    pub input: PathBuf,

    /// Output image; the format follows the extension and alpha is dropped
    pub output: PathBuf,

    /// Scale factor (default: 2.0, or the config file value)
    #[arg(short, long)]
    pub scale: Option<f32>,

    /// Color push strength, 1.0 = full (default: scale / 6)
    #[arg(long)]
    pub push_strength: Option<f32>,

    /// Gradient push strength, 1.0 = full (default: scale / 2)
    #[arg(long)]
    pub push_grad_strength: Option<f32>,

    /// Worker threads (0 = one per core)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Config file (default: anime4k.toml found from the working directory up)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the resized image and every stage's output into this directory
    #[arg(long)]
    pub dump_stages: Option<PathBuf>,

    /// Print a JSON report instead of the plain summary
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Set up `env_logger`. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env).format_timestamp_millis().try_init();
}

/// Parse arguments and run.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    upscale::run_upscale(&cli)
}
