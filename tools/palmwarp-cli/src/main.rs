//! PalmWarp CLI — distort images with the hand-slap warp pipeline.
//!
//! Usage:
//!   palmwarp distort <IMAGE> [OPTIONS]   One-shot distortion of a PNG
//!   palmwarp simulate [OPTIONS]          Run a full session over a
//!                                        scripted or recorded stream

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "palmwarp",
    about = "Gesture-driven radial image distortion",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Distort a single image around a focal point
    Distort {
        /// Input image path (any format the image crate decodes)
        image: PathBuf,

        /// Focal center X in pixels
        #[arg(long)]
        center_x: f64,

        /// Focal center Y in pixels
        #[arg(long)]
        center_y: f64,

        /// Apply the slap variant (triple strength, double radius, jitter)
        #[arg(long)]
        slap: bool,

        /// Jitter seed for reproducible slap output
        #[arg(long)]
        seed: Option<u64>,

        /// Output path
        #[arg(short, long, default_value = "distorted.png")]
        output: PathBuf,
    },

    /// Simulate a full effect session over a landmark stream
    Simulate {
        /// Source image; a synthetic test pattern when omitted
        #[arg(long)]
        image: Option<PathBuf>,

        /// Synthetic source width
        #[arg(long, default_value = "640")]
        width: u32,

        /// Synthetic source height
        #[arg(long, default_value = "480")]
        height: u32,

        /// Number of scripted sweep frames
        #[arg(long, default_value = "60")]
        frames: usize,

        /// Frame index at which the scripted hand slaps (jumps)
        #[arg(long)]
        slap_frame: Option<usize>,

        /// Recorded landmark stream (JSONL) instead of the scripted sweep
        #[arg(long)]
        events: Option<PathBuf>,

        /// Slap velocity threshold (pixels/ms); config default when omitted
        #[arg(long)]
        slap_threshold: Option<f64>,

        /// Jitter seed for reproducible output
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Directory for numbered output frames; stats only when omitted
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    let _log_guard = palmwarp_common::logging::init_logging(&palmwarp_common::config::LoggingConfig {
        level: log_level.to_string(),
        json: false,
        file: None,
    });

    match cli.command {
        Commands::Distort {
            image,
            center_x,
            center_y,
            slap,
            seed,
            output,
        } => commands::distort::run(image, center_x, center_y, slap, seed, output),
        Commands::Simulate {
            image,
            width,
            height,
            frames,
            slap_frame,
            events,
            slap_threshold,
            seed,
            out_dir,
        } => {
            commands::simulate::run(
                image,
                width,
                height,
                frames,
                slap_frame,
                events,
                slap_threshold,
                seed,
                out_dir,
            )
            .await
        }
    }
}
