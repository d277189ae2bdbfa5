//! Run a full effect session over a scripted or recorded landmark stream.

use std::path::PathBuf;

use palmwarp_common::clock::SessionClock;
use palmwarp_common::config::AppConfig;
use palmwarp_effect_session::{EffectSession, SessionConfig};
use palmwarp_frame_model::{parse_frames, LandmarkFrame, PixelBuffer, Point2D};
use palmwarp_gesture_core::MotionConfig;
use palmwarp_warp_engine::DistortionConfig;

/// Nominal detection cadence: one event per display refresh at 60 Hz.
const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

#[allow(clippy::too_many_arguments)]
pub async fn run(
    image: Option<PathBuf>,
    width: u32,
    height: u32,
    frames: usize,
    slap_frame: Option<usize>,
    events: Option<PathBuf>,
    slap_threshold: Option<f64>,
    seed: u64,
    out_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let app_config = AppConfig::load();
    let source = match image {
        Some(path) => super::load_buffer(&path)?,
        None => test_pattern(width, height)
            .map_err(|e| anyhow::anyhow!("Failed to build test pattern: {e}"))?,
    };
    println!("Source: {}x{}", source.width(), source.height());

    let mut motion = MotionConfig::from(&app_config.effect);
    if let Some(threshold) = slap_threshold {
        motion.slap_velocity_threshold = threshold;
    }

    let stream = match events {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
            let parsed =
                parse_frames(&content).map_err(|e| anyhow::anyhow!("Bad landmark stream: {e}"))?;
            println!("Loaded {} recorded detections", parsed.len());
            parsed
        }
        None => scripted_sweep(
            source.width(),
            source.height(),
            frames,
            slap_frame,
            motion.slap_velocity_threshold,
        ),
    };

    tracing::debug!(
        detections = stream.len(),
        threshold = motion.slap_velocity_threshold,
        seed,
        "Starting simulated session"
    );

    let mut session = EffectSession::new(SessionConfig {
        motion,
        distortion: DistortionConfig::from(&app_config.effect),
        jitter_seed: Some(seed),
    });
    session
        .capture(source)
        .map_err(|e| anyhow::anyhow!("Capture failed: {e}"))?;

    if let Some(ref dir) = out_dir {
        std::fs::create_dir_all(dir)?;
    }

    let clock = SessionClock::start();
    println!("Session started {}", clock.epoch_wall());

    let mut slaps = 0usize;
    let mut peak_velocity = 0.0f64;

    for (index, frame) in stream.iter().enumerate() {
        let (signal, output) = session
            .process_frame_detailed(frame)
            .map_err(|e| anyhow::anyhow!("Frame {index} failed: {e}"))?;

        if signal.is_slap {
            slaps += 1;
            println!(
                "  frame {index:4}: SLAP at ({:.0}, {:.0}), {:.1} px/ms",
                frame.primary.x, frame.primary.y, signal.velocity
            );
        }
        peak_velocity = peak_velocity.max(signal.velocity);

        if let Some(ref dir) = out_dir {
            let path = dir.join(format!("frame_{index:04}.png"));
            super::save_buffer(&output, &path)?;
        }
    }

    let elapsed_ms = clock.elapsed_ms();
    println!("\nProcessed {} detections in {elapsed_ms:.1} ms", stream.len());
    println!(
        "  Throughput:    {:.0} frames/s",
        stream.len() as f64 / clock.elapsed_secs().max(1e-9)
    );
    println!("  Peak velocity: {peak_velocity:.2} px/ms");
    println!("  Slap frames:   {slaps}");
    if let Some(dir) = out_dir {
        println!("  Frames written to {}", dir.display());
    }

    Ok(())
}

/// Scripted hand path: a steady horizontal sweep, with an optional
/// vertical jump at `slap_frame` fast enough to trip the classifier.
fn scripted_sweep(
    width: u32,
    height: u32,
    frames: usize,
    slap_frame: Option<usize>,
    slap_velocity_threshold: f64,
) -> Vec<LandmarkFrame> {
    let mid_y = height as f64 / 2.0;
    // Comfortably above the threshold over one frame interval.
    let slap_jump = slap_velocity_threshold * FRAME_INTERVAL_MS * 1.5;
    (0..frames)
        .map(|i| {
            let t = if frames > 1 {
                i as f64 / (frames - 1) as f64
            } else {
                0.0
            };
            let x = t * width as f64;
            let y = if Some(i) == slap_frame {
                mid_y + slap_jump
            } else {
                mid_y
            };
            LandmarkFrame::new(i as f64 * FRAME_INTERVAL_MS, Point2D::new(x, y))
        })
        .collect()
}

/// Synthetic grid-on-gradient source so warping is visible in output
/// frames.
fn test_pattern(width: u32, height: u32) -> Result<PixelBuffer, palmwarp_frame_model::FrameError> {
    let mut buffer = PixelBuffer::filled(width, height, [30, 30, 35, 255])?;

    let grid_spacing = 40u32;
    for y in 0..height {
        for x in 0..width {
            let on_grid = x % grid_spacing == 0 || y % grid_spacing == 0;
            if on_grid {
                buffer.set_pixel(x, y, [150, 150, 160, 255]);
            } else {
                let r = (x * 255 / width.max(1)) as u8;
                let g = (y * 255 / height.max(1)) as u8;
                buffer.set_pixel(x, y, [r, g, 90, 255]);
            }
        }
    }

    Ok(buffer)
}
