//! One-shot distortion of a single image.

use std::path::PathBuf;

use palmwarp_frame_model::Point2D;
use palmwarp_gesture_core::GestureSignal;
use palmwarp_warp_engine::{DistortionCompositor, DistortionConfig};

pub fn run(
    image: PathBuf,
    center_x: f64,
    center_y: f64,
    slap: bool,
    seed: Option<u64>,
    output: PathBuf,
) -> anyhow::Result<()> {
    let source = super::load_buffer(&image)?;
    println!(
        "Loaded {} ({}x{})",
        image.display(),
        source.width(),
        source.height()
    );

    let mut compositor = match seed {
        Some(seed) => DistortionCompositor::seeded(DistortionConfig::default(), seed),
        None => DistortionCompositor::with_defaults(),
    };

    let signal = GestureSignal {
        velocity: 0.0,
        is_slap: slap,
    };
    let center = Point2D::new(center_x, center_y);

    let distorted = compositor
        .distort(&source, center, &signal)
        .map_err(|e| anyhow::anyhow!("Distortion failed: {e}"))?;

    super::save_buffer(&distorted, &output)?;
    println!(
        "Wrote {} (center ({center_x}, {center_y}), slap: {slap})",
        output.display()
    );

    Ok(())
}
