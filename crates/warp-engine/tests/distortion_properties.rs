//! Property tests for the distortion pass invariants.

use proptest::prelude::*;

use palmwarp_frame_model::{PixelBuffer, Point2D};
use palmwarp_gesture_core::GestureSignal;
use palmwarp_warp_engine::{DistortionCompositor, DistortionConfig, DistortionParams};

fn gradient_buffer(width: u32, height: u32) -> PixelBuffer {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&[(x * 7 % 256) as u8, (y * 13 % 256) as u8, 77, 255]);
        }
    }
    PixelBuffer::from_raw(width, height, data).unwrap()
}

fn still() -> GestureSignal {
    GestureSignal {
        velocity: 0.0,
        is_slap: false,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Output dimensions always equal input dimensions, and every pixel
    /// at or beyond the field radius equals the source exactly.
    #[test]
    fn prop_identity_outside_radius(
        width in 8u32..96,
        height in 8u32..96,
        cx in -50.0f64..150.0,
        cy in -50.0f64..150.0,
        slap in any::<bool>(),
    ) {
        let source = gradient_buffer(width, height);
        let signal = GestureSignal { velocity: if slap { 99.0 } else { 0.0 }, is_slap: slap };
        let params = DistortionParams::derive(&DistortionConfig::default(), width, height, &signal);

        let mut compositor = DistortionCompositor::seeded(DistortionConfig::default(), 7);
        let center = Point2D::new(cx, cy);
        let out = compositor.distort(&source, center, &signal).unwrap();

        prop_assert_eq!(out.width(), width);
        prop_assert_eq!(out.height(), height);

        for y in 0..height {
            for x in 0..width {
                let distance = (x as f64 - cx).hypot(y as f64 - cy);
                if distance >= params.radius {
                    prop_assert_eq!(out.pixel(x, y), source.pixel(x, y));
                }
            }
        }
    }

    /// Non-slap output is a pure function of its inputs.
    #[test]
    fn prop_non_slap_deterministic(
        width in 8u32..64,
        height in 8u32..64,
        cx in 0.0f64..64.0,
        cy in 0.0f64..64.0,
    ) {
        let source = gradient_buffer(width, height);
        let center = Point2D::new(cx, cy);

        let mut a = DistortionCompositor::with_defaults();
        let mut b = DistortionCompositor::with_defaults();
        let out_a = a.distort(&source, center, &still()).unwrap();
        let out_b = b.distort(&source, center, &still()).unwrap();
        prop_assert_eq!(out_a.data(), out_b.data());
    }
}

#[test]
fn boundary_pixel_is_continuous_with_far_field() {
    // Center at (0, 0) on a 100x100 buffer: radius is exactly 20, so
    // the pixel at (20, 0) sits on the boundary and must be untouched.
    let source = gradient_buffer(100, 100);
    let mut compositor = DistortionCompositor::with_defaults();
    let out = compositor
        .distort(&source, Point2D::new(0.0, 0.0), &still())
        .unwrap();

    assert_eq!(out.pixel(20, 0), source.pixel(20, 0));
    assert_eq!(out.pixel(0, 20), source.pixel(0, 20));
}

#[test]
fn every_destination_pixel_is_written_or_defaulted() {
    // A slap at the image corner pushes samples off the buffer; those
    // destination pixels must be transparent black, nothing else.
    let source = PixelBuffer::filled(50, 50, [255, 255, 255, 255]).unwrap();
    let mut compositor = DistortionCompositor::seeded(DistortionConfig::default(), 3);
    let signal = GestureSignal {
        velocity: 120.0,
        is_slap: true,
    };
    let out = compositor
        .distort(&source, Point2D::new(49.0, 49.0), &signal)
        .unwrap();

    for y in 0..50 {
        for x in 0..50 {
            let pixel = out.pixel(x, y).unwrap();
            assert!(
                pixel == [255, 255, 255, 255] || pixel == [0, 0, 0, 0],
                "pixel ({x},{y}) is {pixel:?}, neither a source copy nor the default"
            );
        }
    }
}
