use proptest::prelude::*;
use tradeoff_chart::core::{LinearScale, PixelRange};
use tradeoff_chart::render::{
    Color, EllipsePrimitive, SketchParams, apply_sketch, segmentize,
};

proptest! {
    #[test]
    fn sketch_displacement_never_exceeds_scale(
        x1 in -500.0f64..500.0,
        y1 in -500.0f64..500.0,
        scale in 0.0f64..5.0,
        length in 1.0f64..200.0,
        randomness in 0.5f64..4.0
    ) {
        let points = segmentize(&[(0.0, 0.0), (x1, y1)], 1.0);
        let sketched = apply_sketch(&points, SketchParams::new(scale, length, randomness));

        prop_assert_eq!(sketched.len(), points.len());
        prop_assert_eq!(sketched[0], points[0]);
        for (orig, moved) in points.iter().zip(&sketched) {
            prop_assert!((orig.0 - moved.0).hypot(orig.1 - moved.1) <= scale + 1e-9);
        }
    }

    #[test]
    fn sketch_is_deterministic(
        rx in 1.0f64..300.0,
        ry in 1.0f64..300.0,
        randomness in 1.0f64..4.0
    ) {
        let ellipse = EllipsePrimitive::new("r", 0.0, 0.0, rx, ry, Color::WHITE)
            .with_sketch(SketchParams::new(1.0, 100.0, randomness));
        prop_assert_eq!(ellipse.outline(), ellipse.outline());
    }

    #[test]
    fn scale_round_trip_within_tolerance(
        start in -1_000.0f64..1_000.0,
        span in 0.01f64..1_000.0,
        t in 0.0f64..1.0,
        px_start in 0.0f64..500.0,
        px_span in -1_000.0f64..1_000.0
    ) {
        prop_assume!(px_span.abs() > 1.0);
        let scale = LinearScale::new(start, start + span).expect("valid scale");
        let range = PixelRange::new(px_start, px_start + px_span);

        let value = start + t * span;
        let px = scale.domain_to_pixel(value, range).expect("to pixel");
        let recovered = scale.pixel_to_domain(px, range).expect("from pixel");

        prop_assert!((recovered - value).abs() <= 1e-6 * span.max(1.0) + 1e-9 * value.abs());
    }
}
