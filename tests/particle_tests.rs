use std::sync::Arc;

use shape_viewer::geometry::create_geometry;
use shape_viewer::particles::{project, ColorBuffer};
use shape_viewer::ShapeType;

fn assert_rgb_near(actual: [f32; 3], expected: [f32; 3]) {
    for (a, e) in actual.iter().zip(expected.iter()) {
        assert!((a - e).abs() < 1e-5, "expected {:?}, got {:?}", expected, actual);
    }
}

#[cfg(test)]
mod projection_tests {
    use super::*;

    #[test]
    fn test_color_buffer_matches_vertex_count() {
        for shape in ShapeType::ALL {
            let geometry = create_geometry(&shape);
            let points = project(&geometry);

            assert_eq!(points.len(), geometry.vertex_count());
            assert_eq!(points.colors.as_slice().len(), 3 * geometry.vertex_count());
            assert!(
                points.colors.as_slice().iter().all(|c| (0.0..=1.0).contains(c)),
                "{} has a color component outside [0, 1]",
                shape
            );
        }
    }

    #[test]
    fn test_positions_are_shared_with_geometry() {
        let geometry = create_geometry(&ShapeType::Sphere);
        let points = project(&geometry);

        assert!(Arc::ptr_eq(&geometry.shared_positions(), &points.shared_positions()));
        assert_eq!(points.positions(), geometry.positions());
    }

    #[test]
    fn test_triangle_gets_red_green_blue() {
        let points = project(&create_geometry(&ShapeType::Triangle));

        assert_eq!(points.len(), 3);
        assert_rgb_near(points.colors.get(0), [1.0, 0.0, 0.0]);
        assert_rgb_near(points.colors.get(1), [0.0, 1.0, 0.0]);
        assert_rgb_near(points.colors.get(2), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_gradient_starts_at_red() {
        let points = project(&create_geometry(&ShapeType::Torus));
        assert_rgb_near(points.colors.get(0), [1.0, 0.0, 0.0]);
    }
}

#[cfg(test)]
mod rainbow_tests {
    use super::*;

    #[test]
    fn test_phase_shifts_every_hue() {
        let mut colors = ColorBuffer::new(2);
        colors.fill_rainbow(0.5);

        // hues 0.5 and 0.0
        assert_rgb_near(colors.get(0), [0.0, 1.0, 1.0]);
        assert_rgb_near(colors.get(1), [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_large_phase_wraps() {
        let mut wrapped = ColorBuffer::new(4);
        let mut plain = ColorBuffer::new(4);

        // wall-clock millis scaled by the hue speed, plus a quarter turn
        wrapped.fill_rainbow(1_700_000_000_000.0 * 0.0001 + 0.25);
        plain.fill_rainbow(0.25);

        for i in 0..4 {
            assert_rgb_near(wrapped.get(i), plain.get(i));
        }
    }

    #[test]
    fn test_fill_does_not_bump_version() {
        let mut colors = ColorBuffer::new(3);
        let version = colors.version();
        colors.fill_rainbow(0.1);
        assert_eq!(colors.version(), version);

        colors.mark_needs_update();
        assert_ne!(colors.version(), version);
    }
}
