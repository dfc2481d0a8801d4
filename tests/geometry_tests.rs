use shape_viewer::geometry::{create_geometry, triangle};
use shape_viewer::ShapeType;

#[cfg(test)]
mod factory_tests {
    use super::*;

    #[test]
    fn test_every_shape_has_positions() {
        for shape in ShapeType::ALL {
            let geometry = create_geometry(&shape);
            assert!(geometry.vertex_count() > 0, "{} should not be empty", shape);
            assert_eq!(
                geometry.normals().len(),
                geometry.vertex_count(),
                "{} should have one normal per vertex",
                shape
            );
            assert!(geometry.triangle_count() > 0, "{} should have faces", shape);
        }
    }

    #[test]
    fn test_unknown_shape_is_default_cube() {
        let fallback = create_geometry(&ShapeType::parse("hexagon"));
        assert_eq!(fallback, create_geometry(&ShapeType::Cube));
    }

    #[test]
    fn test_vertex_counts() {
        let expected = [
            (ShapeType::Cube, 24),
            (ShapeType::Sphere, 33 * 33),
            (ShapeType::Cone, 33 * 2 + 32 + 33),
            (ShapeType::Torus, 17 * 101),
            (ShapeType::Cylinder, 33 * 2 + 2 * (32 + 33)),
            (ShapeType::Dodecahedron, 108),
            (ShapeType::Icosahedron, 60),
            (ShapeType::Plane, 4),
            (ShapeType::Triangle, 3),
        ];

        for (shape, count) in expected {
            assert_eq!(create_geometry(&shape).vertex_count(), count, "vertex count of {}", shape);
        }
    }

    #[test]
    fn test_indices_stay_in_range() {
        for shape in ShapeType::ALL {
            let geometry = create_geometry(&shape);
            if let Some(indices) = geometry.indices() {
                assert_eq!(indices.len() % 3, 0);
                assert!(
                    indices.iter().all(|&i| (i as usize) < geometry.vertex_count()),
                    "{} has an out-of-range index",
                    shape
                );
            }
        }
    }

    #[test]
    fn test_shapes_fit_expected_bounds() {
        let max_extent = |shape: ShapeType| {
            create_geometry(&shape)
                .positions()
                .iter()
                .flat_map(|p| p.iter().map(|c| c.abs()))
                .fold(0.0_f32, f32::max)
        };

        assert!((max_extent(ShapeType::Cube) - 0.5).abs() < 1e-6);
        assert!((max_extent(ShapeType::Plane) - 0.5).abs() < 1e-6);
        assert!((max_extent(ShapeType::Sphere) - 1.0).abs() < 1e-5);
        assert!((max_extent(ShapeType::Torus) - 1.4).abs() < 1e-5);
        assert!((max_extent(ShapeType::Cylinder) - 1.0).abs() < 1e-5);
    }
}

#[cfg(test)]
mod triangle_tests {
    use super::*;

    #[test]
    fn test_triangle_positions() {
        let geometry = triangle();
        assert_eq!(
            geometry.positions(),
            &[[0.0, 1.0, 0.0], [-1.0, -1.0, 1.0], [1.0, -1.0, -1.0]]
        );
        assert!(geometry.indices().is_none());
    }

    #[test]
    fn test_triangle_shares_one_face_normal() {
        let geometry = triangle();
        let normals = geometry.normals();
        assert_eq!(normals[0], normals[1]);
        assert_eq!(normals[1], normals[2]);

        let length = normals[0].iter().map(|c| c * c).sum::<f32>().sqrt();
        assert!((length - 1.0).abs() < 1e-6);
    }
}
