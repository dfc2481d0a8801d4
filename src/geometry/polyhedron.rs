use glam::Vec3;

use super::Geometry;

const PHI: f32 = 1.618_034;

/// Projects every face of a base polyhedron onto a sphere of `radius`.
///
/// The result is non-indexed with flat normals. Each face `(a, b, c)` is
/// emitted as `(b, c, a)`, which is the order an undivided face comes out of
/// the usual subdivision walk.
fn polyhedron(vertices: &[[f32; 3]], faces: &[[usize; 3]], radius: f32) -> Geometry {
    let project = |i: usize| (Vec3::from_array(vertices[i]).normalize() * radius).to_array();

    let positions = faces
        .iter()
        .flat_map(|&[a, b, c]| [project(b), project(c), project(a)])
        .collect();

    Geometry::from_triangles(positions)
}

pub fn icosahedron(radius: f32) -> Geometry {
    let t = PHI;
    let vertices = [
        [-1.0, t, 0.0],
        [1.0, t, 0.0],
        [-1.0, -t, 0.0],
        [1.0, -t, 0.0],
        [0.0, -1.0, t],
        [0.0, 1.0, t],
        [0.0, -1.0, -t],
        [0.0, 1.0, -t],
        [t, 0.0, -1.0],
        [t, 0.0, 1.0],
        [-t, 0.0, -1.0],
        [-t, 0.0, 1.0],
    ];
    let faces = [
        [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
        [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
        [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
        [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
    ];

    polyhedron(&vertices, &faces, radius)
}

pub fn dodecahedron(radius: f32) -> Geometry {
    let t = PHI;
    let r = 1.0 / t;
    let vertices = [
        // (±1, ±1, ±1)
        [-1.0, -1.0, -1.0],
        [-1.0, -1.0, 1.0],
        [-1.0, 1.0, -1.0],
        [-1.0, 1.0, 1.0],
        [1.0, -1.0, -1.0],
        [1.0, -1.0, 1.0],
        [1.0, 1.0, -1.0],
        [1.0, 1.0, 1.0],
        // (0, ±1/φ, ±φ)
        [0.0, -r, -t],
        [0.0, -r, t],
        [0.0, r, -t],
        [0.0, r, t],
        // (±1/φ, ±φ, 0)
        [-r, -t, 0.0],
        [-r, t, 0.0],
        [r, -t, 0.0],
        [r, t, 0.0],
        // (±φ, 0, ±1/φ)
        [-t, 0.0, -r],
        [t, 0.0, -r],
        [-t, 0.0, r],
        [t, 0.0, r],
    ];
    // twelve pentagons, three triangles each
    let faces = [
        [3, 11, 7], [3, 7, 15], [3, 15, 13],
        [7, 19, 17], [7, 17, 6], [7, 6, 15],
        [17, 4, 8], [17, 8, 10], [17, 10, 6],
        [8, 0, 16], [8, 16, 2], [8, 2, 10],
        [0, 12, 1], [0, 1, 18], [0, 18, 16],
        [6, 10, 2], [6, 2, 13], [6, 13, 15],
        [2, 16, 18], [2, 18, 3], [2, 3, 13],
        [18, 1, 9], [18, 9, 11], [18, 11, 3],
        [4, 14, 12], [4, 12, 0], [4, 0, 8],
        [11, 9, 5], [11, 5, 19], [11, 19, 7],
        [19, 5, 14], [19, 14, 4], [19, 4, 17],
        [1, 12, 14], [1, 14, 5], [1, 5, 9],
    ];

    polyhedron(&vertices, &faces, radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_on_sphere(geometry: &Geometry, radius: f32) {
        for p in geometry.positions() {
            assert!((Vec3::from_array(*p).length() - radius).abs() < 1e-5);
        }
    }

    fn assert_faces_outward(geometry: &Geometry) {
        for (tri, normals) in geometry
            .positions()
            .chunks_exact(3)
            .zip(geometry.normals().chunks_exact(3))
        {
            let centroid = tri.iter().map(|p| Vec3::from_array(*p)).sum::<Vec3>() / 3.0;
            let normal = Vec3::from_array(normals[0]);
            assert!(normal.dot(centroid) > 0.0);
        }
    }

    #[test]
    fn test_icosahedron() {
        let geometry = icosahedron(1.0);
        assert_eq!(geometry.vertex_count(), 60);
        assert!(geometry.indices().is_none());
        assert_on_sphere(&geometry, 1.0);
        assert_faces_outward(&geometry);
    }

    #[test]
    fn test_dodecahedron() {
        let geometry = dodecahedron(2.0);
        assert_eq!(geometry.vertex_count(), 108);
        assert_on_sphere(&geometry, 2.0);
        assert_faces_outward(&geometry);
    }

    #[test]
    fn test_face_vertex_order() {
        let geometry = icosahedron(1.0);
        let t = PHI;
        let first_face_b = Vec3::new(-t, 0.0, 1.0).normalize();
        assert!(Vec3::from_array(geometry.positions()[0]).abs_diff_eq(first_face_b, 1e-6));
    }
}
