use std::f32::consts::{PI, TAU};

use glam::Vec3;

use super::Geometry;

/// Accumulates vertex attributes and indices while a primitive is built
#[derive(Default)]
struct Builder {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    indices: Vec<u32>,
}

impl Builder {
    fn push_vertex(&mut self, position: Vec3, normal: Vec3) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position.to_array());
        self.normals.push(normal.to_array());
        index
    }

    fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    fn next_index(&self) -> u32 {
        self.positions.len() as u32
    }

    fn build(self) -> Geometry {
        Geometry::new(self.positions, self.normals, Some(self.indices))
    }
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
    Z,
}

fn set_axis(v: &mut Vec3, axis: Axis, value: f32) {
    match axis {
        Axis::X => v.x = value,
        Axis::Y => v.y = value,
        Axis::Z => v.z = value,
    }
}

/// Box with one segment per side, four vertices per face
pub fn cuboid(width: f32, height: f32, depth: f32) -> Geometry {
    let mut builder = Builder::default();

    // (u, v, w, u_dir, v_dir, face width, face height, face depth)
    let faces = [
        (Axis::Z, Axis::Y, Axis::X, -1.0, -1.0, depth, height, width),
        (Axis::Z, Axis::Y, Axis::X, 1.0, -1.0, depth, height, -width),
        (Axis::X, Axis::Z, Axis::Y, 1.0, 1.0, width, depth, height),
        (Axis::X, Axis::Z, Axis::Y, 1.0, -1.0, width, depth, -height),
        (Axis::X, Axis::Y, Axis::Z, 1.0, -1.0, width, height, depth),
        (Axis::X, Axis::Y, Axis::Z, -1.0, -1.0, width, height, -depth),
    ];

    for (u, v, w, u_dir, v_dir, face_width, face_height, face_depth) in faces {
        let start = builder.next_index();
        let normal_sign = if face_depth > 0.0 { 1.0 } else { -1.0 };

        for iy in 0..=1u32 {
            let y = iy as f32 * face_height - face_height * 0.5;
            for ix in 0..=1u32 {
                let x = ix as f32 * face_width - face_width * 0.5;

                let mut position = Vec3::ZERO;
                set_axis(&mut position, u, x * u_dir);
                set_axis(&mut position, v, y * v_dir);
                set_axis(&mut position, w, face_depth * 0.5);

                let mut normal = Vec3::ZERO;
                set_axis(&mut normal, w, normal_sign);

                builder.push_vertex(position, normal);
            }
        }

        let a = start;
        let b = start + 2;
        let c = start + 3;
        let d = start + 1;
        builder.push_triangle(a, b, d);
        builder.push_triangle(b, c, d);
    }

    builder.build()
}

/// UV sphere; the poles and the seam are duplicated per segment
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Geometry {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);
    let mut builder = Builder::default();
    let mut grid = Vec::with_capacity(height_segments as usize + 1);

    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        let theta = v * PI;
        let mut row = Vec::with_capacity(width_segments as usize + 1);

        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let phi = u * TAU;

            let position = Vec3::new(
                -radius * phi.cos() * theta.sin(),
                radius * theta.cos(),
                radius * phi.sin() * theta.sin(),
            );
            row.push(builder.push_vertex(position, position.normalize_or_zero()));
        }
        grid.push(row);
    }

    for iy in 0..height_segments as usize {
        for ix in 0..width_segments as usize {
            let a = grid[iy][ix + 1];
            let b = grid[iy][ix];
            let c = grid[iy + 1][ix];
            let d = grid[iy + 1][ix + 1];

            if iy != 0 {
                builder.push_triangle(a, b, d);
            }
            if iy != height_segments as usize - 1 {
                builder.push_triangle(b, c, d);
            }
        }
    }

    builder.build()
}

/// Cylinder or truncated cone with a single height segment and closed caps
pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Geometry {
    let radial_segments = radial_segments.max(3);
    let half_height = height * 0.5;
    let slope = (radius_bottom - radius_top) / height;
    let mut builder = Builder::default();

    let mut rows = Vec::with_capacity(2);
    for y in 0..=1u32 {
        let v = y as f32;
        let radius = v * (radius_bottom - radius_top) + radius_top;
        let mut row = Vec::with_capacity(radial_segments as usize + 1);

        for x in 0..=radial_segments {
            let theta = x as f32 / radial_segments as f32 * TAU;
            let (sin, cos) = theta.sin_cos();

            let position = Vec3::new(radius * sin, -v * height + half_height, radius * cos);
            let normal = Vec3::new(sin, slope, cos).normalize();
            row.push(builder.push_vertex(position, normal));
        }
        rows.push(row);
    }

    for x in 0..radial_segments as usize {
        let a = rows[0][x];
        let b = rows[1][x];
        let c = rows[1][x + 1];
        let d = rows[0][x + 1];

        if radius_top > 0.0 {
            builder.push_triangle(a, b, d);
        }
        if radius_bottom > 0.0 {
            builder.push_triangle(b, c, d);
        }
    }

    if radius_top > 0.0 {
        push_cap(&mut builder, true, radius_top, half_height, radial_segments);
    }
    if radius_bottom > 0.0 {
        push_cap(&mut builder, false, radius_bottom, half_height, radial_segments);
    }

    builder.build()
}

fn push_cap(builder: &mut Builder, top: bool, radius: f32, half_height: f32, radial_segments: u32) {
    let sign = if top { 1.0 } else { -1.0 };
    let normal = Vec3::new(0.0, sign, 0.0);

    let center_start = builder.next_index();
    for _ in 0..radial_segments {
        builder.push_vertex(Vec3::new(0.0, half_height * sign, 0.0), normal);
    }

    let rim_start = builder.next_index();
    for x in 0..=radial_segments {
        let theta = x as f32 / radial_segments as f32 * TAU;
        let (sin, cos) = theta.sin_cos();
        builder.push_vertex(Vec3::new(radius * sin, half_height * sign, radius * cos), normal);
    }

    for x in 0..radial_segments {
        let center = center_start + x;
        let rim = rim_start + x;
        if top {
            builder.push_triangle(rim, rim + 1, center);
        } else {
            builder.push_triangle(rim + 1, rim, center);
        }
    }
}

/// Cone pointing up +Y with only a bottom cap
pub fn cone(radius: f32, height: f32, radial_segments: u32) -> Geometry {
    cylinder(0.0, radius, height, radial_segments)
}

/// Torus in the XY plane around the Z axis
pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Geometry {
    let radial_segments = radial_segments.max(3);
    let tubular_segments = tubular_segments.max(3);
    let mut builder = Builder::default();

    for j in 0..=radial_segments {
        let v = j as f32 / radial_segments as f32 * TAU;
        for i in 0..=tubular_segments {
            let u = i as f32 / tubular_segments as f32 * TAU;

            let position = Vec3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            builder.push_vertex(position, (position - center).normalize_or_zero());
        }
    }

    let stride = tubular_segments + 1;
    for j in 1..=radial_segments {
        for i in 1..=tubular_segments {
            let a = stride * j + i - 1;
            let b = stride * (j - 1) + i - 1;
            let c = stride * (j - 1) + i;
            let d = stride * j + i;

            builder.push_triangle(a, b, d);
            builder.push_triangle(b, c, d);
        }
    }

    builder.build()
}

/// Single-segment quad in the XY plane facing +Z
pub fn plane(width: f32, height: f32) -> Geometry {
    let mut builder = Builder::default();
    let normal = Vec3::Z;

    for iy in 0..=1u32 {
        let y = iy as f32 * height - height * 0.5;
        for ix in 0..=1u32 {
            let x = ix as f32 * width - width * 0.5;
            builder.push_vertex(Vec3::new(x, -y, 0.0), normal);
        }
    }

    builder.push_triangle(0, 2, 1);
    builder.push_triangle(2, 3, 1);

    builder.build()
}
