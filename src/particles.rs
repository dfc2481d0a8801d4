//! Point cloud projection of a geometry with a rainbow color gradient.

use std::sync::Arc;

use crate::geometry::Geometry;
use crate::math::hsl_to_rgb;

pub const SATURATION: f32 = 1.0;
pub const LIGHTNESS: f32 = 0.5;

/// Flat RGB triples, one per point.
///
/// The version counter is bumped by [`ColorBuffer::mark_needs_update`] so
/// the GPU side can tell when to upload again.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorBuffer {
    data: Vec<f32>,
    version: u64,
}

impl ColorBuffer {
    pub fn new(count: usize) -> Self {
        Self {
            data: vec![0.0; count * 3],
            version: 0,
        }
    }

    /// Number of RGB triples
    pub fn count(&self) -> usize {
        self.data.len() / 3
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn get(&self, index: usize) -> [f32; 3] {
        let i = index * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    pub fn set(&mut self, index: usize, rgb: [f32; 3]) {
        let i = index * 3;
        self.data[i..i + 3].copy_from_slice(&rgb);
    }

    pub fn mark_needs_update(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Rewrites every color with a hue offset by `phase`, evenly spread over
    /// the points: `hue = (phase + i / count) mod 1`.
    pub fn fill_rainbow(&mut self, phase: f64) {
        let count = self.count();
        for i in 0..count {
            let hue = (phase + i as f64 / count as f64).rem_euclid(1.0);
            self.set(i, hsl_to_rgb(hue as f32, SATURATION, LIGHTNESS));
        }
    }
}

/// Positions shared with the source geometry plus owned colors
#[derive(Debug, Clone)]
pub struct PointGeometry {
    positions: Arc<[[f32; 3]]>,
    pub colors: ColorBuffer,
}

impl PointGeometry {
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Another handle to the shared position storage
    pub fn shared_positions(&self) -> Arc<[[f32; 3]]> {
        Arc::clone(&self.positions)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Builds a point cloud over the vertices of `geometry`, hue running from 0°
/// at the first vertex towards 360° at the last.
pub fn project(geometry: &Geometry) -> PointGeometry {
    let positions = geometry.shared_positions();
    let mut colors = ColorBuffer::new(positions.len());
    colors.fill_rainbow(0.0);

    PointGeometry { positions, colors }
}
