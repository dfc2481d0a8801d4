//! Orbit camera controls.
//!
//! Pointer input accumulates rotate/pan/dolly deltas; [`OrbitControls::update`]
//! applies them to the camera once per frame, keeping it on a sphere around
//! `camera.target`.

use std::f32::consts::{PI, TAU};

use glam::{Mat4, Vec3};

use crate::camera::PerspectiveCamera;
use crate::config::ControlsConfig;

const MIN_POLAR: f32 = 1e-6;
const CHANGE_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum DragState {
    #[default]
    Idle,
    Rotate,
    Pan,
}

/// Pending spherical deltas
#[derive(Debug, Clone, Copy, Default)]
struct SphericalDelta {
    theta: f32,
    phi: f32,
}

#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub settings: ControlsConfig,
    pub enabled: bool,
    viewport_height: f32,
    drag: DragState,
    last_pointer: Option<(f32, f32)>,
    delta: SphericalDelta,
    scale: f32,
    pan_offset: Vec3,
}

impl OrbitControls {
    pub fn new(settings: ControlsConfig, viewport_height: u32) -> Self {
        Self {
            settings,
            enabled: true,
            viewport_height: viewport_height.max(1) as f32,
            drag: DragState::Idle,
            last_pointer: None,
            delta: SphericalDelta::default(),
            scale: 1.0,
            pan_offset: Vec3::ZERO,
        }
    }

    pub fn set_viewport_height(&mut self, height: u32) {
        if height > 0 {
            self.viewport_height = height as f32;
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag != DragState::Idle
    }

    pub fn pointer_down(&mut self, button: PointerButton) {
        if !self.enabled {
            return;
        }
        self.drag = match button {
            PointerButton::Primary => DragState::Rotate,
            PointerButton::Secondary | PointerButton::Middle => DragState::Pan,
        };
        self.last_pointer = None;
    }

    pub fn pointer_up(&mut self, _button: PointerButton) {
        self.drag = DragState::Idle;
        self.last_pointer = None;
    }

    /// Cursor position in physical pixels
    pub fn pointer_moved(&mut self, x: f32, y: f32, camera: &PerspectiveCamera) {
        let last = self.last_pointer.replace((x, y));
        let Some((last_x, last_y)) = last else {
            return;
        };
        if !self.enabled {
            return;
        }

        let (dx, dy) = (x - last_x, y - last_y);
        match self.drag {
            DragState::Rotate => {
                self.rotate_left(TAU * dx / self.viewport_height * self.settings.rotate_speed);
                self.rotate_up(TAU * dy / self.viewport_height * self.settings.rotate_speed);
            }
            DragState::Pan => self.pan(dx, dy, camera),
            DragState::Idle => {}
        }
    }

    /// Wheel delta in lines; positive scrolls away from the user and zooms in
    pub fn wheel(&mut self, lines: f32) {
        if !self.enabled || lines == 0.0 {
            return;
        }
        let step = 0.95_f32.powf(self.settings.zoom_speed * lines.abs());
        if lines > 0.0 {
            self.scale *= step;
        } else {
            self.scale /= step;
        }
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.delta.theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.delta.phi -= angle;
    }

    fn pan(&mut self, dx: f32, dy: f32, camera: &PerspectiveCamera) {
        let offset = camera.position - camera.target;
        let target_distance = offset.length() * (camera.fov_degrees.to_radians() * 0.5).tan();

        let view = Mat4::look_at_rh(camera.position, camera.target, camera.up).inverse();
        let right = view.x_axis.truncate();
        let up = view.y_axis.truncate();

        let speed = self.settings.pan_speed;
        self.pan_offset -= right * (2.0 * dx * target_distance / self.viewport_height) * speed;
        self.pan_offset += up * (2.0 * dy * target_distance / self.viewport_height) * speed;
    }

    /// Applies pending input to `camera`. Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let offset = camera.position - camera.target;
        let mut radius = offset.length();
        let (mut theta, mut phi) = if radius > 0.0 {
            (offset.x.atan2(offset.z), (offset.y / radius).clamp(-1.0, 1.0).acos())
        } else {
            (0.0, PI * 0.5)
        };

        let damping = if self.settings.enable_damping {
            self.settings.damping_factor.clamp(0.0, 1.0)
        } else {
            1.0
        };

        theta += self.delta.theta * damping;
        phi += self.delta.phi * damping;
        phi = phi.clamp(MIN_POLAR, PI - MIN_POLAR);

        radius = (radius * self.scale).clamp(self.settings.min_distance, self.settings.max_distance);

        let target = camera.target + self.pan_offset * damping;
        let sin_phi = phi.sin();
        let new_offset = Vec3::new(radius * sin_phi * theta.sin(), radius * phi.cos(), radius * sin_phi * theta.cos());
        let position = target + new_offset;

        let moved = position.distance_squared(camera.position) > CHANGE_EPSILON
            || target.distance_squared(camera.target) > CHANGE_EPSILON;

        camera.target = target;
        camera.position = position;

        if self.settings.enable_damping {
            let keep = 1.0 - damping;
            self.delta.theta *= keep;
            self.delta.phi *= keep;
            self.pan_offset *= keep;
        } else {
            self.delta = SphericalDelta::default();
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CameraConfig;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::from_config(&CameraConfig::default(), 1.0)
    }

    #[test]
    fn test_update_without_input_keeps_camera() {
        let mut camera = camera();
        let mut controls = OrbitControls::new(ControlsConfig::default(), 600);

        assert!(!controls.update(&mut camera));
        assert!(camera.position.abs_diff_eq(Vec3::new(0.0, 0.0, 5.0), 1e-5));
    }

    #[test]
    fn test_first_move_only_records_position() {
        let mut camera = camera();
        let mut controls = OrbitControls::new(ControlsConfig::default(), 600);

        controls.pointer_down(PointerButton::Primary);
        controls.pointer_moved(100.0, 100.0, &camera);
        assert!(!controls.update(&mut camera));
    }

    #[test]
    fn test_wheel_clamped_to_min_distance() {
        let mut camera = camera();
        let mut controls = OrbitControls::new(ControlsConfig::default(), 600);

        for _ in 0..200 {
            controls.wheel(1.0);
        }
        controls.update(&mut camera);
        assert!((camera.position.length() - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_disabled_ignores_input() {
        let mut camera = camera();
        let mut controls = OrbitControls::new(ControlsConfig::default(), 600);
        controls.enabled = false;

        controls.wheel(3.0);
        controls.pointer_down(PointerButton::Primary);
        controls.pointer_moved(0.0, 0.0, &camera);
        controls.pointer_moved(50.0, 0.0, &camera);

        assert!(!controls.update(&mut camera));
    }
}
