use crate::camera::PerspectiveCamera;
use crate::config::AnimationConfig;
use crate::controls::OrbitControls;
use crate::scene::SceneController;
use crate::traits::SceneRenderer;

/// Per-frame animation loop.
///
/// The host calls [`AnimationLoop::tick`] once per redraw and schedules the
/// next redraw itself. Rotation advances by a fixed step per tick, so spin
/// speed follows the frame rate; particle hue follows wall-clock time.
#[derive(Debug, Clone)]
pub struct AnimationLoop {
    pub rotation_step: f32,
    pub hue_speed: f64,
    running: bool,
    ticks: u64,
}

impl AnimationLoop {
    pub fn new(config: &AnimationConfig) -> Self {
        Self {
            rotation_step: config.rotation_step,
            hue_speed: config.hue_speed,
            running: false,
            ticks: 0,
        }
    }

    pub fn start(&mut self) {
        if !self.running {
            log::debug!("Animation loop started");
        }
        self.running = true;
    }

    pub fn stop(&mut self) {
        if self.running {
            log::debug!("Animation loop stopped after {} ticks", self.ticks);
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advances the animation one frame and renders once. Does nothing while
    /// stopped.
    pub fn tick<R: SceneRenderer + ?Sized>(
        &mut self,
        controller: &mut SceneController,
        camera: &mut PerspectiveCamera,
        controls: &mut OrbitControls,
        renderer: &mut R,
        now_millis: f64,
    ) -> anyhow::Result<()> {
        if !self.running {
            return Ok(());
        }
        self.ticks += 1;

        if let Some(mesh) = controller.mesh_mut() {
            mesh.transform.rotate_xy(self.rotation_step);
        }

        if let Some(points) = controller.points_mut() {
            let colors = &mut points.geometry.colors;
            colors.fill_rainbow(now_millis * self.hue_speed);
            colors.mark_needs_update();

            points.transform.rotate_xy(self.rotation_step);
        }

        controls.update(camera);
        renderer.render(controller.scene(), camera)
    }
}
