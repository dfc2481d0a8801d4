use crate::animation::AnimationLoop;
use crate::camera::PerspectiveCamera;
use crate::config::ViewerConfig;
use crate::controls::OrbitControls;
use crate::scene::SceneController;
use crate::traits::{SceneRenderer, TimeSource, WindowDimensions};

/// Everything the viewer mutates between frames, owned in one place
pub struct Viewer {
    pub controller: SceneController,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub animation: AnimationLoop,
    clock: Box<dyn TimeSource>,
}

impl Viewer {
    /// Builds the viewer with the initial shape already composed
    pub fn new(config: &ViewerConfig, dimensions: WindowDimensions, clock: Box<dyn TimeSource>) -> Self {
        let mut controller = SceneController::from_config(config);
        controller.change_shape(config.initial_shape);

        Self {
            controller,
            camera: PerspectiveCamera::from_config(&config.camera, dimensions.aspect()),
            controls: OrbitControls::new(config.controls.clone(), dimensions.height),
            animation: AnimationLoop::new(&config.animation),
            clock,
        }
    }

    /// Draws one frame. Animates only once the loop has been started.
    pub fn frame<R: SceneRenderer + ?Sized>(&mut self, renderer: &mut R) -> anyhow::Result<()> {
        if self.animation.is_running() {
            let now = self.clock.now_millis();
            self.animation.tick(
                &mut self.controller,
                &mut self.camera,
                &mut self.controls,
                renderer,
                now,
            )
        } else {
            self.controls.update(&mut self.camera);
            renderer.render(self.controller.scene(), &self.camera)
        }
    }

    /// Matches camera and render surface to a new viewport; zero sizes are ignored
    pub fn resize<R: SceneRenderer + ?Sized>(&mut self, dimensions: WindowDimensions, renderer: &mut R) {
        if dimensions.is_empty() {
            return;
        }
        self.camera.set_viewport(dimensions.width, dimensions.height);
        self.controls.set_viewport_height(dimensions.height);
        renderer.resize(dimensions);
    }
}
