use super::window::WindowDimensions;
use crate::camera::PerspectiveCamera;
use crate::scene::Scene;

/// Scene renderer - draws one frame of a scene from a camera
pub trait SceneRenderer {
    /// Render the scene to the output surface
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> anyhow::Result<()>;

    /// Resize the output surface
    fn resize(&mut self, dimensions: WindowDimensions);

    /// Current output surface size
    fn dimensions(&self) -> WindowDimensions;
}
