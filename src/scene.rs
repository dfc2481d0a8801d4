//! Scene graph and the controller that keeps exactly one visual object in it.

use std::sync::Arc;

use glam::{EulerRot, Mat4, Vec3};

use crate::config::ViewerConfig;
use crate::geometry::{create_geometry, Geometry};
use crate::math::hex_to_rgb;
use crate::particles::{project, PointGeometry};
use crate::shape::{DisplayMode, ShapeType};

/// Identity of a node while it is attached to a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    /// Euler angles in radians, applied in XYZ order
    pub rotation: Vec3,
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    pub fn rotate_xy(&mut self, step: f32) {
        self.rotation.x += step;
        self.rotation.y += step;
    }
}

/// Lit solid-color surface material
#[derive(Debug, Clone, PartialEq)]
pub struct MeshMaterial {
    /// sRGB color
    pub color: [f32; 3],
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointsMaterial {
    /// Point diameter in world units
    pub size: f32,
    pub vertex_colors: bool,
}

#[derive(Debug, Clone)]
pub struct Mesh {
    pub geometry: Geometry,
    pub material: Arc<MeshMaterial>,
    pub transform: Transform,
}

#[derive(Debug, Clone)]
pub struct Points {
    pub geometry: PointGeometry,
    pub material: PointsMaterial,
    pub transform: Transform,
}

#[derive(Debug, Clone)]
pub enum VisualObject {
    Mesh(Mesh),
    Points(Points),
}

impl VisualObject {
    pub fn transform(&self) -> &Transform {
        match self {
            VisualObject::Mesh(mesh) => &mesh.transform,
            VisualObject::Points(points) => &points.transform,
        }
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        match self {
            VisualObject::Mesh(mesh) => &mut mesh.transform,
            VisualObject::Points(points) => &mut points.transform,
        }
    }

    pub fn as_mesh(&self) -> Option<&Mesh> {
        match self {
            VisualObject::Mesh(mesh) => Some(mesh),
            VisualObject::Points(_) => None,
        }
    }

    pub fn as_points(&self) -> Option<&Points> {
        match self {
            VisualObject::Points(points) => Some(points),
            VisualObject::Mesh(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLight {
    /// sRGB color
    pub color: [f32; 3],
    pub intensity: f32,
    /// Light shines from here towards the origin
    pub position: Vec3,
}

impl DirectionalLight {
    /// Unit vector pointing from the surface towards the light
    pub fn direction(&self) -> Vec3 {
        self.position.normalize_or(Vec3::Y)
    }
}

#[derive(Debug, Clone)]
pub enum SceneNode {
    Light(DirectionalLight),
    Object(VisualObject),
}

/// Flat scene graph. Nodes keep insertion order.
#[derive(Debug, Default)]
pub struct Scene {
    nodes: Vec<(ObjectId, SceneNode)>,
    next_id: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, node: SceneNode) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.nodes.push((id, node));
        id
    }

    pub fn add_object(&mut self, object: VisualObject) -> ObjectId {
        self.add(SceneNode::Object(object))
    }

    /// Detaches a node; the node is handed back to the caller
    pub fn remove(&mut self, id: ObjectId) -> Option<SceneNode> {
        let index = self.nodes.iter().position(|(node_id, _)| *node_id == id)?;
        Some(self.nodes.remove(index).1)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.nodes.iter().any(|(node_id, _)| *node_id == id)
    }

    pub fn object(&self, id: ObjectId) -> Option<&VisualObject> {
        self.nodes.iter().find_map(|(node_id, node)| match node {
            SceneNode::Object(object) if *node_id == id => Some(object),
            _ => None,
        })
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut VisualObject> {
        self.nodes.iter_mut().find_map(|(node_id, node)| match node {
            SceneNode::Object(object) if *node_id == id => Some(object),
            _ => None,
        })
    }

    /// Number of attached nodes, lights included
    pub fn child_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &VisualObject)> {
        self.nodes.iter().filter_map(|(id, node)| match node {
            SceneNode::Object(object) => Some((*id, object)),
            SceneNode::Light(_) => None,
        })
    }

    pub fn lights(&self) -> impl Iterator<Item = &DirectionalLight> {
        self.nodes.iter().filter_map(|(_, node)| match node {
            SceneNode::Light(light) => Some(light),
            SceneNode::Object(_) => None,
        })
    }

    pub fn object_count(&self) -> usize {
        self.objects().count()
    }
}

/// Owns the scene and the current mesh / particle system slots.
///
/// Every rebuild detaches the previous objects before creating the new one,
/// so the scene never holds more than one visual object.
#[derive(Debug)]
pub struct SceneController {
    scene: Scene,
    material: Arc<MeshMaterial>,
    point_size: f32,
    mode: DisplayMode,
    shape: ShapeType,
    current_mesh: Option<ObjectId>,
    particle_system: Option<ObjectId>,
}

impl SceneController {
    pub fn new(material: MeshMaterial, point_size: f32, mode: DisplayMode) -> Self {
        Self {
            scene: Scene::new(),
            material: Arc::new(material),
            point_size,
            mode,
            shape: ShapeType::Cube,
            current_mesh: None,
            particle_system: None,
        }
    }

    /// Controller with the configured light and material; no object yet
    pub fn from_config(config: &ViewerConfig) -> Self {
        let material = MeshMaterial {
            color: hex_to_rgb(config.material_color),
        };
        let mut controller = Self::new(material, config.point_size, config.initial_mode);
        controller.scene.add(SceneNode::Light(DirectionalLight {
            color: hex_to_rgb(config.light.color),
            intensity: config.light.intensity,
            position: Vec3::from_array(config.light.position),
        }));
        controller.shape = config.initial_shape;
        controller
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Shape of the last rebuild
    pub fn shape(&self) -> ShapeType {
        self.shape
    }

    pub fn material(&self) -> &Arc<MeshMaterial> {
        &self.material
    }

    pub fn current_mesh(&self) -> Option<ObjectId> {
        self.current_mesh
    }

    pub fn particle_system(&self) -> Option<ObjectId> {
        self.particle_system
    }

    pub fn mesh_mut(&mut self) -> Option<&mut Mesh> {
        let id = self.current_mesh?;
        match self.scene.object_mut(id)? {
            VisualObject::Mesh(mesh) => Some(mesh),
            VisualObject::Points(_) => None,
        }
    }

    pub fn points_mut(&mut self) -> Option<&mut Points> {
        let id = self.particle_system?;
        match self.scene.object_mut(id)? {
            VisualObject::Points(points) => Some(points),
            VisualObject::Mesh(_) => None,
        }
    }

    /// Replaces the visual object with `shape` drawn in the current mode
    pub fn change_shape(&mut self, shape: ShapeType) {
        if let Some(id) = self.current_mesh.take() {
            self.scene.remove(id);
        }
        if let Some(id) = self.particle_system.take() {
            self.scene.remove(id);
        }

        self.shape = shape;
        let geometry = create_geometry(&shape);

        match self.mode {
            DisplayMode::Mesh => {
                let mesh = Mesh {
                    geometry,
                    material: Arc::clone(&self.material),
                    transform: Transform::default(),
                };
                self.current_mesh = Some(self.scene.add_object(VisualObject::Mesh(mesh)));
            }
            DisplayMode::Particles => {
                let points = Points {
                    geometry: project(&geometry),
                    material: PointsMaterial {
                        size: self.point_size,
                        vertex_colors: true,
                    },
                    transform: Transform::default(),
                };
                self.particle_system = Some(self.scene.add_object(VisualObject::Points(points)));
            }
        }

        log::info!("Showing {} as {}", shape, self.mode);
    }

    /// Switches mode and rebuilds the current shape under it
    pub fn set_mode(&mut self, mode: DisplayMode) {
        self.mode = mode;
        self.change_shape(self.shape);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> SceneController {
        SceneController::new(MeshMaterial { color: [0.5, 0.5, 0.5] }, 0.05, DisplayMode::Mesh)
    }

    #[test]
    fn test_scene_add_remove() {
        let mut scene = Scene::new();
        let light = scene.add(SceneNode::Light(DirectionalLight {
            color: [1.0; 3],
            intensity: 1.0,
            position: Vec3::ONE,
        }));
        assert_eq!(scene.child_count(), 1);
        assert!(scene.object(light).is_none());

        assert!(scene.remove(light).is_some());
        assert!(scene.remove(light).is_none());
        assert_eq!(scene.child_count(), 0);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut controller = controller();
        controller.change_shape(ShapeType::Cube);
        let first = controller.current_mesh().unwrap();
        controller.change_shape(ShapeType::Cube);
        let second = controller.current_mesh().unwrap();

        assert_ne!(first, second);
        assert!(!controller.scene().contains(first));
        assert!(controller.scene().contains(second));
    }

    #[test]
    fn test_meshes_share_material() {
        let mut controller = controller();
        controller.change_shape(ShapeType::Sphere);
        let material = Arc::clone(&controller.mesh_mut().unwrap().material);
        assert!(Arc::ptr_eq(&material, controller.material()));
    }

    #[test]
    fn test_transform_rotate_xy() {
        let mut transform = Transform::default();
        transform.rotate_xy(0.25);
        assert_eq!(transform.rotation, Vec3::new(0.25, 0.25, 0.0));
    }

    #[test]
    fn test_light_direction_is_normalized() {
        let light = DirectionalLight {
            color: [1.0; 3],
            intensity: 1.0,
            position: Vec3::new(5.0, 5.0, 5.0),
        };
        assert!((light.direction().length() - 1.0).abs() < 1e-6);
    }
}
