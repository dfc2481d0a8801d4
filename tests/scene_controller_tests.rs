use shape_viewer::config::ViewerConfig;
use shape_viewer::scene::{SceneController, VisualObject};
use shape_viewer::{DisplayMode, ShapeType};

fn controller(mode: DisplayMode) -> SceneController {
    let config = ViewerConfig {
        initial_mode: mode,
        ..ViewerConfig::default()
    };
    SceneController::from_config(&config)
}

#[cfg(test)]
mod change_shape_tests {
    use super::*;

    #[test]
    fn test_starts_with_light_only() {
        let controller = controller(DisplayMode::Mesh);
        assert_eq!(controller.scene().child_count(), 1);
        assert_eq!(controller.scene().lights().count(), 1);
        assert!(controller.current_mesh().is_none());
        assert!(controller.particle_system().is_none());
    }

    #[test]
    fn test_repeated_changes_keep_one_object() {
        let mut controller = controller(DisplayMode::Mesh);
        controller.change_shape(ShapeType::Cube);
        controller.change_shape(ShapeType::Sphere);

        assert_eq!(controller.scene().child_count(), 2, "light plus one mesh");
        assert_eq!(controller.scene().object_count(), 1);
        assert_eq!(controller.shape(), ShapeType::Sphere);
    }

    #[test]
    fn test_repeated_changes_in_particle_mode() {
        let mut controller = controller(DisplayMode::Particles);
        controller.change_shape(ShapeType::Torus);
        controller.change_shape(ShapeType::Torus);

        assert_eq!(controller.scene().child_count(), 2);
        assert!(controller.current_mesh().is_none());
        let id = controller.particle_system().unwrap();
        assert!(controller.scene().object(id).unwrap().as_points().is_some());
    }

    #[test]
    fn test_previous_object_is_detached() {
        let mut controller = controller(DisplayMode::Mesh);
        controller.change_shape(ShapeType::Cone);
        let old = controller.current_mesh().unwrap();

        controller.change_shape(ShapeType::Cylinder);
        assert!(!controller.scene().contains(old));
        assert!(controller.scene().contains(controller.current_mesh().unwrap()));
    }

    #[test]
    fn test_unknown_shape_shows_cube() {
        let mut controller = controller(DisplayMode::Mesh);
        controller.change_shape(ShapeType::parse("hexagon"));

        let mesh = controller.mesh_mut().unwrap();
        assert_eq!(mesh.geometry.vertex_count(), 24);
    }

    #[test]
    fn test_mesh_uses_configured_material() {
        let mut controller = controller(DisplayMode::Mesh);
        controller.change_shape(ShapeType::Plane);

        let color = controller.mesh_mut().unwrap().material.color;
        assert_eq!(color, [0x44 as f32 / 255.0, 0xaa as f32 / 255.0, 0x88 as f32 / 255.0]);
    }

    #[test]
    fn test_points_use_configured_size() {
        let mut controller = controller(DisplayMode::Particles);
        controller.change_shape(ShapeType::Sphere);

        let points = controller.points_mut().unwrap();
        assert_eq!(points.material.size, 0.05);
        assert!(points.material.vertex_colors);
    }
}

#[cfg(test)]
mod mode_tests {
    use super::*;

    #[test]
    fn test_switch_to_particles_replaces_mesh() {
        let mut controller = controller(DisplayMode::Mesh);
        controller.change_shape(ShapeType::Triangle);
        let mesh = controller.current_mesh().unwrap();

        controller.set_mode(DisplayMode::Particles);

        assert_eq!(controller.mode(), DisplayMode::Particles);
        assert!(controller.current_mesh().is_none());
        assert!(!controller.scene().contains(mesh));
        assert_eq!(controller.scene().child_count(), 2);

        let points = controller.points_mut().unwrap();
        assert_eq!(points.geometry.len(), 3);
        let expected = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        for (i, rgb) in expected.iter().enumerate() {
            let color = points.geometry.colors.get(i);
            for (a, e) in color.iter().zip(rgb) {
                assert!((a - e).abs() < 1e-5, "point {} is {:?}", i, color);
            }
        }
    }

    #[test]
    fn test_switch_back_to_mesh_keeps_shape() {
        let mut controller = controller(DisplayMode::Particles);
        controller.change_shape(ShapeType::Icosahedron);

        controller.set_mode(DisplayMode::Mesh);

        assert!(controller.particle_system().is_none());
        assert_eq!(controller.shape(), ShapeType::Icosahedron);
        let id = controller.current_mesh().unwrap();
        match controller.scene().object(id) {
            Some(VisualObject::Mesh(mesh)) => assert_eq!(mesh.geometry.vertex_count(), 60),
            other => panic!("expected a mesh, got {:?}", other),
        }
    }

    #[test]
    fn test_new_objects_start_unrotated() {
        let mut controller = controller(DisplayMode::Mesh);
        controller.change_shape(ShapeType::Cube);
        controller.mesh_mut().unwrap().transform.rotate_xy(1.0);

        controller.set_mode(DisplayMode::Particles);
        let points = controller.points_mut().unwrap();
        assert_eq!(points.transform.rotation, glam::Vec3::ZERO);
    }
}
