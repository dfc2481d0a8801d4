pub mod animation;
pub mod camera;
pub mod cli;
pub mod clock;
pub mod config;
pub mod controls;
pub mod geometry;
pub mod math;
pub mod overlay;
pub mod particles;
pub mod renderer;
pub mod scene;
pub mod shape;
pub mod traits;
pub mod types;
pub mod ui;
pub mod viewer;
pub mod window;

pub use geometry::{create_geometry, Geometry};
pub use particles::{project, ColorBuffer, PointGeometry};
pub use scene::{Scene, SceneController};
pub use shape::{DisplayMode, ShapeType};
