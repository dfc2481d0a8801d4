// config.rs - Viewer settings loaded from JSON, overridden by the CLI
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::shape::{DisplayMode, ShapeType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Shape Viewer".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Initial distance from the origin along +Z
    pub distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            distance: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            enable_damping: false,
            damping_factor: 0.05,
            min_distance: 0.5,
            max_distance: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    /// 0xRRGGBB
    pub color: u32,
    pub intensity: f32,
    pub position: [f32; 3],
    pub ambient: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            color: 0xffffff,
            intensity: 1.0,
            position: [5.0, 5.0, 5.0],
            ambient: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Radians added to x and y rotation each frame
    pub rotation_step: f32,
    /// Hue cycles per millisecond of wall-clock time
    pub hue_speed: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            rotation_step: 0.01,
            hue_speed: 0.0001,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub controls: ControlsConfig,
    pub light: LightConfig,
    pub animation: AnimationConfig,
    /// Shared mesh material, 0xRRGGBB
    pub material_color: u32,
    pub point_size: f32,
    pub clear_color: [f32; 3],
    pub msaa_samples: u32,
    pub initial_shape: ShapeType,
    pub initial_mode: DisplayMode,
    /// Start animating without showing the title screen
    pub skip_title: bool,
    /// Hide all overlay UI
    pub no_ui: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            controls: ControlsConfig::default(),
            light: LightConfig::default(),
            animation: AnimationConfig::default(),
            material_color: 0x44aa88,
            point_size: 0.05,
            clear_color: [0.0, 0.0, 0.0],
            msaa_samples: 4,
            initial_shape: ShapeType::Cube,
            initial_mode: DisplayMode::Mesh,
            skip_title: false,
            no_ui: false,
        }
    }
}

impl ViewerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("Invalid viewer config")?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects limits that would panic or degenerate once the viewer runs
    pub fn validate(&self) -> Result<()> {
        let camera = &self.camera;
        if camera.near <= 0.0 || camera.far <= 0.0 {
            bail!("camera near/far must be positive, got {} / {}", camera.near, camera.far);
        }
        if camera.near >= camera.far {
            bail!("camera near ({}) must be less than far ({})", camera.near, camera.far);
        }
        let controls = &self.controls;
        if controls.min_distance > controls.max_distance {
            bail!(
                "controls min_distance ({}) exceeds max_distance ({})",
                controls.min_distance,
                controls.max_distance
            );
        }
        if self.point_size <= 0.0 {
            bail!("point_size must be positive, got {}", self.point_size);
        }
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_json(&json).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Loads the file named by `--config` (or defaults) and applies CLI overrides
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(shape) = &cli.shape {
            self.initial_shape = ShapeType::parse(shape);
        }
        if let Some(mode) = cli.mode {
            self.initial_mode = mode;
        }
        if cli.skip_title {
            self.skip_title = true;
        }
        if cli.no_ui {
            self.no_ui = true;
            self.skip_title = true;
        }
        self.msaa_samples = match self.msaa_samples {
            0 | 1 => 1,
            _ => 4,
        };
    }
}
