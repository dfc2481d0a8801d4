use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Primitive shape selectable from the shape dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    #[default]
    Cube,
    Sphere,
    Cone,
    Torus,
    Cylinder,
    Dodecahedron,
    Icosahedron,
    Plane,
    Triangle,
    /// Any name the viewer does not know; renders as a cube
    #[serde(other)]
    Unknown,
}

impl ShapeType {
    /// Shapes offered by the UI, in dropdown order
    pub const ALL: [ShapeType; 9] = [
        ShapeType::Cube,
        ShapeType::Sphere,
        ShapeType::Cone,
        ShapeType::Torus,
        ShapeType::Cylinder,
        ShapeType::Dodecahedron,
        ShapeType::Icosahedron,
        ShapeType::Plane,
        ShapeType::Triangle,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            ShapeType::Cube => "cube",
            ShapeType::Sphere => "sphere",
            ShapeType::Cone => "cone",
            ShapeType::Torus => "torus",
            ShapeType::Cylinder => "cylinder",
            ShapeType::Dodecahedron => "dodecahedron",
            ShapeType::Icosahedron => "icosahedron",
            ShapeType::Plane => "plane",
            ShapeType::Triangle => "triangle",
            ShapeType::Unknown => "unknown",
        }
    }

    /// Human readable label for the dropdown
    pub const fn label(&self) -> &'static str {
        match self {
            ShapeType::Cube => "Cube",
            ShapeType::Sphere => "Sphere",
            ShapeType::Cone => "Cone",
            ShapeType::Torus => "Torus",
            ShapeType::Cylinder => "Cylinder",
            ShapeType::Dodecahedron => "Dodecahedron",
            ShapeType::Icosahedron => "Icosahedron",
            ShapeType::Plane => "Plane",
            ShapeType::Triangle => "Triangle",
            ShapeType::Unknown => "Unknown",
        }
    }

    /// Parse a shape name, never failing. Matching ignores ASCII case.
    pub fn parse(name: &str) -> Self {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|shape| shape.name().eq_ignore_ascii_case(name))
            .unwrap_or(ShapeType::Unknown)
    }
}

impl FromStr for ShapeType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the active shape is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Mesh,
    Particles,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 2] = [DisplayMode::Mesh, DisplayMode::Particles];

    pub const fn name(&self) -> &'static str {
        match self {
            DisplayMode::Mesh => "mesh",
            DisplayMode::Particles => "particles",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            DisplayMode::Mesh => "Mesh",
            DisplayMode::Particles => "Particles",
        }
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DisplayMode::ALL
            .iter()
            .copied()
            .find(|mode| mode.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown display mode '{}', expected 'mesh' or 'particles'", s))
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_names() {
        for shape in ShapeType::ALL {
            assert_eq!(ShapeType::parse(shape.name()), shape);
        }
    }

    #[test]
    fn test_parse_ignores_case() {
        assert_eq!(ShapeType::parse("Plane"), ShapeType::Plane);
        assert_eq!(ShapeType::parse("  TORUS "), ShapeType::Torus);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(ShapeType::parse("hexagon"), ShapeType::Unknown);
        assert_eq!(ShapeType::parse(""), ShapeType::Unknown);
        assert_eq!("pyramid".parse::<ShapeType>(), Ok(ShapeType::Unknown));
    }

    #[test]
    fn test_shape_serde_unknown_variant() {
        let shape: ShapeType = serde_json::from_str("\"sphere\"").unwrap();
        assert_eq!(shape, ShapeType::Sphere);

        let shape: ShapeType = serde_json::from_str("\"blob\"").unwrap();
        assert_eq!(shape, ShapeType::Unknown);
    }

    #[test]
    fn test_display_mode_from_str() {
        assert_eq!("mesh".parse::<DisplayMode>(), Ok(DisplayMode::Mesh));
        assert_eq!("Particles".parse::<DisplayMode>(), Ok(DisplayMode::Particles));
        assert!("points".parse::<DisplayMode>().is_err());
    }
}
