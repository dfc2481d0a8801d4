// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::shape::DisplayMode;

#[derive(Parser, Debug, Clone)]
#[command(name = "shape-viewer")]
#[command(about = "Interactive 3D primitive viewer", long_about = None)]
pub struct Cli {
    /// JSON config file; missing fields use defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Initial shape (cube, sphere, cone, torus, cylinder, dodecahedron,
    /// icosahedron, plane, triangle)
    #[arg(long)]
    pub shape: Option<String>,

    /// Initial display mode
    #[arg(long, value_parser = parse_mode)]
    pub mode: Option<DisplayMode>,

    /// Start animating immediately, without the title screen
    #[arg(long = "skip-title", default_value = "false")]
    pub skip_title: bool,

    /// Disable UI elements (implies --skip-title)
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,
}

fn parse_mode(s: &str) -> Result<DisplayMode, String> {
    s.parse()
}
