mod color;

pub use color::{hex_to_rgb, hsl_to_rgb, srgb_to_linear, srgb_to_linear_rgb};
