/// Converts HSL to RGB. All inputs and outputs are in `[0, 1]`; hue wraps.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    let h = h.rem_euclid(1.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return [l, l, l];
    }

    let p = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let q = 2.0 * l - p;

    // rounding near the sextant edges can overshoot by an ulp
    [
        hue_to_channel(q, p, h + 1.0 / 3.0),
        hue_to_channel(q, p, h),
        hue_to_channel(q, p, h - 1.0 / 3.0),
    ]
    .map(|c| c.clamp(0.0, 1.0))
}

fn hue_to_channel(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

/// Splits a `0xRRGGBB` value into sRGB channels
pub const fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

pub fn srgb_to_linear(c: f32) -> f32 {
    if c < 0.04045 {
        c * 0.0773993808
    } else {
        (c * 0.9478672986 + 0.0521327014).powf(2.4)
    }
}

pub fn srgb_to_linear_rgb(rgb: [f32; 3]) -> [f32; 3] {
    rgb.map(srgb_to_linear)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rgb(actual: [f32; 3], expected: [f32; 3]) {
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-4, "{:?} != {:?}", actual, expected);
        }
    }

    #[test]
    fn test_hsl_to_rgb_primaries() {
        assert_rgb(hsl_to_rgb(0.0, 1.0, 0.5), [1.0, 0.0, 0.0]);
        assert_rgb(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), [0.0, 1.0, 0.0]);
        assert_rgb(hsl_to_rgb(2.0 / 3.0, 1.0, 0.5), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_hsl_to_rgb_secondaries() {
        assert_rgb(hsl_to_rgb(1.0 / 6.0, 1.0, 0.5), [1.0, 1.0, 0.0]);
        assert_rgb(hsl_to_rgb(0.5, 1.0, 0.5), [0.0, 1.0, 1.0]);
        assert_rgb(hsl_to_rgb(5.0 / 6.0, 1.0, 0.5), [1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_hsl_to_rgb_grey() {
        assert_rgb(hsl_to_rgb(0.3, 0.0, 0.25), [0.25, 0.25, 0.25]);
    }

    #[test]
    fn test_hsl_hue_wraps() {
        assert_rgb(hsl_to_rgb(1.25, 1.0, 0.5), hsl_to_rgb(0.25, 1.0, 0.5));
        assert_rgb(hsl_to_rgb(-0.75, 1.0, 0.5), hsl_to_rgb(0.25, 1.0, 0.5));
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_rgb(hex_to_rgb(0xffffff), [1.0, 1.0, 1.0]);
        assert_rgb(hex_to_rgb(0x44aa88), [68.0 / 255.0, 170.0 / 255.0, 136.0 / 255.0]);
    }

    #[test]
    fn test_srgb_to_linear_endpoints() {
        assert!(srgb_to_linear(0.0).abs() < 1e-6);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-4);
        assert!(srgb_to_linear(0.5) < 0.5);
    }
}
