//! Hex color parsing

use crate::topology::TopologyError;

/// Parse a CSS-style hex color (`#RGB` or `#RRGGBB`, `#` optional) into RGBA.
///
/// Alpha is always 1.0; components are plain `value / 255`.
pub fn parse_hex_color(text: &str) -> Result<[f32; 4], TopologyError> {
    let hex = text.trim().trim_start_matches('#');
    let invalid = || TopologyError::InvalidColor(text.to_string());

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return Err(invalid()),
    };

    let value = u32::from_str_radix(&expanded, 16).map_err(|_| invalid())?;
    Ok(rgb_u32(value, 1.0))
}

/// Convert a packed `0xRRGGBB` value into RGBA with the given alpha
pub fn rgb_u32(value: u32, alpha: f32) -> [f32; 4] {
    let r = ((value >> 16) & 0xff) as f32 / 255.0;
    let g = ((value >> 8) & 0xff) as f32 / 255.0;
    let b = (value & 0xff) as f32 / 255.0;
    [r, g, b, alpha]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_parse_six_digit() {
        let c = parse_hex_color("#4CAF50").unwrap();
        assert_abs_diff_eq!(c[0], 0x4c as f32 / 255.0);
        assert_abs_diff_eq!(c[1], 0xaf as f32 / 255.0);
        assert_abs_diff_eq!(c[2], 0x50 as f32 / 255.0);
        assert_eq!(c[3], 1.0);
    }

    #[test]
    fn test_parse_short_form_without_hash() {
        assert_eq!(parse_hex_color("fff").unwrap(), [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_hex_color("#12345"),
            Err(TopologyError::InvalidColor(_))
        ));
        assert!(parse_hex_color("#zzzzzz").is_err());
        assert!(parse_hex_color("").is_err());
    }

    #[test]
    fn test_rgb_u32_alpha() {
        assert_eq!(rgb_u32(0xff0000, 0.5), [1.0, 0.0, 0.0, 0.5]);
    }
}
