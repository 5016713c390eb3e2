use egui::Color32;

use crate::error::{EditorError, EditorResult};

/// Parses a CSS-style hex colour: `#rgb`, `#rrggbb` or `#rrggbbaa`.
pub fn parse_hex(value: &str) -> EditorResult<Color32> {
    let invalid = || EditorError::Config(format!("invalid colour {value:?}"));
    let digits = value.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !digits.is_ascii() {
        return Err(invalid());
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
    match digits.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (slot, i) in rgb.iter_mut().zip(0..3) {
                let v = channel(&digits[i..i + 1])?;
                *slot = v * 17;
            }
            Ok(Color32::from_rgb(rgb[0], rgb[1], rgb[2]))
        }
        6 => Ok(Color32::from_rgb(
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )),
        8 => Ok(Color32::from_rgba_unmultiplied(
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
            channel(&digits[6..8])?,
        )),
        _ => Err(invalid()),
    }
}

/// Formats a colour as `#rrggbb`, or `#rrggbbaa` when it is not opaque.
pub fn to_hex(color: Color32) -> String {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    if a == 255 {
        format!("#{r:02x}{g:02x}{b:02x}")
    } else {
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}

/// Serde adapter storing colours as hex strings.
pub mod hex {
    use egui::Color32;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::to_hex(*color))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color32, D::Error> {
        let value = String::deserialize(deserializer)?;
        super::parse_hex(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(parse_hex("#000000").unwrap(), Color32::BLACK);
        assert_eq!(parse_hex("#f00").unwrap(), Color32::from_rgb(255, 0, 0));
        assert_eq!(parse_hex(" #12ab34 ").unwrap(), Color32::from_rgb(0x12, 0xab, 0x34));
        let translucent = parse_hex("#ff000080").unwrap();
        assert_eq!(translucent.to_srgba_unmultiplied()[3], 0x80);
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        assert!(parse_hex("000000").is_err());
        assert!(parse_hex("#12345").is_err());
        assert!(parse_hex("#gggggg").is_err());
        assert!(parse_hex("#ééé").is_err());
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex(Color32::from_rgb(1, 2, 255)), "#0102ff");
        assert_eq!(to_hex(Color32::TRANSPARENT), "#00000000");
    }
}
