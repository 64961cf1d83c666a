//! Named sample colours and colour parsing.

use crate::error::{ChromaError, Result};
use crate::som::vector::{from_rgb8, WeightVector};

/// Preset sample colours, in the order they are offered by default.
pub const PRESETS: [(&str, [u8; 3]); 8] = [
    ("red", [0xFF, 0x00, 0x00]),
    ("green", [0x00, 0x80, 0x00]),
    ("blue", [0x00, 0x00, 0xFF]),
    ("yellow", [0xFF, 0xFF, 0x00]),
    ("orange", [0xFF, 0xA5, 0x00]),
    ("purple", [0x80, 0x00, 0x80]),
    ("pink", [0xFF, 0xC0, 0xCB]),
    ("cyan", [0x00, 0xFF, 0xFF]),
];

/// Looks up a preset by name, ignoring case.
pub fn preset(name: &str) -> Option<WeightVector> {
    PRESETS
        .iter()
        .find(|(preset, _)| preset.eq_ignore_ascii_case(name))
        .map(|&(_, rgb)| from_rgb8(rgb))
}

/// Parses a preset name or a `#rrggbb` / `rrggbb` hex triplet.
pub fn parse_color(text: &str) -> Result<WeightVector> {
    let text = text.trim();
    if let Some(color) = preset(text) {
        return Ok(color);
    }

    let hex = text.strip_prefix('#').unwrap_or(text);
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(ChromaError::InvalidColor(text.to_string()));
    }

    let mut rgb = [0u8; 3];
    for (i, channel) in rgb.iter_mut().enumerate() {
        *channel = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
            .map_err(|_| ChromaError::InvalidColor(text.to_string()))?;
    }
    Ok(from_rgb8(rgb))
}

/// The first `n` presets, cycling when `n` exceeds the preset count.
pub fn default_samples(n: usize) -> Vec<WeightVector> {
    PRESETS
        .iter()
        .cycle()
        .take(n)
        .map(|&(_, rgb)| from_rgb8(rgb))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_lookup() {
        assert_eq!(preset("red"), Some([1.0, 0.0, 0.0]));
        assert_eq!(preset("CYAN"), Some([0.0, 1.0, 1.0]));
        assert_eq!(preset("magenta"), None);
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_color("#0000ff").unwrap(), [0.0, 0.0, 1.0]);
        assert_eq!(parse_color("FFFF00").unwrap(), [1.0, 1.0, 0.0]);
        assert_eq!(parse_color(" Green ").unwrap(), from_rgb8([0, 128, 0]));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "#12345", "#1234567", "zzzzzz", "#ff00gg", "ünicod"] {
            assert!(
                matches!(parse_color(bad), Err(ChromaError::InvalidColor(_))),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_default_samples_cycle() {
        let samples = default_samples(10);
        assert_eq!(samples.len(), 10);
        assert_eq!(samples[0], [1.0, 0.0, 0.0]);
        assert_eq!(samples[8], samples[0]);
        assert_eq!(samples[9], samples[1]);
        assert!(default_samples(0).is_empty());
    }
}
