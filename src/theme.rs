use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::color::Color;
use crate::pipeline::assign::AnsiPalette;

/// Top-level key the palette is published under in matugen templates.
pub const THEME_KEY: &str = "mochaccino";

/// One color as matugen templates reference it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HexEntry {
    pub hex: String,
    pub hex_stripped: String,
}

/// The three scheme variants of a slot. The palette does not distinguish
/// them, so all three carry the same color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotVariants {
    pub default: HexEntry,
    pub dark: HexEntry,
    pub light: HexEntry,
}

impl SlotVariants {
    pub fn uniform(color: Color) -> Self {
        let entry = HexEntry {
            hex: color.to_hex(),
            hex_stripped: color.to_hex_stripped(),
        };
        Self {
            default: entry.clone(),
            dark: entry.clone(),
            light: entry,
        }
    }
}

/// The palette in the shape `matugen --import-json-string` expects.
#[derive(Debug, Clone)]
pub struct MatugenTheme {
    pub palette: AnsiPalette,
}

/// Slot map emitted in slot order, so `color2` precedes `color10`.
struct Slots<'a>(&'a AnsiPalette);

impl Serialize for Slots<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.slots.len()))?;
        for (name, color) in self.0.iter() {
            map.serialize_entry(name, &SlotVariants::uniform(color))?;
        }
        map.end()
    }
}

impl Serialize for MatugenTheme {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(THEME_KEY, &Slots(&self.palette))?;
        map.end()
    }
}

impl MatugenTheme {
    pub fn from_palette(palette: AnsiPalette) -> Self {
        Self { palette }
    }

    /// Compact JSON for `--import-json-string`.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::assign::generate_palette;

    fn test_theme() -> MatugenTheme {
        MatugenTheme::from_palette(generate_palette("#3366cc", "#1a1a1a").unwrap())
    }

    fn parsed() -> serde_json::Value {
        serde_json::from_str(&test_theme().to_json().unwrap()).unwrap()
    }

    #[test]
    fn json_has_all_slots_with_three_variants() {
        let json = parsed();
        let slots = json[THEME_KEY].as_object().unwrap();
        assert_eq!(slots.len(), 16);
        for i in 0..16 {
            let slot = &slots[&format!("color{i}")];
            for variant in ["default", "dark", "light"] {
                assert!(slot[variant]["hex"].as_str().unwrap().starts_with('#'));
                assert_eq!(slot[variant].as_object().unwrap().len(), 2);
            }
            assert_eq!(slot["default"], slot["dark"]);
            assert_eq!(slot["default"], slot["light"]);
        }
    }

    #[test]
    fn hex_stripped_drops_hash() {
        let json = parsed();
        let cyan = &json[THEME_KEY]["color6"]["default"];
        assert_eq!(cyan["hex"], "#3366cc");
        assert_eq!(cyan["hex_stripped"], "3366cc");
    }

    #[test]
    fn slots_are_in_numeric_order() {
        let out = test_theme().to_json().unwrap();
        let pos = |key: &str| out.find(&format!("\"{key}\":")).unwrap();
        for i in 0..15 {
            assert!(pos(&format!("color{i}")) < pos(&format!("color{}", i + 1)));
        }
        assert!(out.starts_with("{\"mochaccino\":{\"color0\":{\"default\":{\"hex\":\"#1a1a1a\""));
    }

    #[test]
    fn uniform_variants_share_one_color() {
        let variants = SlotVariants::uniform(Color::new(0xb2, 0xff, 0xf8));
        assert_eq!(variants.default.hex, "#b2fff8");
        assert_eq!(variants.default.hex_stripped, "b2fff8");
        assert_eq!(variants.default, variants.dark);
        assert_eq!(variants.default, variants.light);
    }
}
