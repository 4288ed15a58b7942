use crate::cli::ThemeMode;
use crate::color::{Color, ColorError, Hsv};
use crate::pipeline::container::derive_container;
use crate::pipeline::contrast::{
    adjust_bidirectional, adjust_lightness, Direction, ACCENT_TARGET, NORMAL_TARGET,
    SECONDARY_TARGET,
};
use crate::pipeline::hue::{blend_hue, GREEN_HUE, RED_HUE, YELLOW_HUE};

/// Template keys of the 16 ANSI slots, in slot order.
pub const SLOT_NAMES: [&str; 16] = [
    "color0", "color1", "color2", "color3", "color4", "color5", "color6", "color7", "color8",
    "color9", "color10", "color11", "color12", "color13", "color14", "color15",
];

/// Saturation and value floors so washed-out seeds still give a colorful palette.
const MIN_BASE_SATURATION: f64 = 0.5;
const MIN_BASE_VALUE: f64 = 0.5;

/// The two seed colors a palette is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedPair {
    pub primary: Color,
    pub surface: Color,
}

impl SeedPair {
    /// Parse both seeds, failing on the first malformed one.
    pub fn from_hex(primary: &str, surface: &str) -> Result<Self, ColorError> {
        Ok(Self {
            primary: Color::from_hex(primary)?,
            surface: Color::from_hex(surface)?,
        })
    }
}

/// The 16 ANSI colors 0-15.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnsiPalette {
    pub slots: [Color; 16],
}

impl AnsiPalette {
    /// Build every slot from the seed pair by walking [`SLOT_RULES`].
    pub fn from_seeds(seeds: SeedPair) -> Self {
        let ctx = SeedContext::new(seeds);
        let slots = std::array::from_fn(|i| {
            let color = ctx.apply(&SLOT_RULES[i]);
            tracing::debug!(slot = SLOT_NAMES[i], color = %color, "assigned slot");
            color
        });
        Self { slots }
    }

    /// Look up a slot by its template key (`color0`..`color15`).
    pub fn get(&self, name: &str) -> Option<Color> {
        SLOT_NAMES
            .iter()
            .position(|&n| n == name)
            .map(|i| self.slots[i])
    }

    /// `(key, color)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Color)> + '_ {
        SLOT_NAMES.iter().copied().zip(self.slots.iter().copied())
    }
}

/// Generate the palette for a primary/surface pair given as hex strings.
pub fn generate_palette(primary: &str, surface: &str) -> Result<AnsiPalette, ColorError> {
    let seeds = SeedPair::from_hex(primary, surface)?;
    Ok(AnsiPalette::from_seeds(seeds))
}

/// Where a derived slot takes its hue from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HueSource {
    /// Hue of the dark container color.
    Container,
    /// Canonical red nudged 12% toward the primary.
    Red,
    /// Canonical green nudged 10% toward the primary.
    Green,
    /// Canonical yellow nudged 4% toward the primary.
    Yellow,
    /// The primary's own hue. Saturation and value then scale the primary's
    /// own components rather than the floored base.
    Primary,
}

/// How a derived slot is tuned against the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Search {
    /// Convert directly, no contrast tuning.
    None,
    /// Only lighten toward the target contrast.
    Lighten(f64),
    /// Move whichever way reaches the target with the smaller change.
    Bidirectional(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlotRule {
    /// The surface seed itself.
    Surface,
    /// The primary seed itself.
    Primary,
    /// The dark container of the primary.
    Container,
    Derived {
        hue: HueSource,
        saturation: f64,
        value: f64,
        search: Search,
    },
}

const fn derived(hue: HueSource, saturation: f64, value: f64, search: Search) -> SlotRule {
    SlotRule::Derived {
        hue,
        saturation,
        value,
        search,
    }
}

/// One rule per slot, indexed by slot number.
pub const SLOT_RULES: [SlotRule; 16] = [
    // 0 black: background
    SlotRule::Surface,
    // 1 red
    derived(HueSource::Red, 1.1, 1.15, Search::Lighten(NORMAL_TARGET)),
    // 2 green
    derived(HueSource::Green, 1.0, 1.0, Search::Lighten(NORMAL_TARGET)),
    // 3 yellow
    derived(HueSource::Yellow, 1.1, 1.25, Search::Lighten(NORMAL_TARGET)),
    // 4 blue
    derived(HueSource::Primary, 1.2, 0.95, Search::Lighten(NORMAL_TARGET)),
    // 5 magenta
    SlotRule::Container,
    // 6 cyan
    SlotRule::Primary,
    // 7 white: foreground
    derived(HueSource::Container, 0.12, 1.05, Search::Lighten(NORMAL_TARGET)),
    // 8 bright black: comments
    derived(HueSource::Container, 0.15, 0.65, Search::Lighten(SECONDARY_TARGET)),
    // 9 bright red
    derived(HueSource::Red, 0.75, 1.35, Search::Bidirectional(ACCENT_TARGET)),
    // 10 bright green
    derived(HueSource::Green, 0.7, 1.2, Search::Bidirectional(ACCENT_TARGET)),
    // 11 bright yellow
    derived(HueSource::Yellow, 0.7, 1.5, Search::Bidirectional(ACCENT_TARGET)),
    // 12 bright blue
    derived(HueSource::Primary, 0.85, 1.1, Search::Bidirectional(ACCENT_TARGET)),
    // 13 bright magenta: pastel primary
    derived(HueSource::Primary, 0.7, 1.3, Search::None),
    // 14 bright cyan: light primary tint
    derived(HueSource::Primary, 0.45, 1.4, Search::None),
    // 15 bright white
    derived(HueSource::Container, 0.05, 1.45, Search::Lighten(NORMAL_TARGET)),
];

/// Everything the rules need, computed once per seed pair.
struct SeedContext {
    seeds: SeedPair,
    primary: Hsv,
    container: Color,
    container_hue: f64,
    base_saturation: f64,
    base_value: f64,
    bg_lstar: f64,
}

impl SeedContext {
    fn new(seeds: SeedPair) -> Self {
        let primary = seeds.primary.to_hsv();
        let container = derive_container(seeds.primary, ThemeMode::Dark);
        let bg_lstar = seeds.surface.lstar();
        tracing::debug!(
            primary = %seeds.primary,
            surface = %seeds.surface,
            bg_lstar,
            "deriving palette"
        );
        Self {
            seeds,
            primary,
            container,
            container_hue: container.to_hsv().h,
            base_saturation: primary.s.max(MIN_BASE_SATURATION),
            base_value: primary.v.max(MIN_BASE_VALUE),
            bg_lstar,
        }
    }

    fn hue(&self, source: HueSource) -> f64 {
        match source {
            HueSource::Container => self.container_hue,
            HueSource::Red => blend_hue(RED_HUE, self.primary.h, 0.12),
            HueSource::Green => blend_hue(GREEN_HUE, self.primary.h, 0.10),
            HueSource::Yellow => blend_hue(YELLOW_HUE, self.primary.h, 0.04),
            HueSource::Primary => self.primary.h,
        }
    }

    fn apply(&self, rule: &SlotRule) -> Color {
        match *rule {
            SlotRule::Surface => self.seeds.surface,
            SlotRule::Primary => self.seeds.primary,
            SlotRule::Container => self.container,
            SlotRule::Derived {
                hue,
                saturation,
                value,
                search,
            } => {
                let (base_s, base_v) = match hue {
                    HueSource::Primary => (self.primary.s, self.primary.v),
                    _ => (self.base_saturation, self.base_value),
                };
                let start = Hsv::new(self.hue(hue), base_s * saturation, base_v * value).clamped();
                let tuned = match search {
                    Search::None => start,
                    Search::Lighten(target) => {
                        adjust_lightness(start, self.bg_lstar, target, Direction::Lighten)
                    }
                    Search::Bidirectional(target) => {
                        adjust_bidirectional(start, self.bg_lstar, target)
                    }
                };
                tuned.to_color()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hexes(palette: &AnsiPalette) -> Vec<String> {
        palette.slots.iter().map(|c| c.to_hex()).collect()
    }

    #[test]
    fn blue_seed_on_dark_surface() {
        let palette = generate_palette("#3366cc", "#1a1a1a").unwrap();
        assert_eq!(
            hexes(&palette),
            [
                "#1a1a1a", "#eb295f", "#33cc4a", "#fff52d", "#1966ff", "#001f5e", "#3366cc",
                "#c3c9d6", "#767b85", "#ff7098", "#74f587", "#fff979", "#5181e0", "#79a6ff",
                "#a9c6ff", "#f5f9ff",
            ]
        );
    }

    #[test]
    fn purple_seed_on_light_surface() {
        let palette = generate_palette("#6750a4", "#fef7ff").unwrap();
        assert_eq!(
            hexes(&palette),
            [
                "#fef7ff", "#de617b", "#50a462", "#cdaf5a", "#8d62ff", "#18054c", "#6750a4",
                "#a4a2ac", "#9a96a3", "#dd889a", "#7ec58d", "#f6df9e", "#7b66b4", "#9e89d5",
                "#bfb1e6", "#e9e8ee",
            ]
        );
    }

    #[test]
    fn seeds_are_kept_verbatim() {
        let palette = generate_palette("E8C170", "#141414").unwrap();
        assert_eq!(palette.get("color0").unwrap().to_hex(), "#141414");
        assert_eq!(palette.get("color6").unwrap().to_hex(), "#e8c170");
    }

    #[test]
    fn magenta_is_dark_container() {
        let palette = generate_palette("#3366cc", "#1a1a1a").unwrap();
        let primary = Color::from_hex("#3366cc").unwrap();
        assert_eq!(palette.slots[5], derive_container(primary, ThemeMode::Dark));
    }

    #[test]
    fn primary_hue_slots_keep_primary_hue() {
        let palette = generate_palette("#e8c170", "#141414").unwrap();
        let primary_hue = Color::from_hex("#e8c170").unwrap().to_hsv().h;
        for slot in [4, 12, 13, 14] {
            let hue = palette.slots[slot].to_hsv().h;
            assert!(
                (hue - primary_hue).abs() < 0.02,
                "slot {slot} hue {hue:.4} drifted from {primary_hue:.4}"
            );
        }
    }

    #[test]
    fn monochrome_seed_still_has_color() {
        let palette = generate_palette("#808080", "#808080").unwrap();
        assert_eq!(palette.slots[0], palette.slots[6]);
        // The saturation floor keeps red, green and yellow chromatic.
        for slot in [1, 2, 3, 9, 10, 11] {
            let hsv = palette.slots[slot].to_hsv();
            assert!(hsv.s > 0.2, "slot {slot} is gray: {}", palette.slots[slot]);
        }
        assert_eq!(palette.slots[2].to_hex(), "#9bff80");
    }

    #[test]
    fn invalid_primary_is_rejected() {
        let err = generate_palette("#12345", "#141414").unwrap_err();
        assert!(matches!(err, ColorError::InvalidColorFormat { .. }));
    }

    #[test]
    fn invalid_surface_is_rejected() {
        assert!(generate_palette("#3366cc", "zzzzzz").is_err());
    }

    #[test]
    fn iter_yields_named_slots_in_order() {
        let palette = generate_palette("#3366cc", "#1a1a1a").unwrap();
        let names: Vec<&str> = palette.iter().map(|(name, _)| name).collect();
        assert_eq!(names, SLOT_NAMES);
        assert_eq!(palette.get("color16"), None);
    }

    #[test]
    fn rule_table_shape() {
        let searched = SLOT_RULES
            .iter()
            .filter(|rule| {
                matches!(
                    rule,
                    SlotRule::Derived {
                        search: Search::Lighten(_) | Search::Bidirectional(_),
                        ..
                    }
                )
            })
            .count();
        assert_eq!(searched, 11);
        assert_eq!(SLOT_RULES[0], SlotRule::Surface);
        assert_eq!(SLOT_RULES[5], SlotRule::Container);
        assert_eq!(SLOT_RULES[6], SlotRule::Primary);
    }
}
