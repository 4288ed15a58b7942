/// Canonical ANSI red hue.
pub const RED_HUE: f64 = 0.0;
/// Canonical ANSI green hue.
pub const GREEN_HUE: f64 = 0.33;
/// Canonical ANSI yellow hue.
pub const YELLOW_HUE: f64 = 0.14;

/// Move `base` toward `toward` by `amount` along the shorter arc of the hue
/// circle. All hues are fractions of a turn; the result lies in [0, 1).
pub fn blend_hue(base: f64, toward: f64, amount: f64) -> f64 {
    let mut diff = toward - base;
    if diff > 0.5 {
        diff -= 1.0;
    } else if diff < -0.5 {
        diff += 1.0;
    }
    let hue = (base + diff * amount).rem_euclid(1.0);
    // rem_euclid of a tiny negative rounds up to exactly 1.0
    if hue >= 1.0 {
        0.0
    } else {
        hue
    }
}
