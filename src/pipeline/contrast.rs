use crate::color::{delta_l, Hsv};

/// Contrast for regular-intensity slots.
pub const NORMAL_TARGET: f64 = 40.0;
/// Contrast for de-emphasized text (bright black).
pub const SECONDARY_TARGET: f64 = 35.0;
/// Contrast for bright accent slots.
pub const ACCENT_TARGET: f64 = 24.5;
/// Contrast for dim variants.
pub const DIM_TARGET: f64 = 17.5;

/// Value increment per search step.
const STEP: f64 = 0.01;
const MAX_STEPS: u32 = 100;
/// Stop once the achieved contrast is this close to the target, in L* units.
const TOLERANCE: f64 = 1.0;

/// Which way the value component may move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Lighten,
    Darken,
}

/// Distance between the contrast of `candidate` against `bg_lstar` and `target`.
fn miss(candidate: Hsv, bg_lstar: f64, target: f64) -> f64 {
    (delta_l(candidate.lstar(), bg_lstar) - target).abs()
}

/// Step the value of `color` in one direction until its L* differs from the
/// background by roughly `target`.
///
/// Scans at most 100 steps of 0.01, clamped to [0, 1], keeping the value with
/// the smallest miss. Returns early once the miss drops below 1.0. Hue and
/// saturation are never touched; if nothing beats the starting value it is
/// returned unchanged.
pub fn adjust_lightness(color: Hsv, bg_lstar: f64, target: f64, direction: Direction) -> Hsv {
    let mut best_v = color.v;
    let mut best_miss = miss(color, bg_lstar, target);

    for i in 0..MAX_STEPS {
        let offset = STEP * f64::from(i);
        let v = match direction {
            Direction::Lighten => color.v + offset,
            Direction::Darken => color.v - offset,
        }
        .clamp(0.0, 1.0);

        let candidate_miss = miss(Hsv { v, ..color }, bg_lstar, target);
        if candidate_miss < best_miss {
            best_miss = candidate_miss;
            best_v = v;
        }

        if best_miss < TOLERANCE {
            break;
        }
    }

    tracing::trace!(
        start = color.v,
        best = best_v,
        miss = best_miss,
        ?direction,
        "lightness search done"
    );

    Hsv { v: best_v, ..color }
}

/// Search both directions and keep the result that moved the value least.
/// Ties go to lightening.
pub fn adjust_bidirectional(color: Hsv, bg_lstar: f64, target: f64) -> Hsv {
    let lighter = adjust_lightness(color, bg_lstar, target, Direction::Lighten);
    let darker = adjust_lightness(color, bg_lstar, target, Direction::Darken);

    if (lighter.v - color.v).abs() <= (darker.v - color.v).abs() {
        lighter
    } else {
        darker
    }
}
