use crate::cli::ThemeMode;
use crate::color::Color;

/// Derive the tonal "container" companion of `primary`.
///
/// Dark: value x0.463, saturation x1.834 (capped). Light: value x1.77
/// (capped), saturation x0.32. The result is quantized to 8-bit channels.
pub fn derive_container(primary: Color, mode: ThemeMode) -> Color {
    let mut hsv = primary.to_hsv();
    match mode {
        ThemeMode::Light => {
            hsv.v = (hsv.v * 1.77).min(1.0);
            hsv.s *= 0.32;
        }
        ThemeMode::Dark => {
            hsv.v *= 0.463;
            hsv.s = (hsv.s * 1.834).min(1.0);
        }
    }
    hsv.to_color()
}
