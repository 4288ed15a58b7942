use std::io::Write;

use crossterm::queue;
use crossterm::style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor};

use crate::color::Color;
use crate::pipeline::assign::AnsiPalette;

const SLOT_LABELS: [&str; 8] = ["Blk", "Red", "Grn", "Yel", "Blu", "Mag", "Cyn", "Wht"];

/// L* above which a swatch gets a black label instead of a white one.
const LIGHT_SWATCH_LSTAR: f64 = 60.0;

fn to_term(c: Color) -> TermColor {
    TermColor::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

fn label_color(c: Color) -> TermColor {
    if c.lstar() > LIGHT_SWATCH_LSTAR {
        TermColor::Black
    } else {
        TermColor::White
    }
}

/// Draw the palette as two rows of eight swatches (normal, then bright)
/// followed by sample text in every color on the background.
pub fn write_preview<W: Write>(out: &mut W, palette: &AnsiPalette) -> std::io::Result<()> {
    for row in palette.slots.chunks(8) {
        queue!(out, Print("  "))?;
        for (i, &c) in row.iter().enumerate() {
            queue!(
                out,
                SetBackgroundColor(to_term(c)),
                SetForegroundColor(label_color(c)),
                Print(format!("{:^6}", SLOT_LABELS[i])),
                ResetColor,
                Print(" ")
            )?;
        }
        queue!(out, Print("\n"))?;
    }

    let background = palette.slots[0];
    queue!(out, Print("\n"))?;
    for (name, c) in palette.iter().skip(1) {
        queue!(
            out,
            Print("  "),
            SetBackgroundColor(to_term(background)),
            SetForegroundColor(to_term(c)),
            Print(format!(" {name:<8}{} ", c.to_hex())),
            ResetColor,
            Print("\n")
        )?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::assign::generate_palette;

    fn render() -> String {
        let palette = generate_palette("#3366cc", "#1a1a1a").unwrap();
        let mut buf = Vec::new();
        write_preview(&mut buf, &palette).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn shows_every_label_twice() {
        let out = render();
        for label in SLOT_LABELS {
            assert_eq!(out.matches(label).count(), 2, "label {label}");
        }
    }

    #[test]
    fn emits_truecolor_escapes() {
        let out = render();
        // Background of the first swatch is the surface #1a1a1a.
        assert!(out.contains("\x1b[48;2;26;26;26m"));
        assert!(out.contains("#3366cc"));
    }

    #[test]
    fn lists_all_foreground_slots() {
        let out = render();
        assert!(out.contains("color15"));
        assert!(!out.contains("color0 "));
    }
}
