use std::path::PathBuf;

use clap::Parser;

use crate::color::Color;

/// Generate a 16-color ANSI palette from a wallpaper's Material You colors
/// and render matugen templates with it.
#[derive(Parser, Debug)]
#[command(name = "mochaccino", version, about)]
pub struct Args {
    /// Path to the wallpaper image
    #[arg(required_unless_present_all = ["primary", "surface"])]
    pub image: Option<PathBuf>,

    /// matugen config file (defaults to ~/.config/matugen/config.toml)
    #[arg(short, long, env = "MOCHACCINO_CONFIG")]
    pub config: Option<PathBuf>,

    /// matugen executable
    #[arg(long, env = "MOCHACCINO_MATUGEN")]
    pub matugen: Option<PathBuf>,

    /// Use this primary color instead of extracting one
    #[arg(long, value_parser = parse_color, requires = "surface")]
    pub primary: Option<Color>,

    /// Use this surface color instead of extracting one
    #[arg(long, value_parser = parse_color, requires = "primary")]
    pub surface: Option<Color>,

    /// Read seeds from this scheme variant instead of the default one
    #[arg(short, long, value_enum)]
    pub mode: Option<ThemeMode>,

    /// Print the palette JSON to stdout instead of rendering templates
    #[arg(long)]
    pub print_json: bool,

    /// Print a colored terminal preview of the palette
    #[arg(long)]
    pub preview: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    /// Key of this variant in matugen's color scheme output.
    pub fn scheme_key(self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }
}

fn parse_color(s: &str) -> Result<Color, String> {
    Color::from_hex(s).map_err(|e| e.to_string())
}
