use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mochaccino::cli::Args;
use mochaccino::config::Config;
use mochaccino::matugen::Matugen;
use mochaccino::pipeline::assign::{AnsiPalette, SeedPair};
use mochaccino::preview::write_preview;
use mochaccino::theme::MatugenTheme;

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    let config = Config::from_args(&args);
    let matugen = Matugen::new(&config.matugen_program, config.matugen_config.clone());

    let seeds = match (args.primary, args.surface) {
        (Some(primary), Some(surface)) => SeedPair { primary, surface },
        _ => {
            let image = args
                .image
                .as_deref()
                .context("an image is required unless --primary and --surface are given")?;
            matugen
                .extract_seeds(image, config.mode)
                .with_context(|| format!("failed to extract colors from {}", image.display()))?
        }
    };

    let palette = AnsiPalette::from_seeds(seeds);
    let theme = MatugenTheme::from_palette(palette.clone());
    let json = theme.to_json().context("failed to serialize palette")?;

    if args.preview {
        let mut stdout = std::io::stdout().lock();
        write_preview(&mut stdout, &palette).context("failed to print preview")?;
    }

    match args.image.as_deref() {
        Some(image) if !args.print_json => {
            matugen
                .render(image, &json)
                .context("failed to render matugen templates")?;
        }
        _ => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("failed to write palette")?;
        }
    }

    Ok(())
}
