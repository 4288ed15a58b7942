//! Driving the external `matugen` process.
//!
//! matugen runs twice per invocation: once in dry-run mode to extract the
//! Material You scheme of the wallpaper, and once more to render its
//! templates with the generated palette injected via `--import-json-string`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde::Deserialize;
use thiserror::Error;

use crate::cli::ThemeMode;
use crate::color::{Color, ColorError};
use crate::pipeline::assign::SeedPair;

#[derive(Debug, Error)]
pub enum MatugenError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("matugen failed ({status}): {stderr}")]
    Failed {
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("unexpected matugen output: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("matugen output has no '{variant}' value for color '{name}'")]
    MissingColor { name: String, variant: String },
    #[error(transparent)]
    Color(#[from] ColorError),
}

/// Dry-run output of `matugen image --json hex`.
#[derive(Debug, Deserialize)]
struct SchemeOutput {
    colors: HashMap<String, ColorVariants>,
}

#[derive(Debug, Deserialize)]
struct ColorVariants {
    default: Option<HexValue>,
    dark: Option<HexValue>,
    light: Option<HexValue>,
}

/// Older releases emit the hex string directly, newer ones wrap it.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HexValue {
    Plain(String),
    Wrapped { color: String },
}

impl HexValue {
    fn as_str(&self) -> &str {
        match self {
            HexValue::Plain(hex) => hex,
            HexValue::Wrapped { color } => color,
        }
    }
}

impl SchemeOutput {
    fn color(&self, name: &str, mode: Option<ThemeMode>) -> Result<Color, MatugenError> {
        let variant = mode.map_or("default", ThemeMode::scheme_key);
        let missing = || MatugenError::MissingColor {
            name: name.to_string(),
            variant: variant.to_string(),
        };
        let variants = self.colors.get(name).ok_or_else(missing)?;
        let value = match mode {
            None => &variants.default,
            Some(ThemeMode::Dark) => &variants.dark,
            Some(ThemeMode::Light) => &variants.light,
        };
        let hex = value.as_ref().ok_or_else(missing)?;
        Ok(Color::from_hex(hex.as_str())?)
    }
}

/// Parse matugen's dry-run JSON into the primary/surface seed pair.
pub fn parse_seeds(json: &str, mode: Option<ThemeMode>) -> Result<SeedPair, MatugenError> {
    let output: SchemeOutput = serde_json::from_str(json)?;
    Ok(SeedPair {
        primary: output.color("primary", mode)?,
        surface: output.color("surface", mode)?,
    })
}

/// A configured matugen executable.
#[derive(Debug, Clone)]
pub struct Matugen {
    program: PathBuf,
    config: Option<PathBuf>,
}

impl Matugen {
    /// Without a `config`, `--config` is omitted and matugen uses its own default.
    pub fn new(program: impl Into<PathBuf>, config: Option<PathBuf>) -> Self {
        Self {
            program: program.into(),
            config,
        }
    }

    fn command(&self, image: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("image").arg(image);
        cmd
    }

    fn push_config(&self, cmd: &mut Command) {
        if let Some(config) = &self.config {
            cmd.arg("--config").arg(config);
        }
    }

    /// Extract the primary and surface seeds of `image`.
    pub fn extract_seeds(
        &self,
        image: &Path,
        mode: Option<ThemeMode>,
    ) -> Result<SeedPair, MatugenError> {
        let mut cmd = self.command(image);
        cmd.args(["--json", "hex", "--dry-run"]);
        self.push_config(&mut cmd);

        let output = self.run(cmd)?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let seeds = parse_seeds(&stdout, mode)?;
        tracing::info!(primary = %seeds.primary, surface = %seeds.surface, "extracted seeds");
        Ok(seeds)
    }

    /// Render matugen's templates for `image` with `palette_json` imported.
    pub fn render(&self, image: &Path, palette_json: &str) -> Result<(), MatugenError> {
        let mut cmd = self.command(image);
        self.push_config(&mut cmd);
        cmd.arg("--import-json-string").arg(palette_json);

        self.run(cmd)?;
        tracing::info!(image = %image.display(), "rendered templates");
        Ok(())
    }

    fn run(&self, mut cmd: Command) -> Result<Output, MatugenError> {
        tracing::debug!(?cmd, "running matugen");
        let output = cmd.output().map_err(|source| MatugenError::Spawn {
            program: self.program.display().to_string(),
            source,
        })?;
        if !output.status.success() {
            return Err(MatugenError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output)
    }
}
