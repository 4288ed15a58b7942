use std::ffi::OsString;
use std::path::PathBuf;

use crate::cli::{Args, ThemeMode};

/// Executable used when neither `--matugen` nor `MOCHACCINO_MATUGEN` is set.
pub const DEFAULT_MATUGEN: &str = "matugen";

/// Settings resolved from the command line and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// matugen config file, passed through on both invocations. `None` lets
    /// matugen fall back to its own default.
    pub matugen_config: Option<PathBuf>,
    /// matugen executable.
    pub matugen_program: PathBuf,
    /// Scheme variant to read seeds from; `None` reads `default`.
    pub mode: Option<ThemeMode>,
}

impl Config {
    pub fn from_args(args: &Args) -> Self {
        Self {
            matugen_config: args.config.clone().or_else(default_matugen_config),
            matugen_program: args
                .matugen
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MATUGEN)),
            mode: args.mode,
        }
    }
}

/// `$XDG_CONFIG_HOME/matugen/config.toml`, falling back to `$HOME/.config`.
/// `None` when neither variable is set.
pub fn default_matugen_config() -> Option<PathBuf> {
    matugen_config_from(|name| std::env::var_os(name))
}

fn matugen_config_from(var: impl Fn(&str) -> Option<OsString>) -> Option<PathBuf> {
    let non_empty = |name: &str| var(name).filter(|value| !value.is_empty());
    non_empty("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| non_empty("HOME").map(|home| PathBuf::from(home).join(".config")))
        .map(|dir| dir.join("matugen").join("config.toml"))
}
