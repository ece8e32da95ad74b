use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::ensure_itinera_home;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultsSection {
    /// Used when `--destination` is not passed. Empty means "Destination".
    pub destination: String,
    /// Trip length when neither `--days` nor `--start/--end` is given.
    pub days: u32,
    /// Replace an empty parse with the built-in sample itinerary.
    pub sample_fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSection {
    pub format: OutputFormat,
    pub pretty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Csv,
    Text,
}

impl Default for DefaultsSection {
    fn default() -> Self {
        Self {
            destination: String::new(),
            days: 3,
            sample_fallback: true,
        }
    }
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty: true,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_itinera_home()?.join("config.toml"))
}

/// Load from `path`, or the default location. A missing file yields defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(path: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Write a default config unless one already exists. Returns the path and
/// whether a file was written.
pub fn init_config(path: Option<&Path>) -> Result<(PathBuf, bool)> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    if p.exists() {
        return Ok((p, false));
    }
    save_config(&p, &Config::default())?;
    Ok((p, true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(Some(&dir.path().join("nope.toml"))).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_init_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let (p, written) = init_config(Some(&path)).unwrap();
        assert!(written);
        assert_eq!(p, path);
        let (_, written_again) = init_config(Some(&path)).unwrap();
        assert!(!written_again);

        assert_eq!(load_config(Some(&path)).unwrap(), Config::default());
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[defaults]\ndestination = \"Lisbon\"\ndays = 4\nsample_fallback = false\n",
        )
        .unwrap();

        let cfg = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.defaults.destination, "Lisbon");
        assert_eq!(cfg.defaults.days, 4);
        assert!(!cfg.defaults.sample_fallback);
        assert_eq!(cfg.output, OutputSection::default());
    }

    #[test]
    fn test_bad_format_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[output]\nformat = \"yaml\"\npretty = true\n").unwrap();
        assert!(load_config(Some(&path)).is_err());
    }
}
