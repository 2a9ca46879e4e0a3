// Configuration sources (files and environment)
use crate::error::{ConfigError, Result};
use figment::providers::{Env, Format, Toml, Yaml};
use figment::Figment;
use std::path::{Path, PathBuf};

/// Prefix of the environment variables read by [`ConfigSource::Env`]
pub const ENV_PREFIX: &str = "AGING_";

/// A configuration layer merged on top of the defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// YAML (`.yaml`, `.yml`) or TOML (`.toml`) file; must exist
    File(PathBuf),
    /// `AGING_*` environment variables
    Env,
}

impl ConfigSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    pub fn env() -> Self {
        Self::Env
    }

    /// Merge this source into `figment`.
    ///
    /// # Errors
    ///
    /// A file source fails when the file is missing or its extension is not
    /// a supported format.
    pub fn merge_into(&self, figment: Figment) -> Result<Figment> {
        match self {
            Self::File(path) => {
                if !path.is_file() {
                    return Err(ConfigError::SourceNotFound(path.clone()));
                }
                match file_format(path) {
                    Some(FileFormat::Yaml) => Ok(figment.merge(Yaml::file(path))),
                    Some(FileFormat::Toml) => Ok(figment.merge(Toml::file(path))),
                    None => Err(ConfigError::UnsupportedFormat(path.clone())),
                }
            }
            Self::Env => Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Yaml,
    Toml,
}

fn file_format(path: &Path) -> Option<FileFormat> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "yaml" | "yml" => Some(FileFormat::Yaml),
        "toml" => Some(FileFormat::Toml),
        _ => None,
    }
}
