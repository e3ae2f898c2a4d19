//! Runtime settings, read from an optional TOML file and `BIBLIO_*`
//! environment variables.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "biblio.toml";

pub const DEFAULT_DATABASE_PATH: &str = "biblioteca.db";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// SQLite database file; created on first use.
  pub database_path: PathBuf,
}

impl Settings {
  /// Layer defaults, the config file and the environment, in that order.
  ///
  /// An explicitly given `file` must exist; the default one is optional.
  pub fn load(file: Option<&Path>) -> Result<Self, config::ConfigError> {
    let source = match file {
      Some(path) => config::File::from(path.to_path_buf()).required(true),
      None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let mut settings: Settings = config::Config::builder()
      .set_default("database_path", DEFAULT_DATABASE_PATH)?
      .add_source(source)
      .add_source(config::Environment::with_prefix("BIBLIO"))
      .build()?
      .try_deserialize()?;

    settings.database_path = expand_tilde(&settings.database_path);
    Ok(settings)
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
