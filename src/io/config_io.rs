use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::AppConfig;

/// File name searched for when no explicit config path is given
pub const CONFIG_FILE: &str = "slotgrid.toml";

/// Error type for config I/O
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse slotgrid.toml: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("could not edit slotgrid.toml: {0}")]
    EditError(#[from] toml_edit::TomlError),
    #[error("invalid [grid] configuration: {0}")]
    Invalid(String),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Walk up from `start` looking for `slotgrid.toml`
pub fn discover_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Read and validate a config file
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config: AppConfig = toml::from_str(&text)?;
    if let Some(problem) = config.grid.validation_error() {
        return Err(ConfigError::Invalid(problem));
    }
    Ok(config)
}

/// Load from an explicit path, a discovered file, or fall back to defaults.
/// Returns the config and the file it came from, if any.
pub fn resolve_config(
    explicit: Option<&Path>,
    cwd: &Path,
) -> Result<(AppConfig, Option<PathBuf>), ConfigError> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => discover_config(cwd),
    };
    match path {
        Some(p) => Ok((load_config(&p)?, Some(p))),
        None => Ok((AppConfig::default(), None)),
    }
}

/// Write the `[session]` table back to disk, preserving the rest of the
/// file's formatting. Creates the file if missing.
pub fn write_session(
    path: &Path,
    semester: &str,
    location: &str,
    courses: &[String],
) -> Result<(), ConfigError> {
    let text = if path.exists() {
        fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?
    } else {
        String::new()
    };
    let mut doc: toml_edit::DocumentMut = text.parse()?;
    set_session(&mut doc, semester, location, courses);
    fs::write(path, doc.to_string())?;
    Ok(())
}

/// Update the session fields in a config document
pub fn set_session(
    doc: &mut toml_edit::DocumentMut,
    semester: &str,
    location: &str,
    courses: &[String],
) {
    if !doc.contains_key("session") {
        doc["session"] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    doc["session"]["semester"] = toml_edit::value(semester);
    doc["session"]["location"] = toml_edit::value(location);
    let mut list = toml_edit::Array::new();
    for course in courses {
        list.push(course.as_str());
    }
    doc["session"]["courses"] = toml_edit::value(list);
}
