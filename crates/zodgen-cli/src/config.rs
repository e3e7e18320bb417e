//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use zodgen::{ZodgenError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for ZodgenError {
    fn from(err: ConfigError) -> Self {
        ZodgenError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (zodgen/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed or fails validation
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, ZodgenError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("zodgen/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "zodgen", "zodgen") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load and validate configuration from a TOML file
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, ZodgenError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    validate(&config)?;
    Ok(config)
}

/// Check the values serde cannot check on its own.
fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    let header = config.output().header();
    if header.contains('\n') {
        return Err(ConfigError::Validation(
            "output.header must be a single line".to_string(),
        ));
    }

    for (name, expression) in config.types().primitives() {
        if name.trim().is_empty() || name.chars().any(char::is_whitespace) {
            return Err(ConfigError::Validation(format!(
                "types.primitives has an invalid type name `{name}`"
            )));
        }
        if expression.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "types.primitives.{name} must not be empty"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use zodgen::config::UnknownTypePolicy;

    use super::*;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("config.toml");
        fs::write(&path, content).expect("Failed to write config");
        (dir, path)
    }

    #[test]
    fn test_load_explicit_config() {
        let (_dir, path) = write_config(
            "strict = true\n[types]\nunknown = \"omit\"\n[types.primitives]\nDateTime = \"z.coerce.date()\"\n",
        );

        let config = load_config(Some(&path)).unwrap();

        assert!(config.strict());
        assert_eq!(config.types().unknown(), UnknownTypePolicy::Omit);
        assert_eq!(
            config.types().primitives().get("DateTime").map(String::as_str),
            Some("z.coerce.date()")
        );
    }

    #[test]
    fn test_missing_explicit_config() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("absent.toml");

        let err = load_config(Some(&path)).unwrap_err();

        assert!(matches!(err, ZodgenError::Config(msg) if msg.starts_with("Missing configuration file")));
    }

    #[test]
    fn test_invalid_toml() {
        let (_dir, path) = write_config("[types]\nunknown = \"maybe\"\n");

        let err = load_config(Some(&path)).unwrap_err();

        assert!(matches!(err, ZodgenError::Config(msg) if msg.starts_with("Failed to parse TOML")));
    }

    #[test]
    fn test_multiline_header_rejected() {
        let (_dir, path) = write_config("[output]\nheader = \"a\\nb\"\n");

        let err = load_config(Some(&path)).unwrap_err();

        assert!(matches!(err, ZodgenError::Config(msg) if msg.contains("single line")));
    }

    #[test]
    fn test_empty_primitive_expression_rejected() {
        let (_dir, path) = write_config("[types.primitives]\nFloat = \"  \"\n");

        let err = load_config(Some(&path)).unwrap_err();

        assert!(matches!(err, ZodgenError::Config(msg) if msg.contains("types.primitives.Float")));
    }
}
