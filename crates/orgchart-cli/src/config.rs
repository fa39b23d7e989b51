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

use orgchart::{OrgChartError, config::AppConfig, export::svg::ChartStyle};

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

impl From<ConfigError> for OrgChartError {
    fn from(err: ConfigError) -> Self {
        OrgChartError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (orgchart/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed or holds invalid values
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, OrgChartError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("orgchart/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "orgchart", "orgchart") {
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
///
/// # Errors
///
/// Returns error if:
/// - File doesn't exist
/// - File cannot be read
/// - TOML parsing fails
/// - A layout value or style color is invalid
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, OrgChartError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;

    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    validate(&config)?;
    debug!(config:?; "Loaded configuration");

    Ok(config)
}

/// Rejects configurations that would only fail later, at render time.
fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    config
        .layout()
        .validate()
        .map_err(ConfigError::Validation)?;
    ChartStyle::from_config(config.style()).map_err(ConfigError::Validation)?;

    let scale = config.export().scale();
    if !scale.is_finite() || scale <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "Invalid export.scale in config: {scale}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_explicit_file() {
        let file = config_file(
            r##"
            [layout]
            box_width = 200.0
            fit_labels = true

            [style]
            root_fill_color = "#1e40af"

            [export]
            scale = 2.0
            file_name = "team.png"
            "##,
        );

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.layout().box_size().width(), 200.0);
        assert_eq!(config.layout().box_size().height(), 60.0);
        assert!(config.layout().fit_labels());
        assert_eq!(config.export().scale(), 2.0);
        assert_eq!(config.export().file_name(), "team.png");
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = load_config(Some("/definitely/not/here/config.toml")).unwrap_err();
        assert!(matches!(err, OrgChartError::Config(msg) if msg.contains("Missing configuration file")));
    }

    #[test]
    fn test_invalid_toml() {
        let file = config_file("[layout\nbox_width = ");
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, OrgChartError::Config(msg) if msg.starts_with("Failed to parse TOML")));
    }

    #[test]
    fn test_invalid_color_fails_at_load() {
        let file = config_file("[style]\nconnector_color = \"greyish\"\n");
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, OrgChartError::Config(msg) if msg.contains("style.connector_color")));
    }

    #[test]
    fn test_invalid_scale_fails_at_load() {
        let file = config_file("[export]\nscale = 0.0\n");
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, OrgChartError::Config(msg) if msg.contains("export.scale")));
    }
}
