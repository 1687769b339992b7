use std::path::PathBuf;

/// Library-level structured errors for checkconf.
///
/// Per-entry provider failures are recorded and logged rather than returned
/// from a collection; the CLI binary wraps the rest with `anyhow`.
#[derive(Debug, thiserror::Error)]
pub enum CheckConfError {
	#[error("Failed to list directory: {path}: {source}")]
	DirectoryListError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to read config file: {path}: {source}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Config file too large: {path} ({size} bytes, limit is {limit})")]
	FileTooLarge { path: PathBuf, size: u64, limit: u64 },

	#[error("Failed to parse config file: {path}: {source}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: serde_yaml::Error,
	},

	#[error("Failed to encode configuration from: {path}")]
	ConfigEncodeError {
		path: PathBuf,
		#[source]
		source: serde_yaml::Error,
	},

	#[error("Configuration file contains no valid instances: {path}")]
	NoInstances { path: PathBuf },

	#[error("Failed to read settings file: {path}")]
	SettingsReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse settings file: {path}")]
	SettingsParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,
}

/// Result type alias using CheckConfError.
pub type Result<T> = std::result::Result<T, CheckConfError>;
