use crate::provider::FileConfigProvider;
use serde::Deserialize;
use std::path::PathBuf;

/// Default per-file size cap for check configuration files (1 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Top-level settings from a `checkconf.toml` file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
	/// Directories scanned for check configurations, in order.
	#[serde(default)]
	pub search_paths: Vec<PathBuf>,

	/// Largest configuration file that will be read, in bytes.
	/// Zero disables the limit.
	#[serde(default = "default_max_file_size")]
	pub max_file_size: u64,
}

fn default_max_file_size() -> u64 {
	DEFAULT_MAX_FILE_SIZE
}

impl Default for Settings {
	fn default() -> Self {
		Settings {
			search_paths: Vec::new(),
			max_file_size: DEFAULT_MAX_FILE_SIZE,
		}
	}
}

/// Settings with the file they were loaded from, if any.
#[derive(Debug, Clone)]
pub struct LoadedSettings {
	/// The parsed settings.
	pub settings: Settings,

	/// The path these settings were loaded from (`None` for built-in defaults).
	pub path: Option<PathBuf>,
}

impl Settings {
	/// The effective size limit, with zero meaning unlimited.
	pub fn file_size_limit(&self) -> Option<u64> {
		(self.max_file_size > 0).then_some(self.max_file_size)
	}

	/// Build a provider scanning `roots`, or the configured search paths when empty.
	pub fn provider(&self, roots: &[PathBuf]) -> FileConfigProvider {
		let paths: &[PathBuf] = if roots.is_empty() {
			&self.search_paths
		} else {
			roots
		};
		FileConfigProvider::new(paths.iter().cloned()).with_max_file_size(self.file_size_limit())
	}
}
