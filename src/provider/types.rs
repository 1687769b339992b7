use crate::error::CheckConfError;
use std::path::PathBuf;

/// A normalized check configuration handed to the scheduler.
///
/// `init_config` and every entry of `instances` are standalone YAML documents,
/// re-encoded from the parsed source rather than copied from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
	/// Check name, derived from the file name or the `.d` directory name.
	pub name: String,

	/// Encoded `init_config` section (`null` when the source omits it).
	pub init_config: Vec<u8>,

	/// One encoded document per instance, in source order. Never empty.
	pub instances: Vec<Vec<u8>>,
}

impl CheckConfig {
	/// Decode the `init_config` blob back into a YAML value.
	pub fn init_config_value(&self) -> serde_yaml::Result<serde_yaml::Value> {
		serde_yaml::from_slice(&self.init_config)
	}

	/// Decode every instance blob back into YAML values.
	pub fn instance_values(&self) -> serde_yaml::Result<Vec<serde_yaml::Value>> {
		self.instances
			.iter()
			.map(|raw| serde_yaml::from_slice(raw))
			.collect()
	}
}

/// A check configuration with the file it was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedCheckConfig {
	/// The normalized configuration.
	pub config: CheckConfig,

	/// The path this config was parsed from.
	pub path: PathBuf,
}

/// A directory or file the walker could not turn into a configuration.
#[derive(Debug)]
pub struct SkippedEntry {
	pub path: PathBuf,
	pub error: CheckConfError,
}

/// Everything a single scan produced, in discovery order.
#[derive(Debug, Default)]
pub struct ScanReport {
	pub loaded: Vec<LoadedCheckConfig>,
	pub skipped: Vec<SkippedEntry>,
}

impl ScanReport {
	/// Drop the source annotations and keep only the configurations.
	pub fn configs(self) -> Vec<CheckConfig> {
		self.loaded.into_iter().map(|loaded| loaded.config).collect()
	}
}
