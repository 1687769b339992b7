use crate::error::{CheckConfError, Result};
use crate::settings::types::Settings;
use std::path::Path;

/// Parse a settings file from the given path.
pub fn parse_settings_file(path: &Path) -> Result<Settings> {
	let content =
		std::fs::read_to_string(path).map_err(|source| CheckConfError::SettingsReadError {
			path: path.to_path_buf(),
			source,
		})?;

	parse_settings_str(&content, path)
}

/// Parse settings from a string (useful for testing).
pub fn parse_settings_str(content: &str, path: &Path) -> Result<Settings> {
	toml::from_str(content).map_err(|source| CheckConfError::SettingsParseError {
		path: path.to_path_buf(),
		source,
	})
}

/// Template written by `checkconf init`.
pub fn generate_init_template() -> String {
	r#"# checkconf settings
#
# Directories scanned for check configurations, in order.
# Each may contain <check>.yaml files and <check>.d/ directories.
search-paths = [
    "/etc/datadog-agent/conf.d",
]

# Largest configuration file read, in bytes (0 disables the limit).
max-file-size = 1048576
"#
	.to_string()
}
