use crate::error::{CheckConfError, Result};
use crate::settings::parser::parse_settings_file;
use crate::settings::types::{LoadedSettings, Settings};
use std::path::{Path, PathBuf};

/// File name looked up in the working directory.
pub const SETTINGS_FILE_NAME: &str = "checkconf.toml";

/// Environment variable naming a settings file.
pub const SETTINGS_ENV_VAR: &str = "CHECKCONF_CONFIG";

/// Find and load the settings for this invocation.
///
/// The lookup order is:
/// 1. `explicit` (from `--config`), which must exist
/// 2. the file named by `$CHECKCONF_CONFIG`, which must exist
/// 3. `checkconf.toml` in `cwd`
/// 4. `~/.checkconf.toml`
///
/// Falls back to built-in defaults when nothing is found.
pub fn load_settings(explicit: Option<&Path>, cwd: &Path) -> Result<LoadedSettings> {
	let from_env = std::env::var_os(SETTINGS_ENV_VAR)
		.filter(|value| !value.is_empty())
		.map(PathBuf::from);
	let user_path = user_settings_path().ok();

	match resolve_settings_path(explicit, from_env, cwd, user_path) {
		Some(path) => {
			let settings = parse_settings_file(&path)?;
			Ok(LoadedSettings {
				settings,
				path: Some(path),
			})
		}
		None => Ok(LoadedSettings {
			settings: Settings::default(),
			path: None,
		}),
	}
}

/// Pick the settings file to load, if any.
fn resolve_settings_path(
	explicit: Option<&Path>,
	from_env: Option<PathBuf>,
	cwd: &Path,
	user_path: Option<PathBuf>,
) -> Option<PathBuf> {
	if let Some(path) = explicit {
		return Some(path.to_path_buf());
	}
	if from_env.is_some() {
		return from_env;
	}

	let local = cwd.join(SETTINGS_FILE_NAME);
	if local.is_file() {
		return Some(local);
	}

	user_path.filter(|path| path.is_file())
}

/// Get the path to the user's settings file.
pub fn user_settings_path() -> Result<PathBuf> {
	let home_dir = dirs::home_dir().ok_or(CheckConfError::HomeDirectoryNotFound)?;
	Ok(home_dir.join(".checkconf.toml"))
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;

	#[test]
	fn test_explicit_path_wins() {
		let temp_dir = tempfile::tempdir().unwrap();
		fs::write(temp_dir.path().join(SETTINGS_FILE_NAME), "").unwrap();
		let explicit = PathBuf::from("/somewhere/else.toml");

		let resolved = resolve_settings_path(
			Some(&explicit),
			Some(PathBuf::from("/from/env.toml")),
			temp_dir.path(),
			None,
		);

		assert_eq!(resolved, Some(explicit));
	}

	#[test]
	fn test_env_path_before_cwd() {
		let temp_dir = tempfile::tempdir().unwrap();
		fs::write(temp_dir.path().join(SETTINGS_FILE_NAME), "").unwrap();

		let resolved = resolve_settings_path(
			None,
			Some(PathBuf::from("/from/env.toml")),
			temp_dir.path(),
			None,
		);

		assert_eq!(resolved, Some(PathBuf::from("/from/env.toml")));
	}

	#[test]
	fn test_cwd_before_user_settings() {
		let temp_dir = tempfile::tempdir().unwrap();
		let local = temp_dir.path().join(SETTINGS_FILE_NAME);
		let user = temp_dir.path().join(".checkconf.toml");
		fs::write(&local, "").unwrap();
		fs::write(&user, "").unwrap();

		let resolved = resolve_settings_path(None, None, temp_dir.path(), Some(user));

		assert_eq!(resolved, Some(local));
	}

	#[test]
	fn test_user_settings_used_when_present() {
		let cwd = tempfile::tempdir().unwrap();
		let home = tempfile::tempdir().unwrap();
		let user = home.path().join(".checkconf.toml");

		assert_eq!(
			resolve_settings_path(None, None, cwd.path(), Some(user.clone())),
			None
		);

		fs::write(&user, "").unwrap();
		assert_eq!(
			resolve_settings_path(None, None, cwd.path(), Some(user.clone())),
			Some(user)
		);
	}

	#[test]
	fn test_load_explicit_settings() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join("custom.toml");
		fs::write(&path, "search-paths = [\"/etc/agent/conf.d\"]\n").unwrap();

		let loaded = load_settings(Some(&path), temp_dir.path()).unwrap();

		assert_eq!(loaded.path, Some(path));
		assert_eq!(
			loaded.settings.search_paths,
			vec![PathBuf::from("/etc/agent/conf.d")]
		);
	}

	#[test]
	fn test_load_missing_explicit_settings_fails() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join("missing.toml");

		let result = load_settings(Some(&path), temp_dir.path());

		assert!(matches!(
			result,
			Err(CheckConfError::SettingsReadError { .. })
		));
	}

	#[test]
	fn test_user_settings_path() {
		let path = user_settings_path();
		assert!(path.is_ok());
		let path = path.unwrap();
		assert!(path.ends_with(".checkconf.toml"));
	}
}
