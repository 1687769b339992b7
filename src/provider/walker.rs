use crate::error::{CheckConfError, Result};
use crate::provider::parser::parse_check_config;
use crate::provider::types::{CheckConfig, LoadedCheckConfig, ScanReport, SkippedEntry};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

const EXAMPLE_SUFFIX: &str = ".example";
const OVERRIDE_DIR_SUFFIX: &str = ".d";

/// A source of check configurations.
pub trait ConfigProvider {
	/// Collect every check configuration currently available.
	fn collect(&self) -> Result<Vec<CheckConfig>>;
}

/// Collects check configuration files from a list of search roots.
///
/// Each root is scanned one level deep:
/// - `<check>.<ext>` files are parsed as the configuration for `<check>`
/// - `<check>.d/` directories contribute one configuration per regular file inside
/// - anything ending in `.example` is ignored at the root level
///
/// Unreadable or invalid entries are logged and skipped; a scan never fails.
#[derive(Debug, Clone, Default)]
pub struct FileConfigProvider {
	paths: Vec<PathBuf>,
	max_file_size: Option<u64>,
}

impl FileConfigProvider {
	/// Create a provider searching the given roots, in order.
	pub fn new<I, P>(paths: I) -> Self
	where
		I: IntoIterator<Item = P>,
		P: Into<PathBuf>,
	{
		FileConfigProvider {
			paths: paths.into_iter().map(Into::into).collect(),
			max_file_size: None,
		}
	}

	/// Reject configuration files larger than `limit` bytes.
	pub fn with_max_file_size(mut self, limit: Option<u64>) -> Self {
		self.max_file_size = limit;
		self
	}

	/// The search roots, in scan order.
	pub fn paths(&self) -> &[PathBuf] {
		&self.paths
	}

	/// Scan every root and report both loaded configurations and skipped entries.
	pub fn scan(&self) -> ScanReport {
		let mut report = ScanReport::default();

		for root in &self.paths {
			tracing::info!("Searching for configuration files at: {}", root.display());

			let entries = match sorted_entries(root) {
				Ok(entries) => entries,
				Err(error) => {
					tracing::warn!("Skipping, {}", error);
					report.skipped.push(SkippedEntry {
						path: root.clone(),
						error,
					});
					continue;
				}
			};

			for file_name in entries {
				self.scan_entry(root, &file_name, &mut report);
			}
		}

		report
	}

	fn scan_entry(&self, root: &Path, file_name: &OsString, report: &mut ScanReport) {
		let name = file_name.to_string_lossy();
		let path = root.join(file_name);

		if name.ends_with(EXAMPLE_SUFFIX) {
			tracing::debug!("Skipping file: {}", name);
			return;
		}

		let metadata = match std::fs::metadata(&path) {
			Ok(metadata) => metadata,
			Err(source) => {
				let error = CheckConfError::ConfigReadError {
					path: path.clone(),
					source,
				};
				tracing::warn!("{} is not a valid config file: {}", name, error);
				report.skipped.push(SkippedEntry { path, error });
				return;
			}
		};

		if metadata.is_dir() {
			match name.strip_suffix(OVERRIDE_DIR_SUFFIX) {
				Some(check_name) => self.scan_override_dir(check_name, &path, report),
				None => {
					tracing::debug!("Not a config folder, skipping directory: {}", name);
				}
			}
		} else if metadata.is_file() {
			self.load_file(strip_extension(&name), &name, path, report);
		} else {
			tracing::debug!("Not a regular file, skipping: {}", name);
		}
	}

	/// Load every regular file of a `<check>.d` directory as a config for `<check>`.
	fn scan_override_dir(&self, check_name: &str, dir: &Path, report: &mut ScanReport) {
		let entries = match sorted_entries(dir) {
			Ok(entries) => entries,
			Err(error) => {
				tracing::warn!("Skipping config directory: {}", error);
				report.skipped.push(SkippedEntry {
					path: dir.to_path_buf(),
					error,
				});
				return;
			}
		};

		for file_name in entries {
			let path = dir.join(&file_name);
			let name = file_name.to_string_lossy();

			match std::fs::metadata(&path) {
				Ok(metadata) if metadata.is_file() => {
					self.load_file(check_name, &name, path, report);
				}
				Ok(_) => {
					tracing::debug!("Not a regular file, skipping: {}", path.display());
				}
				Err(source) => {
					let error = CheckConfError::ConfigReadError {
						path: path.clone(),
						source,
					};
					tracing::warn!("{} is not a valid config file: {}", name, error);
					report.skipped.push(SkippedEntry { path, error });
				}
			}
		}
	}

	fn load_file(&self, check_name: &str, file_name: &str, path: PathBuf, report: &mut ScanReport) {
		match parse_check_config(check_name, &path, self.max_file_size) {
			Ok(config) => {
				tracing::debug!("Found valid configuration in file: {}", path.display());
				report.loaded.push(LoadedCheckConfig { config, path });
			}
			Err(error) => {
				tracing::warn!("{} is not a valid config file: {}", file_name, error);
				report.skipped.push(SkippedEntry { path, error });
			}
		}
	}
}

impl ConfigProvider for FileConfigProvider {
	fn collect(&self) -> Result<Vec<CheckConfig>> {
		Ok(self.scan().configs())
	}
}

/// List the names of a directory's immediate children in lexical order.
fn sorted_entries(dir: &Path) -> Result<Vec<OsString>> {
	let list_error = |source: std::io::Error| CheckConfError::DirectoryListError {
		path: dir.to_path_buf(),
		source,
	};

	let mut names = std::fs::read_dir(dir)
		.map_err(list_error)?
		.map(|entry| entry.map(|entry| entry.file_name()))
		.collect::<std::io::Result<Vec<_>>>()
		.map_err(list_error)?;
	names.sort();

	Ok(names)
}

/// Strip the final `.ext` from a file name; names without a dot are kept whole.
fn strip_extension(file_name: &str) -> &str {
	match file_name.rfind('.') {
		Some(index) => &file_name[..index],
		None => file_name,
	}
}
