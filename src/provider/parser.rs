use crate::error::{CheckConfError, Result};
use crate::provider::types::CheckConfig;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// On-disk shape of a check configuration file. Other top-level keys are ignored.
#[derive(Debug, Default, Deserialize)]
struct ConfigDocument {
	#[serde(default)]
	init_config: serde_yaml::Value,

	#[serde(default)]
	instances: Option<Vec<serde_yaml::Value>>,
}

/// Parse the check configuration file at `path` under the given check name.
///
/// When `max_file_size` is set, files larger than the limit are rejected
/// before being decoded.
pub fn parse_check_config(
	name: &str,
	path: &Path,
	max_file_size: Option<u64>,
) -> Result<CheckConfig> {
	let content = read_config_file(path, max_file_size)?;
	parse_check_config_bytes(name, &content, path)
}

/// Parse check configuration contents (useful for testing).
///
/// `path` is only used for error reporting.
pub fn parse_check_config_bytes(name: &str, content: &[u8], path: &Path) -> Result<CheckConfig> {
	if content.iter().all(u8::is_ascii_whitespace) {
		return Err(CheckConfError::NoInstances {
			path: path.to_path_buf(),
		});
	}

	// A null document (`~`, `null`, comments only) decodes like an empty one.
	let document: ConfigDocument = serde_yaml::from_slice::<Option<ConfigDocument>>(content)
		.map_err(|source| CheckConfError::ConfigParseError {
			path: path.to_path_buf(),
			source,
		})?
		.unwrap_or_default();

	let instances = match document.instances {
		Some(instances) if !instances.is_empty() => instances,
		_ => {
			return Err(CheckConfError::NoInstances {
				path: path.to_path_buf(),
			});
		}
	};

	let init_config = encode_value(&document.init_config, path)?;
	let instances = instances
		.iter()
		.map(|instance| encode_value(instance, path))
		.collect::<Result<Vec<_>>>()?;

	Ok(CheckConfig {
		name: name.to_string(),
		init_config,
		instances,
	})
}

fn encode_value(value: &serde_yaml::Value, path: &Path) -> Result<Vec<u8>> {
	serde_yaml::to_string(value)
		.map(String::into_bytes)
		.map_err(|source| CheckConfError::ConfigEncodeError {
			path: path.to_path_buf(),
			source,
		})
}

fn read_config_file(path: &Path, max_file_size: Option<u64>) -> Result<Vec<u8>> {
	let read_error = |source: std::io::Error| CheckConfError::ConfigReadError {
		path: path.to_path_buf(),
		source,
	};

	let Some(limit) = max_file_size else {
		return std::fs::read(path).map_err(read_error);
	};

	let file = File::open(path).map_err(read_error)?;
	let size = file.metadata().map_err(read_error)?.len();
	if size > limit {
		return Err(CheckConfError::FileTooLarge {
			path: path.to_path_buf(),
			size,
			limit,
		});
	}

	// The file may grow between the stat and the read.
	let mut content = Vec::with_capacity(size as usize);
	file.take(limit + 1)
		.read_to_end(&mut content)
		.map_err(read_error)?;
	if content.len() as u64 > limit {
		return Err(CheckConfError::FileTooLarge {
			path: path.to_path_buf(),
			size: content.len() as u64,
			limit,
		});
	}

	Ok(content)
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_yaml::Value;
	use std::path::PathBuf;

	fn parse(content: &str) -> Result<CheckConfig> {
		parse_check_config_bytes("test", content.as_bytes(), &PathBuf::from("test.yaml"))
	}

	#[test]
	fn test_parse_single_instance() {
		let config = parse("init_config: null\ninstances:\n  - url: http://x\n").unwrap();

		assert_eq!(config.name, "test");
		assert_eq!(config.instances.len(), 1);
		assert_eq!(config.init_config, b"null\n");

		let instance = &config.instance_values().unwrap()[0];
		assert_eq!(instance["url"].as_str(), Some("http://x"));
	}

	#[test]
	fn test_missing_init_config_encodes_null() {
		let config = parse("instances:\n  - host: h1\n").unwrap();

		assert!(!config.init_config.is_empty());
		assert_eq!(config.init_config_value().unwrap(), Value::Null);
	}

	#[test]
	fn test_instances_round_trip_in_order() {
		let content = r#"
init_config:
  min_collection_interval: 30
  tags: [a, b]
instances:
  - host: h1
    port: 6379
    ratio: 0.5
    enabled: true
    password: null
  - host: h2
    port: "6380"
  - just-a-scalar
"#;
		let config = parse(content).unwrap();
		let source: Value = serde_yaml::from_str(content).unwrap();

		assert_eq!(config.init_config_value().unwrap(), source["init_config"]);

		let instances = config.instance_values().unwrap();
		let expected = source["instances"].as_sequence().unwrap();
		assert_eq!(&instances, expected);
	}

	#[test]
	fn test_scalar_types_are_preserved() {
		let config = parse("instances:\n  - port: 8080\n    ratio: 1.0\n    name: '8080'\n").unwrap();
		let instance = &config.instance_values().unwrap()[0];

		assert!(instance["port"].is_u64());
		assert!(instance["ratio"].is_f64());
		assert_eq!(instance["name"].as_str(), Some("8080"));
	}

	#[test]
	fn test_instances_are_canonically_reencoded() {
		let config = parse("instances:\n  -   {host:   h1,   port: 1}   # comment\n").unwrap();

		assert_eq!(config.instances[0], b"host: h1\nport: 1\n");
	}

	#[test]
	fn test_unknown_top_level_keys_are_ignored() {
		let config = parse("logs:\n  - type: file\ninstances:\n  - {}\n").unwrap();

		assert_eq!(config.instances.len(), 1);
	}

	#[test]
	fn test_empty_instances_rejected() {
		let result = parse("instances: []\n");

		assert!(matches!(result, Err(CheckConfError::NoInstances { .. })));
	}

	#[test]
	fn test_missing_or_null_instances_rejected() {
		assert!(matches!(
			parse("init_config: {}\n"),
			Err(CheckConfError::NoInstances { .. })
		));
		assert!(matches!(
			parse("instances:\n"),
			Err(CheckConfError::NoInstances { .. })
		));
		assert!(matches!(
			parse("  \n"),
			Err(CheckConfError::NoInstances { .. })
		));
	}

	#[test]
	fn test_null_document_rejected_as_empty() {
		for content in ["~\n", "null\n", "# only a comment\n"] {
			assert!(
				matches!(parse(content), Err(CheckConfError::NoInstances { .. })),
				"unexpected result for {content:?}"
			);
		}
	}

	#[test]
	fn test_no_instances_message() {
		let err = parse("instances: []\n").unwrap_err();

		assert!(
			err.to_string()
				.contains("Configuration file contains no valid instances")
		);
	}

	#[test]
	fn test_invalid_yaml_rejected() {
		let result = parse("not: [valid");

		assert!(matches!(result, Err(CheckConfError::ConfigParseError { .. })));
	}

	#[test]
	fn test_instances_not_a_sequence_rejected() {
		let result = parse("instances: 42\n");

		assert!(matches!(result, Err(CheckConfError::ConfigParseError { .. })));
	}

	#[test]
	fn test_parse_file_missing() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join("missing.yaml");

		let result = parse_check_config("missing", &path, None);

		assert!(matches!(result, Err(CheckConfError::ConfigReadError { .. })));
	}

	#[test]
	fn test_parse_file_respects_size_limit() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join("big.yaml");
		std::fs::write(&path, "instances:\n  - host: h1\n").unwrap();

		let result = parse_check_config("big", &path, Some(8));
		match result.unwrap_err() {
			CheckConfError::FileTooLarge { size, limit, .. } => {
				assert_eq!(size, 24);
				assert_eq!(limit, 8);
			}
			other => panic!("Expected FileTooLarge error, got {other:?}"),
		}

		let config = parse_check_config("big", &path, Some(1024)).unwrap();
		assert_eq!(config.name, "big");
	}
}
