//! Check configuration discovery for checkconf.
//!
//! This module handles:
//! - Walking search roots and `<check>.d` override directories
//! - Parsing YAML check configuration files
//! - Re-encoding `init_config` and each instance as standalone documents

pub mod parser;
pub mod types;
pub mod walker;

pub use parser::{parse_check_config, parse_check_config_bytes};
pub use types::{CheckConfig, LoadedCheckConfig, ScanReport, SkippedEntry};
pub use walker::{ConfigProvider, FileConfigProvider};
