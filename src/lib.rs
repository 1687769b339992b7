//! Checkconf - filesystem check-configuration provider for a metrics agent.
//!
//! This library provides the core functionality for checkconf, including:
//! - Discovery of check configuration files under a list of search roots
//! - `<check>.d` override directories and `.example` template exclusion
//! - Splitting each file into a shared `init_config` and per-instance documents
//! - Settings file parsing and lookup for the CLI
//!
//! # Example
//!
//! ```no_run
//! use checkconf_cli::provider::{ConfigProvider, FileConfigProvider};
//!
//! let provider = FileConfigProvider::new(["/etc/datadog-agent/conf.d"]);
//! for config in provider.collect().unwrap() {
//!     println!("{}: {} instance(s)", config.name, config.instances.len());
//! }
//! ```

pub mod error;
pub mod provider;
pub mod settings;

pub use error::{CheckConfError, Result};
