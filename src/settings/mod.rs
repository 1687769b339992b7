//! Settings for the checkconf tool itself.
//!
//! This module handles:
//! - TOML settings file parsing
//! - Settings file lookup (flag, environment, working directory, home)

pub mod lookup;
pub mod parser;
pub mod types;

pub use lookup::{SETTINGS_ENV_VAR, SETTINGS_FILE_NAME, load_settings, user_settings_path};
pub use parser::{generate_init_template, parse_settings_file, parse_settings_str};
pub use types::{DEFAULT_MAX_FILE_SIZE, LoadedSettings, Settings};
