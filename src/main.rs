use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use checkconf_cli::provider::{FileConfigProvider, LoadedCheckConfig};
use checkconf_cli::settings::{
	LoadedSettings, SETTINGS_FILE_NAME, generate_init_template, load_settings,
};

#[derive(Parser)]
#[command(name = "checkconf")]
#[command(
	author,
	version,
	about = "Discover and normalize check configurations for a metrics agent"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Settings file to use instead of the default lookup
	#[arg(long, global = true, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Increase log verbosity (-v for info, -vv for debug)
	#[arg(short, long, global = true, action = ArgAction::Count)]
	verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
	/// Collect check configurations from the search roots
	Collect {
		/// Search roots (overrides `search-paths` from the settings file)
		roots: Vec<PathBuf>,

		/// Output format
		#[arg(long, value_enum, default_value_t = OutputFormat::Summary)]
		format: OutputFormat,
	},
	/// Report every configuration file that would be skipped, and why
	Validate {
		/// Search roots (overrides `search-paths` from the settings file)
		roots: Vec<PathBuf>,
	},
	/// Create a template checkconf.toml in the current directory
	Init {
		/// Overwrite an existing checkconf.toml
		#[arg(long)]
		force: bool,
	},
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
	/// One line per check configuration
	Summary,
	/// Each check configuration as a YAML document
	Yaml,
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	match run(cli) {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn init_tracing(verbose: u8) {
	let default_filter = match verbose {
		0 => "warn",
		1 => "info",
		_ => "debug",
	};

	tracing_subscriber::registry()
		.with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.init();
}

fn run(cli: Cli) -> Result<ExitCode> {
	match cli.command {
		Commands::Init { force } => handle_init(force),
		Commands::Collect { roots, format } => {
			let provider = build_provider(cli.config.as_deref(), &roots)?;
			handle_collect(&provider, format)
		}
		Commands::Validate { roots } => {
			let provider = build_provider(cli.config.as_deref(), &roots)?;
			handle_validate(&provider)
		}
	}
}

fn build_provider(config: Option<&Path>, roots: &[PathBuf]) -> Result<FileConfigProvider> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let LoadedSettings { settings, path } =
		load_settings(config, &cwd).context("Failed to load settings")?;

	match path {
		Some(path) => tracing::debug!("Using settings from: {}", path.display()),
		None => tracing::debug!("No settings file found, using defaults"),
	}

	let provider = settings.provider(roots);
	if provider.paths().is_empty() {
		tracing::warn!("No search paths configured");
	}
	Ok(provider)
}

fn handle_init(force: bool) -> Result<ExitCode> {
	let settings_path = PathBuf::from(SETTINGS_FILE_NAME);

	if settings_path.exists() && !force {
		anyhow::bail!("{SETTINGS_FILE_NAME} already exists. Use --force to overwrite.");
	}

	std::fs::write(&settings_path, generate_init_template())
		.with_context(|| format!("Failed to write {}", settings_path.display()))?;

	println!("Created {SETTINGS_FILE_NAME}");
	Ok(ExitCode::SUCCESS)
}

fn handle_collect(provider: &FileConfigProvider, format: OutputFormat) -> Result<ExitCode> {
	let report = provider.scan();

	if report.loaded.is_empty() {
		println!("No check configurations found.");
		return Ok(ExitCode::SUCCESS);
	}

	for loaded in &report.loaded {
		match format {
			OutputFormat::Summary => println!("{}", summary_line(loaded)),
			OutputFormat::Yaml => print!("{}", render_yaml(loaded)?),
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_validate(provider: &FileConfigProvider) -> Result<ExitCode> {
	let report = provider.scan();

	if report.loaded.is_empty() && report.skipped.is_empty() {
		println!("No check configurations found.");
		return Ok(ExitCode::SUCCESS);
	}

	if !report.loaded.is_empty() {
		println!("Valid configuration files:");
		for loaded in &report.loaded {
			println!("  {}", summary_line(loaded));
		}
	}

	if report.skipped.is_empty() {
		return Ok(ExitCode::SUCCESS);
	}

	eprintln!("Skipped entries:");
	for skipped in &report.skipped {
		eprintln!("  {}: {}", skipped.path.display(), skipped.error);
	}
	Ok(ExitCode::FAILURE)
}

fn summary_line(loaded: &LoadedCheckConfig) -> String {
	let count = loaded.config.instances.len();
	format!(
		"{} ({} instance{}) <- {}",
		loaded.config.name,
		count,
		if count == 1 { "" } else { "s" },
		loaded.path.display()
	)
}

fn render_yaml(loaded: &LoadedCheckConfig) -> Result<String> {
	let config = &loaded.config;
	let decode_context = || format!("Failed to decode configuration from {}", loaded.path.display());

	let mut document = serde_yaml::Mapping::new();
	document.insert("name".into(), config.name.clone().into());
	document.insert(
		"init_config".into(),
		config.init_config_value().with_context(decode_context)?,
	);
	document.insert(
		"instances".into(),
		serde_yaml::Value::Sequence(config.instance_values().with_context(decode_context)?),
	);

	let body = serde_yaml::to_string(&document).with_context(decode_context)?;
	Ok(format!("---\n# Source: {}\n{}", loaded.path.display(), body))
}
