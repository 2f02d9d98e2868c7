//! AcademOra Blocks CLI
//!
//! Renders, inspects and hydration-checks stored article HTML from the
//! command line.
//!
//! ## Usage
//!
//! ```bash
//! academora-blocks types
//! academora-blocks render quiz --attributes '{"question": "Capital of France?"}'
//! academora-blocks inspect article.html
//! academora-blocks hydrate article.html --strict
//! ```

mod commands;

use std::path::PathBuf;
use std::process;

use academora::Settings;
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;

#[derive(Parser)]
#[command(name = "academora-blocks")]
#[command(about = "AcademOra content block utility", long_about = None)]
#[command(version)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Settings file (TOML)
	#[arg(short, long, global = true, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Verbosity level (can be repeated)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	verbosity: u8,
}

#[derive(Subcommand)]
enum Commands {
	/// Render one block to static HTML
	Render {
		/// Block type (e.g. checklist, stepGuide)
		#[arg(value_name = "TYPE")]
		block_type: String,

		/// Attributes as inline JSON
		#[arg(short, long, value_name = "JSON", conflicts_with = "file")]
		attributes: Option<String>,

		/// Read attributes from a JSON file (`-` for stdin)
		#[arg(short, long, value_name = "PATH")]
		file: Option<PathBuf>,

		/// Also print the canonical attributes
		#[arg(long)]
		show_config: bool,
	},

	/// List the blocks stored in an article
	Inspect {
		/// Article HTML file (`-` for stdin)
		#[arg(value_name = "PATH")]
		path: PathBuf,

		/// Print blocks as JSON
		#[arg(long)]
		json: bool,
	},

	/// Hydrate an article and report what would mount
	Hydrate {
		/// Article HTML file (`-` for stdin)
		#[arg(value_name = "PATH")]
		path: PathBuf,

		/// Exit with an error when any block is skipped
		#[arg(long)]
		strict: bool,
	},

	/// List block types and insert commands
	Types,
}

fn main() {
	let cli = Cli::parse();

	if let Err(e) = academora::logging::init(academora::logging::verbosity_filter(cli.verbosity)) {
		eprintln!("{} {}", "Warning:".yellow(), e);
	}

	if let Err(e) = run(cli) {
		eprintln!("{} {:#}", "Error:".red().bold(), e);
		process::exit(1);
	}
}

fn run(cli: Cli) -> Result<()> {
	let settings = load_settings(cli.config.as_deref())?;

	match cli.command {
		Commands::Render {
			block_type,
			attributes,
			file,
			show_config,
		} => {
			let raw = match file {
				Some(path) => Some(commands::read_input(&path)?),
				None => attributes,
			};
			let attributes = commands::parse_attributes(raw.as_deref())?;
			print!(
				"{}",
				commands::render(&settings, &block_type, &attributes, show_config)?
			);
			println!();
		}
		Commands::Inspect { path, json } => {
			let html = commands::read_input(&path)?;
			print!("{}", commands::inspect(&html, json)?);
		}
		Commands::Hydrate { path, strict } => {
			let html = commands::read_input(&path)?;
			let summary = commands::hydrate(&settings, &html)?;
			print!("{}", summary.output);
			if strict && summary.skipped > 0 {
				bail!("{} block(s) would stay static", summary.skipped);
			}
		}
		Commands::Types => print!("{}", commands::types()?),
	}

	Ok(())
}

fn load_settings(path: Option<&std::path::Path>) -> Result<Settings> {
	let Some(path) = path else {
		return Ok(Settings::default());
	};
	let settings = Settings::from_file(path)
		.with_context(|| format!("failed to load settings from {}", path.display()))?;
	tracing::info!(path = %path.display(), "using settings file");
	Ok(settings)
}
