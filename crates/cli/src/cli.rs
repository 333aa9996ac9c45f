use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "genie")]
#[command(about = "Inspect and check Genie datasets")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Workspace settings (TOML)
	#[arg(long, short = 'c', value_name = "FILE", global = true)]
	pub config: Option<PathBuf>,

	/// Verbose logging
	#[arg(long, short = 'v', global = true)]
	pub verbose: bool,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Print civilizations and per-kind table sizes
	Info {
		/// Dataset file
		file: PathBuf,
	},
	/// Run the integrity checks; exits non-zero when issues are found
	Check {
		/// Dataset file
		file: PathBuf,
	},
	/// Write an empty dataset with the given civilizations
	Init {
		/// Dataset file to create
		file: PathBuf,

		/// Civilization names, in group order
		#[arg(long = "civ", value_name = "NAME", required = true)]
		civs: Vec<String>,
	},
}
