mod cli;
#[cfg(test)]
mod tests;

use std::fmt::Write as _;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Command};
use genie_dataset::Dataset;
use genie_workspace::{Workspace, WorkspaceConfig};
use tracing::info;

fn main() -> anyhow::Result<ExitCode> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	let config = match &cli.config {
		Some(path) => WorkspaceConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
		None => WorkspaceConfig::default(),
	};
	let (report, clean) = run(&cli.command, config)?;
	print!("{report}");
	Ok(if clean { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("genie=debug")
		} else {
			EnvFilter::new("genie=warn")
		}
	});
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}

/// Runs one command, returning its report and whether it found no problems.
fn run(command: &Command, config: WorkspaceConfig) -> anyhow::Result<(String, bool)> {
	match command {
		Command::Info { file } => {
			let workspace = open(file, config)?;
			Ok((info_report(workspace.dataset()), true))
		}
		Command::Check { file } => {
			let workspace = open(file, config)?;
			let report = workspace.check_integrity();
			info!(target: "genie::workspace", file = %file.display(), issues = report.len(), "checked");
			Ok((format!("{report}\n"), report.is_clean()))
		}
		Command::Init { file, civs } => {
			let mut workspace = Workspace::new(Dataset::new(civs.iter().cloned())).with_config(config);
			workspace
				.save(file)
				.with_context(|| format!("writing {}", file.display()))?;
			Ok((format!("wrote {} with {} civilizations\n", file.display(), civs.len()), true))
		}
	}
}

fn open(file: &Path, config: WorkspaceConfig) -> anyhow::Result<Workspace> {
	Workspace::open(file, config).with_context(|| format!("opening {}", file.display()))
}

fn info_report(dataset: &Dataset) -> String {
	let mut out = String::new();
	let civs: Vec<&str> = dataset.civilizations.iter().map(|civ| civ.name.as_str()).collect();
	let _ = writeln!(out, "civilizations ({}): {}", civs.len(), civs.join(", "));
	for summary in dataset.summaries() {
		let _ = writeln!(
			out,
			"{:<8} {:>6} slots {:>6} active {:>3} groups",
			summary.kind.plural(),
			summary.slots,
			summary.active,
			summary.groups
		);
	}
	out
}
