use clap::Parser;
use genie_dataset::{Dataset, Unit};
use genie_tables::EntityTables;
use genie_workspace::{Workspace, WorkspaceConfig};

use crate::cli::{Cli, Command};
use crate::{info_report, run};

#[test]
fn parses_global_flags_after_subcommand() {
	let cli = Cli::try_parse_from(["genie", "check", "empires2.dat", "--verbose", "-c", "genie.toml"]).unwrap();
	assert!(cli.verbose);
	assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("genie.toml")));
	assert!(matches!(cli.command, Command::Check { .. }));
}

#[test]
fn init_requires_a_civilization() {
	assert!(Cli::try_parse_from(["genie", "init", "out.dat"]).is_err());
}

#[test]
fn init_then_info() {
	let dir = tempfile::tempdir().unwrap();
	let file = dir.path().join("empires2.dat");
	let init = Command::Init {
		file: file.clone(),
		civs: vec!["Gaia".into(), "Britons".into()],
	};
	run(&init, WorkspaceConfig::default()).unwrap();

	let (report, clean) = run(&Command::Info { file }, WorkspaceConfig::default()).unwrap();
	assert!(clean);
	assert!(report.starts_with("civilizations (2): Gaia, Britons\n"));
	assert!(report.contains("units         0 slots      0 active   2 groups"));
}

#[test]
fn check_fails_on_dangling_reference() {
	let dir = tempfile::tempdir().unwrap();
	let file = dir.path().join("empires2.dat");
	let mut archer = Unit::new(0, "Archer");
	archer.dying_graphic = 7;
	let mut dataset = Dataset::new(["Gaia"]);
	dataset.units = EntityTables::from_groups(vec![vec![Some(archer)]]);
	Workspace::new(dataset).save_unchecked(&file).unwrap();

	let (report, clean) = run(&Command::Check { file }, WorkspaceConfig::default()).unwrap();
	assert!(!clean);
	assert!(report.contains("unit 0: dying_graphic points at missing graphic 7"));
}

#[test]
fn info_lists_every_kind() {
	let report = info_report(&Dataset::new(["Gaia"]));
	assert_eq!(report.lines().count(), 6);
}

#[test]
fn missing_file_is_an_error() {
	let dir = tempfile::tempdir().unwrap();
	let err = run(&Command::Info { file: dir.path().join("none.dat") }, WorkspaceConfig::default()).unwrap_err();
	assert!(err.to_string().starts_with("opening "));
}
