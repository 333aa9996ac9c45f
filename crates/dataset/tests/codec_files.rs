#![allow(unused_crate_dependencies)]

use std::fs;

use genie_dataset::records::CombatInfo;
use genie_dataset::{CodecError, DatCodec, Dataset, PostcardCodec, Unit};
use genie_tables::EntityTables;
use pretty_assertions::assert_eq;

fn dataset() -> Dataset {
	let mut archer = Unit::new(0, "Archer");
	archer.hit_points = 30;
	archer.combat = Some(CombatInfo::default());
	let mut dataset = Dataset::new(["Gaia", "Britons"]);
	dataset.units = EntityTables::from_groups(vec![vec![Some(archer.clone()), None], vec![Some(archer), None]]);
	dataset
}

#[test]
fn write_then_load_keeps_null_slots() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("empires2.dat");

	PostcardCodec.write(&dataset(), &path).unwrap();
	let loaded = PostcardCodec.load(&path).unwrap();

	assert_eq!(loaded, dataset());
	assert!(loaded.units.get(1, 0).is_none());
}

#[test]
fn failed_load_reports_path() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("missing.dat");
	let err = PostcardCodec.load(&path).unwrap_err();
	assert!(matches!(err, CodecError::Io { .. }));
	assert!(err.to_string().contains("missing.dat"));
}

#[test]
fn foreign_file_is_left_untouched() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("notes.dat");
	fs::write(&path, b"plain text, not a dataset").unwrap();

	assert!(matches!(PostcardCodec.load(&path), Err(CodecError::BadMagic { .. })));
	assert_eq!(fs::read(&path).unwrap(), b"plain text, not a dataset");
}

#[test]
fn write_into_missing_directory_fails_without_creating_file() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("nested").join("out.dat");
	assert!(matches!(PostcardCodec.write(&dataset(), &path), Err(CodecError::Io { .. })));
	assert!(!path.exists());
}
