use std::path::Path;

use genie_dataset::{Effect, FieldError, Graphic, Tech, Unit};
use genie_primitives::{ConflictPolicy, EntityKind, FieldValue, GapPolicy, Groups, Handle, MovePolicy, RefValue};
use genie_tables::TableError;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use crate::config::WorkspaceConfig;
use crate::error::Error;
use crate::integrity::IntegrityIssue;
use crate::test_fixtures::{MemoryCodec, sample_dataset, session};
use crate::workspace::Workspace;

#[test]
fn tech_may_reference_effect_created_afterwards() {
	let mut workspace = session();
	let spec = workspace.create_spec("Ballistics");
	let tech = workspace.create::<Tech>(spec).unwrap();
	workspace
		.set_field::<Tech>(tech, &Groups::All, "effect_id", 0)
		.unwrap();
	let spec = workspace.create_spec("Ballistics (effect)");
	assert_eq!(workspace.create::<Effect>(spec).unwrap(), 0);

	workspace.save(Path::new("empires2.dat")).unwrap();
	assert_eq!(workspace.codec().written(), 1);
	assert_eq!(
		workspace.exports().dependencies()[0].target,
		Handle::new(EntityKind::Effect, 0).to_string()
	);
}

#[test]
fn dangling_reference_aborts_save_with_range_context() {
	let mut workspace = session();
	workspace
		.set_field::<Unit>(0, &Groups::All, "standing_graphic", 9)
		.unwrap();

	let Err(Error::Validation(err)) = workspace.save(Path::new("empires2.dat")) else {
		panic!("save should fail validation");
	};
	let failure = &err.failures[0];
	assert_eq!((failure.kind, failure.id, failure.field.as_str()), (EntityKind::Graphic, Some(9), "standing_graphic"));
	assert!(err.to_string().contains("total graphics: 1, valid range 0-0"));
	assert!(failure.origin.file.ends_with("tests.rs"));
	assert_eq!(workspace.codec().written(), 0);

	workspace.save(Path::new("empires2.dat")).unwrap();
	assert_eq!(workspace.codec().written(), 1);
}

#[test]
fn negative_reference_means_none() {
	let mut workspace = session();
	workspace
		.set_field::<Unit>(0, &Groups::All, "dead_unit_id", -1)
		.unwrap();
	assert_eq!(workspace.refs().len(), 1);
	assert!(workspace.validate_references().is_ok());
}

#[test]
fn placeholder_target_is_not_a_valid_reference() {
	let mut workspace = session();
	workspace
		.dataset_mut()
		.tables_mut::<Graphic>()
		.ensure_capacity(3, &Groups::All, GapPolicy::Placeholder)
		.unwrap();
	workspace
		.set_field::<Unit>(0, &Groups::All, "dying_graphic", 2)
		.unwrap();

	assert!(workspace.exists_raw(EntityKind::Graphic, 2));
	assert!(!workspace.exists(EntityKind::Graphic, 2));
	let err = workspace.validate_references().unwrap_err();
	assert!(err.to_string().contains("total graphics: 4, valid range 0-3"));
}

#[test]
fn enum_value_is_rejected_before_any_write() {
	let mut workspace = session();
	let err = workspace
		.set_field::<Unit>(0, &Groups::All, "unit_type", 33)
		.unwrap_err();

	assert!(matches!(err, Error::Field(FieldError::EnumValue(_))));
	assert!(err.to_string().contains("COMBATANT=70"));
	assert!(workspace.refs().is_empty());
	assert_eq!(workspace.get::<Unit>(0, 1).map(|unit| unit.unit_type), Some(70));
}

#[rstest]
#[case::unknown_field("armour", FieldValue::Int(1), "has no field named")]
#[case::absent_component("train_time", FieldValue::Int(10), "no creation component")]
#[case::too_wide("hit_points", FieldValue::Int(70_000), "does not fit in i16")]
#[case::wrong_type("speed", FieldValue::Text("fast".into()), "expected float, got text")]
#[case::reference_as_text("dying_sound", FieldValue::Text("horn".into()), "expected int, got text")]
fn rejected_field_writes_leave_records_untouched(#[case] field: &str, #[case] value: FieldValue, #[case] message: &str) {
	let mut workspace = session();
	let before = workspace.dataset().clone();

	let err = workspace.set_field::<Unit>(0, &Groups::All, field, value).unwrap_err();
	assert!(err.to_string().contains(message), "{err}");
	assert_eq!(workspace.dataset(), &before);
	assert!(workspace.refs().is_empty());
}

#[test]
fn field_write_targets_selected_groups() {
	let mut workspace = session();
	let written = workspace
		.set_field::<Unit>(0, &Groups::only([1]), "hit_points", 45)
		.unwrap();

	assert_eq!(written, 1);
	assert_eq!(workspace.get_field::<Unit>(0, 0, "hit_points").unwrap(), FieldValue::Int(30));
	assert_eq!(workspace.get_field::<Unit>(0, 1, "hit_points").unwrap(), FieldValue::Int(45));
}

#[test]
fn field_write_without_real_record_fails() {
	let mut workspace = session();
	let err = workspace
		.set_field::<Unit>(4, &Groups::All, "hit_points", 10)
		.unwrap_err();
	assert!(matches!(
		err,
		Error::Field(FieldError::NoRecord {
			kind: EntityKind::Unit,
			id: 4
		})
	));
}

#[test]
fn handle_of_wrong_kind_is_rejected_immediately() {
	let mut workspace = session();
	let err = workspace
		.set_reference::<Unit>(0, &Groups::All, "dying_graphic", Handle::new(EntityKind::Sound, 0))
		.unwrap_err();

	assert!(matches!(err, Error::Field(FieldError::HandleKindMismatch { .. })));
	assert!(workspace.refs().is_empty());
	assert_eq!(workspace.get::<Unit>(0, 0).map(|unit| unit.dying_graphic), Some(-1));
}

#[test]
fn reference_to_plain_field_is_rejected() {
	let mut workspace = session();
	let err = workspace
		.set_reference::<Unit>(0, &Groups::All, "hit_points", 3)
		.unwrap_err();
	assert!(matches!(err, Error::Field(FieldError::TypeMismatch { field: "hit_points", .. })));
}

#[test]
fn tracked_reference_follows_a_move() {
	let mut workspace = session();
	let spec = workspace.create_spec("archer_attack");
	let graphic = workspace.create::<Graphic>(spec).unwrap();
	let tracked = workspace.tracked_ref(EntityKind::Graphic, graphic).unwrap();
	workspace
		.set_reference_labeled::<Unit>(0, &Groups::All, "attack_graphic", tracked, "attack pass")
		.unwrap();
	assert_eq!(workspace.get::<Unit>(0, 0).and_then(|unit| unit.combat.as_ref()).map(|c| c.attack_graphic), Some(1));

	workspace
		.move_entity_with::<Graphic>(graphic, 5, MovePolicy::Error, GapPolicy::Placeholder)
		.unwrap();
	assert!(workspace.validate_references().is_ok());
}

#[test]
fn tracked_reference_to_overwritten_record_fails() {
	let mut workspace = session();
	let spec = workspace.create_spec("archer_attack");
	let attack = workspace.create::<Graphic>(spec).unwrap();
	let spec = workspace.create_spec("archer_die");
	let die = workspace.create::<Graphic>(spec).unwrap();
	let tracked = workspace.tracked_ref(EntityKind::Graphic, die).unwrap();
	workspace
		.set_reference::<Unit>(0, &Groups::All, "dying_graphic", tracked)
		.unwrap();

	workspace
		.move_entity_with::<Graphic>(attack, die, MovePolicy::Overwrite, GapPolicy::Placeholder)
		.unwrap();
	assert_eq!(workspace.get::<Graphic>(die, 0).map(|g| g.name.as_str()), Some("archer_attack"));

	let err = workspace.validate_references().unwrap_err();
	assert_eq!(err.failures.len(), 1);
	assert_eq!((err.failures[0].kind, err.failures[0].id), (EntityKind::Graphic, None));
	assert!(err.to_string().contains("uuid is not registered for graphics"), "{err}");
}

#[test]
fn tracked_reference_to_deleted_record_fails() {
	let mut workspace = session();
	let spec = workspace.create_spec("archer_attack");
	let graphic = workspace.create::<Graphic>(spec).unwrap();
	let tracked = workspace.tracked_ref(EntityKind::Graphic, graphic).unwrap();
	workspace
		.set_reference_labeled::<Unit>(0, &Groups::All, "attack_graphic", tracked, "attack pass")
		.unwrap();
	assert!(workspace.delete::<Graphic>(graphic, &Groups::All).unwrap());

	let err = workspace.validate_references().unwrap_err();
	assert_eq!(err.failures.len(), 1);
	assert_eq!(err.failures[0].origin.label.as_deref(), Some("attack pass"));
	assert!(matches!(err.failures[0].value, RefValue::Tracked(_)));
}

#[test]
fn discarded_references_are_never_checked() {
	let mut workspace = session();
	workspace
		.set_field::<Unit>(0, &Groups::All, "selection_sound", 12)
		.unwrap();
	workspace.discard_pending_references();
	workspace.save(Path::new("empires2.dat")).unwrap();
}

#[test]
fn paste_places_all_groups_and_respects_conflict() {
	let mut workspace = session();
	workspace
		.set_field::<Unit>(0, &Groups::only([1]), "hit_points", 50)
		.unwrap();
	workspace.copy::<Unit>(0).unwrap();

	let pasted = workspace
		.paste::<Unit>(None, ConflictPolicy::Error, GapPolicy::Placeholder)
		.unwrap();
	assert_eq!(pasted, 1);
	assert_eq!(workspace.get::<Unit>(1, 0).map(|unit| (unit.id, unit.hit_points)), Some((1, 30)));
	assert_eq!(workspace.get::<Unit>(1, 1).map(|unit| (unit.id, unit.hit_points)), Some((1, 50)));

	let err = workspace
		.paste::<Unit>(Some(1), ConflictPolicy::Error, GapPolicy::Placeholder)
		.unwrap_err();
	assert!(matches!(err, Error::Table(TableError::Conflict { id: 1, .. })));
	assert_eq!(workspace.exports().entries(EntityKind::Unit)[0].base_id, Some(0));
}

#[test]
fn clipboard_errors() {
	let mut workspace = session();
	assert!(matches!(
		workspace.paste::<Unit>(None, ConflictPolicy::Error, GapPolicy::Placeholder),
		Err(Error::ClipboardEmpty)
	));
	assert!(matches!(workspace.copy::<Unit>(3), Err(Error::Table(TableError::InvalidId { .. }))));

	workspace.copy::<Graphic>(0).unwrap();
	assert!(matches!(
		workspace.paste::<Unit>(None, ConflictPolicy::Error, GapPolicy::Placeholder),
		Err(Error::ClipboardKind {
			expected: EntityKind::Unit,
			found: EntityKind::Graphic
		})
	));
	workspace.clear_clipboard();
	assert!(workspace.clipboard().is_none());
}

#[test]
fn config_defaults_flow_into_placement() {
	let config = WorkspaceConfig {
		on_conflict: ConflictPolicy::Overwrite,
		on_move_conflict: MovePolicy::Swap,
		fill_gaps: GapPolicy::Error,
		..WorkspaceConfig::default()
	};
	let mut workspace = Workspace::with_codec(sample_dataset(), MemoryCodec::default()).with_config(config);

	let far = workspace.create_spec("far").at(5);
	assert!(matches!(
		workspace.create::<Graphic>(far),
		Err(Error::Table(TableError::GapNotAllowed { .. }))
	));
	let over = workspace.create_spec("replacement").at(0);
	assert_eq!(workspace.create::<Graphic>(over).unwrap(), 0);

	let copy = workspace.clone_spec(0);
	assert_eq!(workspace.clone_entity::<Graphic>(copy).unwrap(), 1);
	workspace.move_entity::<Graphic>(0, 1).unwrap();
	assert_eq!(workspace.get::<Graphic>(1, 0).map(|g| g.id), Some(1));
	assert_eq!(workspace.count(EntityKind::Graphic), 2);
}

#[test]
fn looping_dead_unit_chain_blocks_default_save() {
	let mut workspace = session();
	let spec = workspace.clone_spec(0);
	let twin = workspace.clone_entity::<Unit>(spec).unwrap();
	workspace
		.set_field::<Unit>(0, &Groups::All, "dead_unit_id", twin)
		.unwrap();
	workspace
		.set_field::<Unit>(twin, &Groups::All, "dead_unit_id", 0)
		.unwrap();

	let Err(Error::Integrity(report)) = workspace.save(Path::new("empires2.dat")) else {
		panic!("save should refuse the looping chain");
	};
	assert_eq!(
		report.iter().cloned().collect::<Vec<_>>(),
		vec![IntegrityIssue::Cycle {
			field: "dead_unit_id",
			ids: vec![0, 1],
		}]
	);
	assert_eq!(workspace.codec().written(), 0);

	workspace
		.set_field::<Unit>(twin, &Groups::All, "dead_unit_id", -1)
		.unwrap();
	workspace.save(Path::new("empires2.dat")).unwrap();
	assert_eq!(workspace.codec().written(), 1);
}

#[test]
fn duplicate_export_name_blocks_default_save() {
	let mut workspace = session();
	for _ in 0..2 {
		let spec = workspace.create_spec("archer_die");
		workspace.create::<Graphic>(spec).unwrap();
	}

	let Err(Error::Integrity(report)) = workspace.save(Path::new("empires2.dat")) else {
		panic!("save should refuse the duplicate name");
	};
	assert!(matches!(
		report.iter().next(),
		Some(IntegrityIssue::DuplicateExportName { kind: EntityKind::Graphic, name, ids }) if name == "archer_die" && ids == &vec![1, 2]
	));
	assert_eq!(workspace.codec().written(), 0);
}

#[test]
fn strict_integrity_blocks_structural_problems() {
	let strict = WorkspaceConfig {
		strict_integrity: true,
		..WorkspaceConfig::default()
	};
	for (config, saved) in [(WorkspaceConfig::default(), true), (strict, false)] {
		let mut workspace = session().with_config(config);
		if let Some(archer) = workspace.dataset_mut().units.get_mut(0, 1) {
			archer.standing_graphic = 12;
		}

		let result = workspace.save(Path::new("empires2.dat"));
		assert_eq!(result.is_ok(), saved);
		assert_eq!(workspace.codec().written(), usize::from(saved));
		if let Err(Error::Integrity(report)) = result {
			assert!(matches!(
				report.iter().next(),
				Some(IntegrityIssue::DanglingReference {
					field: "standing_graphic",
					value: 12,
					..
				})
			));
		}
	}
}

#[test]
fn export_write_failure_does_not_fail_save() {
	let dir = tempfile::tempdir().unwrap();
	let export_path = dir.path().join("missing").join("edits.json");
	let config = WorkspaceConfig {
		export_path: Some(export_path.clone()),
		..WorkspaceConfig::default()
	};
	let mut workspace = session().with_config(config);
	let spec = workspace.create_spec("archer_die");
	workspace.create::<Graphic>(spec).unwrap();

	workspace.save(Path::new("empires2.dat")).unwrap();
	assert_eq!(workspace.codec().written(), 1);
	assert!(!export_path.exists());
}

#[test]
fn validation_can_be_switched_off() {
	let config = WorkspaceConfig {
		validate_on_save: false,
		..WorkspaceConfig::default()
	};
	let mut workspace = session().with_config(config);
	workspace
		.set_field::<Unit>(0, &Groups::All, "dying_sound", 4)
		.unwrap();

	workspace.save(Path::new("empires2.dat")).unwrap();
	assert_eq!(workspace.codec().written(), 1);
	assert_eq!(workspace.refs().len(), 1);
}

#[test]
fn open_loads_through_the_codec() {
	let codec = MemoryCodec::default();
	codec
		.files
		.borrow_mut()
		.push((Path::new("in.dat").to_path_buf(), sample_dataset()));

	let workspace = Workspace::open_with(codec, Path::new("in.dat"), WorkspaceConfig::default()).unwrap();
	assert_eq!(workspace.dataset(), &sample_dataset());
	assert!(matches!(
		Workspace::open_with(MemoryCodec::default(), Path::new("in.dat"), WorkspaceConfig::default()),
		Err(Error::Codec(_))
	));
}

proptest! {
	/// A reference passes validation iff its id is negative or names a real record
	/// when validation runs, however many records were created after the assignment.
	#[test]
	fn prop_references_checked_against_final_state(
		refs in prop::collection::vec(-2i32..10, 0..12),
		creates in 0usize..6,
	) {
		let mut workspace = session();
		for &id in &refs {
			workspace.set_field::<Unit>(0, &Groups::All, "dying_graphic", id).unwrap();
		}
		for index in 0..creates {
			let spec = workspace.create_spec(format!("graphic {index}"));
			workspace.create::<Graphic>(spec).unwrap();
		}

		let total = i32::try_from(1 + creates).unwrap();
		let expected = refs.iter().filter(|&&id| id >= total).count();
		let failures = workspace.validate_references().err().map_or(0, |err| err.failures.len());
		prop_assert_eq!(failures, expected);
		prop_assert!(workspace.refs().is_empty());
	}
}
