use genie_primitives::{ConflictPolicy, GapPolicy, Groups, MovePolicy};

use crate::entity::Entity;
use crate::error::TableError;
use crate::spec::{CloneSpec, CreateSpec};
use crate::test_fixtures::{Widget, widget_tables};

/// Must keep every group of a kind at the same length after unrestricted operations.
///
/// * Enforced in: `EntityTables::ensure_capacity`, `EntityTables::create`, `EntityTables::move_entity`
/// * Failure symptom: a civilization's roster is shorter than the others and the file is rejected.
#[cfg_attr(test, test)]
pub(crate) fn test_density_across_groups() {
	let mut tables = widget_tables(3, &["a", "b"]);

	tables.create(CreateSpec::new("far").at(9).in_groups(Groups::only([1]))).unwrap();
	tables.clone_entity(CloneSpec::new(0).to(12)).unwrap();
	tables.move_entity(1, 15, MovePolicy::Overwrite, GapPolicy::Placeholder).unwrap();
	tables.delete(12, &Groups::All).unwrap();

	let lengths: Vec<usize> = tables.groups().map(<[_]>::len).collect();
	assert_eq!(lengths, vec![16, 16, 16]);
}

/// Must insert a distinct placeholder at every new position, never `None`.
///
/// * Enforced in: `Placeholders::make`, `EntityTables::ensure_capacity`
/// * Failure symptom: editing one placeholder edits many, or a null slot reaches the writer.
#[cfg_attr(test, test)]
pub(crate) fn test_extension_inserts_distinct_placeholders() {
	let mut tables = widget_tables(2, &["a"]);
	let inserted = tables.ensure_capacity(4, &Groups::All, GapPolicy::Placeholder).unwrap();
	assert_eq!(inserted, 8);

	tables.get_mut(2, 0).unwrap().payload = 99;
	for group in 0..2 {
		for id in 1..5 {
			let slot = tables.get(id, group).unwrap();
			assert!(slot.is_placeholder());
			assert_eq!(slot.id, id);
		}
	}
	assert_eq!(tables.get(3, 0).unwrap().payload, 7);
	assert_eq!(tables.get(2, 1).unwrap().payload, 7);
}

/// Must keep each record's self-identifier equal to its position.
///
/// * Enforced in: `EntityTables::move_entity`, `Placeholders::make`
/// * Failure symptom: a moved record still reports its old id.
#[cfg_attr(test, test)]
pub(crate) fn test_identifier_equals_position() {
	let mut tables = widget_tables(2, &["a", "b", "c"]);
	tables.move_entity(0, 2, MovePolicy::Swap, GapPolicy::Placeholder).unwrap();
	tables.move_entity(1, 6, MovePolicy::Overwrite, GapPolicy::Placeholder).unwrap();

	for slots in tables.groups() {
		for (index, slot) in slots.iter().enumerate() {
			assert_eq!(slot.as_ref().map(Entity::id), Some(index as i32));
		}
	}
}

/// Must leave every table unchanged when an operation is rejected.
///
/// * Enforced in: every placement operation; checks precede the first write
/// * Failure symptom: a `Conflict` error leaves a half-extended table behind.
#[cfg_attr(test, test)]
pub(crate) fn test_rejected_operation_is_noop() {
	let mut tables = widget_tables(2, &["a", "b"]);
	let before = tables.clone();

	let err = tables
		.create(CreateSpec::new("x").at(1).on_conflict(ConflictPolicy::Error))
		.unwrap_err();
	assert_eq!(err, TableError::Conflict { kind: Widget::KIND, id: 1 });
	assert!(tables.create(CreateSpec::new("x").at(30).gaps(GapPolicy::Error)).is_err());
	assert!(tables.move_entity(0, 1, MovePolicy::Error, GapPolicy::Placeholder).is_err());
	assert!(tables.clone_entity(CloneSpec::new(5).to(8)).is_err());

	assert_eq!(tables, before);
}
