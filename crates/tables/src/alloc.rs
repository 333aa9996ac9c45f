//! Identifier allocation.
//!
//! Identifiers are table positions. The next free identifier is the append position of
//! the representative group (group 0); explicit identifiers only need to be
//! non-negative, capacity is the table manager's concern.

use genie_primitives::EntityKind;

use crate::entity::{Entity, index_to_id};
use crate::error::TableError;
use crate::table::EntityTables;

/// Returns the append position of the representative group, `0` when there are no groups.
pub fn allocate_next<R: Entity>(tables: &EntityTables<R>) -> i32 {
	index_to_id(tables.count())
}

/// Checks that `id` is non-negative and returns it as a table index.
///
/// `role` names the argument in the error ("destination", "source", ...).
pub fn validate_positive(kind: EntityKind, id: i32, role: &'static str) -> Result<usize, TableError> {
	usize::try_from(id).map_err(|_| TableError::InvalidId {
		kind,
		id: id.into(),
		role,
		reason: "identifiers cannot be negative",
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_fixtures::{Widget, widget_tables};

	#[test]
	fn empty_table_allocates_zero() {
		let tables = EntityTables::<Widget>::new(3);
		assert_eq!(allocate_next(&tables), 0);
		assert_eq!(allocate_next(&EntityTables::<Widget>::new(0)), 0);
	}

	#[test]
	fn allocates_append_position_of_first_group() {
		let tables = widget_tables(2, &["a", "b", "c"]);
		assert_eq!(allocate_next(&tables), 3);
	}

	#[test]
	fn negative_ids_are_rejected() {
		let err = validate_positive(EntityKind::Unit, -4, "destination").unwrap_err();
		assert_eq!(
			err,
			TableError::InvalidId {
				kind: EntityKind::Unit,
				id: -4,
				role: "destination",
				reason: "identifiers cannot be negative",
			}
		);
		assert_eq!(validate_positive(EntityKind::Unit, 7, "destination"), Ok(7));
	}
}
