use std::any::Any;
use std::fmt;

use genie_primitives::EntityKind;
use genie_tables::{Entity, Slot};

/// Per-group snapshot of one identifier, held between copy and paste.
pub struct Clipboard {
	kind: EntityKind,
	source_id: i32,
	records: Box<dyn Any>,
}

impl fmt::Debug for Clipboard {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Clipboard")
			.field("kind", &self.kind)
			.field("source_id", &self.source_id)
			.finish_non_exhaustive()
	}
}

impl Clipboard {
	pub fn new<R: Entity>(source_id: i32, records: Vec<Slot<R>>) -> Self {
		Self {
			kind: R::KIND,
			source_id,
			records: Box::new(records),
		}
	}

	pub fn kind(&self) -> EntityKind {
		self.kind
	}

	pub fn source_id(&self) -> i32 {
		self.source_id
	}

	/// The snapshot, if it was taken from a table of `R`.
	pub fn records<R: Entity>(&self) -> Option<&[Slot<R>]> {
		self.records.downcast_ref::<Vec<Slot<R>>>().map(Vec::as_slice)
	}
}
