use std::fmt;

use crate::kind::EntityKind;

/// A typed pointer to an entity slot: kind plus identifier.
///
/// Handles carry no borrow of the dataset, so they stay valid across edits and
/// may name slots that do not exist yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
	pub kind: EntityKind,
	pub id: i32,
}

impl Handle {
	pub const fn new(kind: EntityKind, id: i32) -> Self {
		Self { kind, id }
	}
}

impl fmt::Display for Handle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.kind, self.id)
	}
}

/// Candidate value assigned to a reference field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefValue {
	/// A raw identifier. Negative values mean "none".
	Id(i32),
	/// A typed handle; its kind must match the field's target kind.
	Handle(Handle),
	/// An export UUID, resolved to the entity's id at validation time.
	Tracked(String),
}

impl From<i32> for RefValue {
	fn from(id: i32) -> Self {
		Self::Id(id)
	}
}

impl From<Handle> for RefValue {
	fn from(handle: Handle) -> Self {
		Self::Handle(handle)
	}
}

impl fmt::Display for RefValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Id(id) => write!(f, "{id}"),
			Self::Handle(handle) => write!(f, "{handle}"),
			Self::Tracked(uuid) => write!(f, "uuid:{uuid}"),
		}
	}
}
