use genie_primitives::EntityKind;

/// Synchronous rejections raised by table operations.
///
/// Every variant is produced before the first write, so a returned error means the
/// tables are exactly as they were before the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
	/// Identifier is negative, or names a record that must exist but does not.
	#[error("invalid {kind} id {id} ({role}): {reason}")]
	InvalidId {
		kind: EntityKind,
		id: i64,
		role: &'static str,
		reason: &'static str,
	},

	/// Destination holds a real record and the policy is `error`.
	#[error("{kind} id {id} already exists; use the overwrite policy to replace it")]
	Conflict { kind: EntityKind, id: i32 },

	/// Reaching the index would extend the table and the gap policy is `error`.
	#[error("{kind} id {id} is past the end of the table (len {len}); use the placeholder gap policy to extend")]
	GapNotAllowed { kind: EntityKind, id: i32, len: usize },

	/// No real record is available to build from.
	#[error("no {kind} template available{}", template.map(|id| format!(" at id {id}")).unwrap_or_default())]
	TemplateNotFound { kind: EntityKind, template: Option<i32> },
}

impl TableError {
	/// Kind of the table that rejected the operation.
	pub fn kind(&self) -> EntityKind {
		match self {
			Self::InvalidId { kind, .. }
			| Self::Conflict { kind, .. }
			| Self::GapNotAllowed { kind, .. }
			| Self::TemplateNotFound { kind, .. } => *kind,
		}
	}
}
