use serde::{Deserialize, Serialize};

/// What create, clone and paste do when the destination already holds a real record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
	/// Reject the operation; nothing is mutated.
	#[default]
	Error,
	/// Replace the destination unconditionally.
	Overwrite,
}

/// What move does when the destination already holds a real record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovePolicy {
	/// Reject the operation; nothing is mutated.
	#[default]
	Error,
	/// Replace the destination; the source slot becomes a placeholder.
	Overwrite,
	/// Exchange the two slots and their self-identifiers.
	Swap,
}

impl From<ConflictPolicy> for MovePolicy {
	fn from(policy: ConflictPolicy) -> Self {
		match policy {
			ConflictPolicy::Error => Self::Error,
			ConflictPolicy::Overwrite => Self::Overwrite,
		}
	}
}

/// Whether an operation may grow a table to reach its destination index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapPolicy {
	/// Reject any operation that would need to extend a table.
	Error,
	/// Extend with freshly built placeholders.
	#[default]
	Placeholder,
}
