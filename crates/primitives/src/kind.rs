use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The entity tables a dataset carries.
///
/// Units are the only grouped kind (one table per civilization); every other
/// kind owns a single table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
	Unit,
	Graphic,
	Sound,
	Tech,
	Effect,
}

impl EntityKind {
	/// Every kind, in dataset order.
	pub const ALL: [EntityKind; 5] = [Self::Unit, Self::Graphic, Self::Sound, Self::Tech, Self::Effect];

	/// Singular lowercase name.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Unit => "unit",
			Self::Graphic => "graphic",
			Self::Sound => "sound",
			Self::Tech => "tech",
			Self::Effect => "effect",
		}
	}

	/// Plural name used as the section key in exports and reports.
	pub const fn plural(self) -> &'static str {
		match self {
			Self::Unit => "units",
			Self::Graphic => "graphics",
			Self::Sound => "sounds",
			Self::Tech => "techs",
			Self::Effect => "effects",
		}
	}
}

impl fmt::Display for EntityKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Returned when a string names no known entity kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown entity kind: {0:?}")]
pub struct ParseKindError(pub String);

impl FromStr for EntityKind {
	type Err = ParseKindError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|kind| kind.as_str() == s || kind.plural() == s)
			.ok_or_else(|| ParseKindError(s.to_string()))
	}
}
