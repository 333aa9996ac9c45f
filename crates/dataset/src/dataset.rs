use genie_primitives::EntityKind;
use genie_tables::{Entity, EntityTables};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::fields::Fields;
use crate::records::{Effect, Graphic, Sound, Tech, Unit};

/// One civilization: the owner of a unit group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Civilization {
	pub name: String,
}

/// The whole in-memory dataset.
///
/// Units carry one group per civilization, in civilization order; every other kind
/// has a single group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
	pub civilizations: Vec<Civilization>,
	pub units: EntityTables<Unit>,
	pub graphics: EntityTables<Graphic>,
	pub sounds: EntityTables<Sound>,
	pub techs: EntityTables<Tech>,
	pub effects: EntityTables<Effect>,
}

/// A record kind stored in a [`Dataset`].
pub trait Record: Entity + Fields + PartialEq + Serialize + DeserializeOwned {
	fn tables(dataset: &Dataset) -> &EntityTables<Self>;

	fn tables_mut(dataset: &mut Dataset) -> &mut EntityTables<Self>;
}

macro_rules! record_tables {
	($($record:ty => $field:ident),* $(,)?) => {$(
		impl Record for $record {
			fn tables(dataset: &Dataset) -> &EntityTables<Self> {
				&dataset.$field
			}

			fn tables_mut(dataset: &mut Dataset) -> &mut EntityTables<Self> {
				&mut dataset.$field
			}
		}
	)*};
}

record_tables!(
	Unit => units,
	Graphic => graphics,
	Sound => sounds,
	Tech => techs,
	Effect => effects,
);

/// Runs `$body` with `$tables` bound to the table set of `$kind`.
#[macro_export]
macro_rules! with_tables {
	($dataset:expr, $kind:expr, |$tables:ident| $body:expr) => {
		match $kind {
			::genie_primitives::EntityKind::Unit => {
				let $tables = &$dataset.units;
				$body
			}
			::genie_primitives::EntityKind::Graphic => {
				let $tables = &$dataset.graphics;
				$body
			}
			::genie_primitives::EntityKind::Sound => {
				let $tables = &$dataset.sounds;
				$body
			}
			::genie_primitives::EntityKind::Tech => {
				let $tables = &$dataset.techs;
				$body
			}
			::genie_primitives::EntityKind::Effect => {
				let $tables = &$dataset.effects;
				$body
			}
		}
	};
}

/// Per-kind slot and record counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindSummary {
	pub kind: EntityKind,
	pub groups: usize,
	pub slots: usize,
	pub active: usize,
}

impl Dataset {
	/// An empty dataset with one unit group per civilization name.
	pub fn new<I, S>(civilizations: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let civilizations: Vec<Civilization> = civilizations
			.into_iter()
			.map(|name| Civilization { name: name.into() })
			.collect();
		Self {
			units: EntityTables::new(civilizations.len()),
			civilizations,
			graphics: EntityTables::new(1),
			sounds: EntityTables::new(1),
			techs: EntityTables::new(1),
			effects: EntityTables::new(1),
		}
	}

	pub fn civ_count(&self) -> usize {
		self.civilizations.len()
	}

	/// Position of the civilization named `name`.
	pub fn civ_index(&self, name: &str) -> Option<usize> {
		self.civilizations.iter().position(|civ| civ.name == name)
	}

	pub fn tables<R: Record>(&self) -> &EntityTables<R> {
		R::tables(self)
	}

	pub fn tables_mut<R: Record>(&mut self) -> &mut EntityTables<R> {
		R::tables_mut(self)
	}

	/// True if a real record of `kind` exists at `id` in any group.
	pub fn exists(&self, kind: EntityKind, id: i32) -> bool {
		with_tables!(self, kind, |tables| tables.exists(id))
	}

	/// True if any slot of `kind` at `id` is non-empty.
	pub fn exists_raw(&self, kind: EntityKind, id: i32) -> bool {
		with_tables!(self, kind, |tables| tables.exists_raw(id))
	}

	/// Slots in the representative group of `kind`.
	pub fn count(&self, kind: EntityKind) -> usize {
		with_tables!(self, kind, |tables| tables.count())
	}

	pub fn summary(&self, kind: EntityKind) -> KindSummary {
		with_tables!(self, kind, |tables| KindSummary {
			kind,
			groups: tables.group_count(),
			slots: tables.count(),
			active: tables.count_active(),
		})
	}

	/// Summaries for every kind, in dataset order.
	pub fn summaries(&self) -> Vec<KindSummary> {
		EntityKind::ALL.into_iter().map(|kind| self.summary(kind)).collect()
	}
}

#[cfg(test)]
mod tests {
	use genie_primitives::EntityKind;
	use genie_tables::CreateSpec;
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn new_dataset_has_one_unit_group_per_civ() {
		let dataset = Dataset::new(["Gaia", "Britons", "Franks"]);
		assert_eq!(dataset.units.group_count(), 3);
		assert_eq!(dataset.graphics.group_count(), 1);
		assert_eq!(dataset.civ_index("Franks"), Some(2));
	}

	#[test]
	fn kind_dispatch_reaches_each_table() {
		let mut dataset = Dataset::new(["Gaia"]);
		dataset.tables_mut::<Sound>().create(CreateSpec::new("arrow").at(2)).unwrap();

		assert!(dataset.exists(EntityKind::Sound, 2));
		assert!(!dataset.exists(EntityKind::Sound, 1));
		assert!(dataset.exists_raw(EntityKind::Sound, 1));
		assert!(!dataset.exists(EntityKind::Graphic, 2));
		assert_eq!(
			dataset.summary(EntityKind::Sound),
			KindSummary {
				kind: EntityKind::Sound,
				groups: 1,
				slots: 3,
				active: 1,
			}
		);
	}
}
