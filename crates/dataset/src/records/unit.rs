use std::sync::LazyLock;

use genie_primitives::EntityKind;
use genie_tables::Entity;
use serde::{Deserialize, Serialize};

use crate::domains::{BLAST_ATTACK_LEVEL, CHARGE_TYPE, GARRISON_TYPE, STORE_MODE, UNIT_TYPE};
use crate::fields::{FieldKind, FieldTable, Fields, field};

/// A unit definition as stored in one civilization's roster.
///
/// Optional components mirror the type-dependent sections of the on-disk layout;
/// fields of an absent component cannot be read or written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
	pub id: i32,
	pub name: String,
	pub enabled: bool,
	pub unit_type: u8,
	pub class: i16,
	pub hit_points: i16,
	pub line_of_sight: f32,
	pub speed: f32,
	pub standing_graphic: i32,
	pub dying_graphic: i32,
	pub selection_sound: i32,
	pub dying_sound: i32,
	pub dead_unit_id: i32,
	pub resource_store_mode: u8,
	pub combat: Option<CombatInfo>,
	pub creation: Option<CreationInfo>,
	pub building: Option<BuildingInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatInfo {
	pub attack_graphic: i32,
	pub projectile_unit_id: i32,
	pub reload_time: f32,
	pub max_range: f32,
	pub accuracy_percent: i16,
	pub blast_attack_level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreationInfo {
	pub train_time: i16,
	pub train_location_id: i32,
	pub button_id: i8,
	pub charge_type: i8,
	pub garrison_graphic: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingInfo {
	pub construction_graphic: i32,
	pub construction_sound: i32,
	pub stack_unit_id: i32,
	pub head_unit_id: i32,
	pub research_tech_id: i32,
	pub garrison_type: u8,
}

impl Unit {
	/// A base-only unit with every reference cleared.
	pub fn new(id: i32, name: &str) -> Self {
		Self {
			id,
			name: name.to_string(),
			enabled: true,
			unit_type: 70,
			class: 0,
			hit_points: 1,
			line_of_sight: 1.0,
			speed: 0.0,
			standing_graphic: -1,
			dying_graphic: -1,
			selection_sound: -1,
			dying_sound: -1,
			dead_unit_id: -1,
			resource_store_mode: 0,
			combat: None,
			creation: None,
			building: None,
		}
	}
}

impl Default for CombatInfo {
	fn default() -> Self {
		Self {
			attack_graphic: -1,
			projectile_unit_id: -1,
			reload_time: 2.0,
			max_range: 0.0,
			accuracy_percent: 100,
			blast_attack_level: 0,
		}
	}
}

impl Default for CreationInfo {
	fn default() -> Self {
		Self {
			train_time: 0,
			train_location_id: -1,
			button_id: 0,
			charge_type: 0,
			garrison_graphic: -1,
		}
	}
}

impl Default for BuildingInfo {
	fn default() -> Self {
		Self {
			construction_graphic: -1,
			construction_sound: -1,
			stack_unit_id: -1,
			head_unit_id: -1,
			research_tech_id: -1,
			garrison_type: 0,
		}
	}
}

impl Entity for Unit {
	const KIND: EntityKind = EntityKind::Unit;

	fn id(&self) -> i32 {
		self.id
	}

	fn set_id(&mut self, id: i32) {
		self.id = id;
	}

	fn name(&self) -> &str {
		&self.name
	}

	fn set_name(&mut self, name: &str) {
		self.name = name.to_string();
	}

	fn is_enabled(&self) -> bool {
		self.enabled
	}

	fn set_enabled(&mut self, enabled: bool) {
		self.enabled = enabled;
	}

	fn is_minimal(&self) -> bool {
		self.hit_points == 1
	}

	fn set_minimal(&mut self) {
		self.hit_points = 1;
	}
}

static UNIT_FIELDS: LazyLock<FieldTable<Unit>> = LazyLock::new(|| {
	use EntityKind::{Graphic, Sound, Tech};
	use FieldKind::{Enum, Plain, Reference};

	FieldTable::new(vec![
		field!(Unit, "name", Plain, base.name),
		field!(Unit, "enabled", Plain, base.enabled),
		field!(Unit, "unit_type", Enum(&UNIT_TYPE), base.unit_type),
		field!(Unit, "class", Plain, base.class),
		field!(Unit, "hit_points", Plain, base.hit_points),
		field!(Unit, "line_of_sight", Plain, base.line_of_sight),
		field!(Unit, "speed", Plain, base.speed),
		field!(Unit, "standing_graphic", Reference(Graphic), base.standing_graphic),
		field!(Unit, "dying_graphic", Reference(Graphic), base.dying_graphic),
		field!(Unit, "selection_sound", Reference(Sound), base.selection_sound),
		field!(Unit, "dying_sound", Reference(Sound), base.dying_sound),
		field!(Unit, "dead_unit_id", Reference(EntityKind::Unit), base.dead_unit_id),
		field!(Unit, "resource_store_mode", Enum(&STORE_MODE), base.resource_store_mode),
		field!(Unit, "attack_graphic", Reference(Graphic), Combat(combat).attack_graphic),
		field!(Unit, "projectile_unit_id", Reference(EntityKind::Unit), Combat(combat).projectile_unit_id),
		field!(Unit, "reload_time", Plain, Combat(combat).reload_time),
		field!(Unit, "max_range", Plain, Combat(combat).max_range),
		field!(Unit, "accuracy_percent", Plain, Combat(combat).accuracy_percent),
		field!(Unit, "blast_attack_level", Enum(&BLAST_ATTACK_LEVEL), Combat(combat).blast_attack_level),
		field!(Unit, "train_time", Plain, Creation(creation).train_time),
		field!(Unit, "train_location_id", Reference(EntityKind::Unit), Creation(creation).train_location_id),
		field!(Unit, "button_id", Plain, Creation(creation).button_id),
		field!(Unit, "charge_type", Enum(&CHARGE_TYPE), Creation(creation).charge_type),
		field!(Unit, "garrison_graphic", Reference(Graphic), Creation(creation).garrison_graphic),
		field!(Unit, "construction_graphic", Reference(Graphic), Building(building).construction_graphic),
		field!(Unit, "construction_sound", Reference(Sound), Building(building).construction_sound),
		field!(Unit, "stack_unit_id", Reference(EntityKind::Unit), Building(building).stack_unit_id),
		field!(Unit, "head_unit_id", Reference(EntityKind::Unit), Building(building).head_unit_id),
		field!(Unit, "research_tech_id", Reference(Tech), Building(building).research_tech_id),
		field!(Unit, "garrison_type", Enum(&GARRISON_TYPE), Building(building).garrison_type),
	])
});

impl Fields for Unit {
	fn fields() -> &'static FieldTable<Self> {
		&UNIT_FIELDS
	}
}
