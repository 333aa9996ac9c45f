use std::sync::LazyLock;

use genie_primitives::EntityKind;
use genie_tables::Entity;
use serde::{Deserialize, Serialize};

use crate::domains::TECH_TYPE;
use crate::fields::{FieldKind, FieldTable, Fields, field};

/// A researchable technology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tech {
	pub id: i32,
	pub name: String,
	pub enabled: bool,
	pub research_time: i16,
	pub tech_type: u8,
	pub effect_id: i32,
	pub research_location: i32,
	pub required_tech: i32,
	pub icon_id: i16,
}

impl Tech {
	pub fn new(id: i32, name: &str) -> Self {
		Self {
			id,
			name: name.to_string(),
			enabled: true,
			research_time: 30,
			tech_type: 0,
			effect_id: -1,
			research_location: -1,
			required_tech: -1,
			icon_id: -1,
		}
	}
}

impl Entity for Tech {
	const KIND: EntityKind = EntityKind::Tech;

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
		self.research_time == 0
	}

	fn set_minimal(&mut self) {
		self.research_time = 0;
	}

	fn blank() -> Option<Self> {
		let mut blank = Self::new(0, "");
		blank.disable();
		Some(blank)
	}
}

static TECH_FIELDS: LazyLock<FieldTable<Tech>> = LazyLock::new(|| {
	use FieldKind::{Enum, Plain, Reference};

	FieldTable::new(vec![
		field!(Tech, "name", Plain, base.name),
		field!(Tech, "enabled", Plain, base.enabled),
		field!(Tech, "research_time", Plain, base.research_time),
		field!(Tech, "tech_type", Enum(&TECH_TYPE), base.tech_type),
		field!(Tech, "effect_id", Reference(EntityKind::Effect), base.effect_id),
		field!(Tech, "research_location", Reference(EntityKind::Unit), base.research_location),
		field!(Tech, "required_tech", Reference(EntityKind::Tech), base.required_tech),
		field!(Tech, "icon_id", Plain, base.icon_id),
	])
});

impl Fields for Tech {
	fn fields() -> &'static FieldTable<Self> {
		&TECH_FIELDS
	}
}
