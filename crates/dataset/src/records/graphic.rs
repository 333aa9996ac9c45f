use std::sync::LazyLock;

use genie_primitives::EntityKind;
use genie_tables::Entity;
use serde::{Deserialize, Serialize};

use crate::domains::GRAPHIC_LAYER;
use crate::fields::{FieldKind, FieldTable, Fields, field};

/// A sprite definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graphic {
	pub id: i32,
	pub name: String,
	pub enabled: bool,
	pub file_name: String,
	pub frame_count: u16,
	pub angle_count: u16,
	pub frame_duration: f32,
	pub layer: u8,
	pub sound_id: i32,
	pub next_graphic: i32,
}

impl Graphic {
	pub fn new(id: i32, name: &str, file_name: &str) -> Self {
		Self {
			id,
			name: name.to_string(),
			enabled: true,
			file_name: file_name.to_string(),
			frame_count: 1,
			angle_count: 1,
			frame_duration: 0.1,
			layer: 21,
			sound_id: -1,
			next_graphic: -1,
		}
	}
}

impl Entity for Graphic {
	const KIND: EntityKind = EntityKind::Graphic;

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
		self.frame_count == 0
	}

	fn set_minimal(&mut self) {
		self.frame_count = 0;
	}

	fn blank() -> Option<Self> {
		let mut blank = Self::new(0, "", "");
		blank.disable();
		Some(blank)
	}
}

static GRAPHIC_FIELDS: LazyLock<FieldTable<Graphic>> = LazyLock::new(|| {
	use FieldKind::{Enum, Plain, Reference};

	FieldTable::new(vec![
		field!(Graphic, "name", Plain, base.name),
		field!(Graphic, "enabled", Plain, base.enabled),
		field!(Graphic, "file_name", Plain, base.file_name),
		field!(Graphic, "frame_count", Plain, base.frame_count),
		field!(Graphic, "angle_count", Plain, base.angle_count),
		field!(Graphic, "frame_duration", Plain, base.frame_duration),
		field!(Graphic, "layer", Enum(&GRAPHIC_LAYER), base.layer),
		field!(Graphic, "sound_id", Reference(EntityKind::Sound), base.sound_id),
		field!(Graphic, "next_graphic", Reference(EntityKind::Graphic), base.next_graphic),
	])
});

impl Fields for Graphic {
	fn fields() -> &'static FieldTable<Self> {
		&GRAPHIC_FIELDS
	}
}
