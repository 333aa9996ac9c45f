use std::sync::LazyLock;

use genie_primitives::EntityKind;
use genie_tables::Entity;
use serde::{Deserialize, Serialize};

use crate::fields::{FieldKind, FieldTable, Fields, field};

/// A sound definition: a weighted list of sample files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sound {
	pub id: i32,
	pub name: String,
	pub enabled: bool,
	pub play_delay: i16,
	pub cache_time: i32,
	pub total_probability: i16,
	pub files: Vec<SoundFile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundFile {
	pub file_name: String,
	pub probability: i16,
}

impl Sound {
	pub fn new(id: i32, name: &str) -> Self {
		Self {
			id,
			name: name.to_string(),
			enabled: true,
			play_delay: 0,
			cache_time: 300_000,
			total_probability: 100,
			files: Vec::new(),
		}
	}

	pub fn with_file(mut self, file_name: &str, probability: i16) -> Self {
		self.files.push(SoundFile {
			file_name: file_name.to_string(),
			probability,
		});
		self
	}
}

impl Entity for Sound {
	const KIND: EntityKind = EntityKind::Sound;

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
		self.files.is_empty()
	}

	fn set_minimal(&mut self) {
		self.files.clear();
	}

	fn blank() -> Option<Self> {
		let mut blank = Self::new(0, "");
		blank.disable();
		Some(blank)
	}
}

static SOUND_FIELDS: LazyLock<FieldTable<Sound>> = LazyLock::new(|| {
	use FieldKind::Plain;

	FieldTable::new(vec![
		field!(Sound, "name", Plain, base.name),
		field!(Sound, "enabled", Plain, base.enabled),
		field!(Sound, "play_delay", Plain, base.play_delay),
		field!(Sound, "cache_time", Plain, base.cache_time),
		field!(Sound, "total_probability", Plain, base.total_probability),
	])
});

impl Fields for Sound {
	fn fields() -> &'static FieldTable<Self> {
		&SOUND_FIELDS
	}
}
