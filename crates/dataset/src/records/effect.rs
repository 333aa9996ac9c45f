use std::sync::LazyLock;

use genie_primitives::EntityKind;
use genie_tables::Entity;
use serde::{Deserialize, Serialize};

use crate::fields::{FieldKind, FieldTable, Fields, field};

/// A named list of effect commands applied when a tech completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
	pub id: i32,
	pub name: String,
	pub enabled: bool,
	pub commands: Vec<EffectCommand>,
}

/// One effect command; the meaning of `a`..`d` depends on `command_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectCommand {
	pub command_type: u8,
	pub a: i16,
	pub b: i16,
	pub c: i16,
	pub d: f32,
}

impl Effect {
	pub fn new(id: i32, name: &str) -> Self {
		Self {
			id,
			name: name.to_string(),
			enabled: true,
			commands: Vec::new(),
		}
	}

	pub fn with_command(mut self, command: EffectCommand) -> Self {
		self.commands.push(command);
		self
	}
}

impl Entity for Effect {
	const KIND: EntityKind = EntityKind::Effect;

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
		self.commands.is_empty()
	}

	fn set_minimal(&mut self) {
		self.commands.clear();
	}

	fn blank() -> Option<Self> {
		let mut blank = Self::new(0, "");
		blank.disable();
		Some(blank)
	}
}

static EFFECT_FIELDS: LazyLock<FieldTable<Effect>> = LazyLock::new(|| {
	use FieldKind::Plain;

	FieldTable::new(vec![
		field!(Effect, "name", Plain, base.name),
		field!(Effect, "enabled", Plain, base.enabled),
	])
});

impl Fields for Effect {
	fn fields() -> &'static FieldTable<Self> {
		&EFFECT_FIELDS
	}
}
