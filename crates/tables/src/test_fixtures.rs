use genie_primitives::EntityKind;

use crate::entity::Entity;
use crate::table::EntityTables;

/// Minimal record with a blank template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Widget {
	pub id: i32,
	pub name: String,
	pub enabled: bool,
	pub hit_points: i32,
	pub payload: u32,
}

impl Widget {
	pub fn real(id: i32, name: &str) -> Self {
		Self {
			id,
			name: name.to_string(),
			enabled: true,
			hit_points: 40,
			payload: 7,
		}
	}
}

impl Entity for Widget {
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
		self.hit_points == 1
	}

	fn set_minimal(&mut self) {
		self.hit_points = 1;
	}

	fn blank() -> Option<Self> {
		Some(Self {
			id: 0,
			name: String::new(),
			enabled: false,
			hit_points: 1,
			payload: 0,
		})
	}
}

/// Record kind that can only be built from an existing record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Strict {
	pub id: i32,
	pub name: String,
	pub enabled: bool,
	pub hit_points: i32,
}

impl Entity for Strict {
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

/// Builds `group_count` identical groups holding one real record per name.
pub(crate) fn widget_tables(group_count: usize, names: &[&str]) -> EntityTables<Widget> {
	let group: Vec<Option<Widget>> = names
		.iter()
		.enumerate()
		.map(|(index, name)| Some(Widget::real(index as i32, name)))
		.collect();
	EntityTables::from_groups(vec![group; group_count])
}
