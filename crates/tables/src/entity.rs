use std::fmt;

use genie_primitives::EntityKind;

/// Accessors every table record exposes to the table manager.
///
/// A placeholder is not a separate variant: it is a record whose `enabled` flag is
/// cleared, whose name is empty and whose kind-specific viability field holds its
/// minimal value. Files written by other tools carry no extra tag, so this
/// fingerprint is the only way to tell a capacity filler from a real record.
pub trait Entity: Clone + fmt::Debug + 'static {
	/// Kind this record belongs to.
	const KIND: EntityKind;

	/// Self-identifier stored inside the record.
	fn id(&self) -> i32;
	fn set_id(&mut self, id: i32);

	fn name(&self) -> &str;
	fn set_name(&mut self, name: &str);

	fn is_enabled(&self) -> bool;
	fn set_enabled(&mut self, enabled: bool);

	/// Returns true if the kind's viability field holds its minimal value.
	fn is_minimal(&self) -> bool;

	/// Writes the minimal viability value.
	fn set_minimal(&mut self);

	/// Record used as a template when a table holds no real record.
	///
	/// Kinds whose layout depends on a template (units) return `None`.
	fn blank() -> Option<Self> {
		None
	}

	/// Classifies a record by its structural fingerprint.
	fn is_placeholder(&self) -> bool {
		!self.is_enabled() && self.name().is_empty() && self.is_minimal()
	}

	/// Turns this record into a placeholder in place.
	fn disable(&mut self) {
		self.set_name("");
		self.set_enabled(false);
		self.set_minimal();
	}
}

/// Builds fresh placeholders from an owned template.
///
/// Each call to [`Placeholders::make`] clones the template, so no two slots ever
/// share a placeholder.
#[derive(Debug, Clone)]
pub struct Placeholders<R: Entity> {
	template: R,
}

impl<R: Entity> Placeholders<R> {
	/// Wraps `template`; it is disabled once here and cloned per placeholder.
	pub fn from_template(mut template: R) -> Self {
		template.disable();
		Self { template }
	}

	/// Returns a new placeholder whose self-identifier is `index`.
	pub fn make(&self, index: usize) -> R {
		let mut placeholder = self.template.clone();
		placeholder.set_id(index_to_id(index));
		placeholder
	}
}

/// Converts a table position into a stored identifier.
pub(crate) fn index_to_id(index: usize) -> i32 {
	i32::try_from(index).unwrap_or(i32::MAX)
}
