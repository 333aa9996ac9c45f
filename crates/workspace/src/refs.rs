//! Deferred reference recording and validation.
//!
//! Assigning a reference field never checks that the target exists: the target may
//! be created later in the same session. The assignment is appended to a
//! [`ReferenceLog`] instead, and [`Validator::validate_all`] checks every entry
//! against the dataset as it is when validation runs.

use genie_dataset::{Dataset, FieldError};
use genie_primitives::{EntityKind, Origin, RefValue};
use tracing::{debug, trace};

use crate::export::ExportRegistry;

/// One recorded reference assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredReference {
	pub target: EntityKind,
	pub value: RefValue,
	pub field: String,
	pub origin: Origin,
}

/// Pending reference assignments since the last validation pass.
#[derive(Debug, Clone, Default)]
pub struct ReferenceLog {
	entries: Vec<DeferredReference>,
}

impl ReferenceLog {
	/// Appends an assignment without checking that the target exists.
	///
	/// A handle of a different kind than `target` can never become valid and is
	/// rejected here.
	pub fn add_deferred(&mut self, target: EntityKind, value: RefValue, field: impl Into<String>, origin: Origin) -> Result<(), FieldError> {
		let field = field.into();
		if let RefValue::Handle(handle) = &value
			&& handle.kind != target
		{
			return Err(FieldError::HandleKindMismatch {
				field,
				expected: target,
				found: handle.kind,
			});
		}
		trace!(target: "genie::refs", %target, %value, %field, %origin, "deferred");
		self.entries.push(DeferredReference {
			target,
			value,
			field,
			origin,
		});
		Ok(())
	}

	pub fn clear(&mut self) {
		self.entries.clear();
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &DeferredReference> {
		self.entries.iter()
	}
}

/// A deferred reference whose target does not exist at validation time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {kind} {value} not found (set at {origin}); {}", describe_range(*kind, *table_len, id.is_none()))]
pub struct ReferenceNotFound {
	pub kind: EntityKind,
	pub value: RefValue,
	/// Resolved id; `None` when a tracked UUID is not registered.
	pub id: Option<i32>,
	pub field: String,
	pub origin: Origin,
	/// Slots in the target table when validation ran.
	pub table_len: usize,
}

fn describe_range(kind: EntityKind, table_len: usize, unregistered: bool) -> String {
	if unregistered {
		return format!("uuid is not registered for {}", kind.plural());
	}
	match table_len {
		0 => format!("total {}: 0, table is empty", kind.plural()),
		len => format!("total {}: {len}, valid range 0-{}", kind.plural(), len - 1),
	}
}

/// Aggregate failure of a deferred validation pass.
///
/// Displays the first failure; every failure is available in `failures`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}{}", failures.first().map(ToString::to_string).unwrap_or_default(), match failures.len() { 0 | 1 => String::new(), n => format!(" (and {} more)", n - 1) })]
pub struct ValidationError {
	pub failures: Vec<ReferenceNotFound>,
}

/// How a logged value resolves against the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
	/// Negative ids mean "none" and are never checked.
	Skip,
	Id(i32),
	/// A tracked UUID that the export registry does not know for this kind.
	Unregistered,
}

/// Checks logged references against a dataset.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
	dataset: &'a Dataset,
	exports: &'a ExportRegistry,
}

impl<'a> Validator<'a> {
	pub fn new(dataset: &'a Dataset, exports: &'a ExportRegistry) -> Self {
		Self { dataset, exports }
	}

	pub fn resolve(&self, target: EntityKind, value: &RefValue) -> Resolution {
		let id = match value {
			RefValue::Id(id) => *id,
			RefValue::Handle(handle) => handle.id,
			RefValue::Tracked(uuid) => match self.exports.id_for(target, uuid) {
				Some(id) => id,
				None => return Resolution::Unregistered,
			},
		};
		if id < 0 { Resolution::Skip } else { Resolution::Id(id) }
	}

	/// Checks one entry; `None` when its target exists or it names no target.
	pub fn check(&self, entry: &DeferredReference) -> Option<ReferenceNotFound> {
		let id = match self.resolve(entry.target, &entry.value) {
			Resolution::Skip => return None,
			Resolution::Id(id) if self.dataset.exists(entry.target, id) => return None,
			Resolution::Id(id) => Some(id),
			Resolution::Unregistered => None,
		};
		Some(ReferenceNotFound {
			kind: entry.target,
			value: entry.value.clone(),
			id,
			field: entry.field.clone(),
			origin: entry.origin.clone(),
			table_len: self.dataset.count(entry.target),
		})
	}

	/// Checks every logged entry, then clears the log whatever the outcome.
	pub fn validate_all(&self, log: &mut ReferenceLog) -> Vec<ReferenceNotFound> {
		let failures: Vec<ReferenceNotFound> = log.iter().filter_map(|entry| self.check(entry)).collect();
		debug!(target: "genie::refs", checked = log.len(), failed = failures.len(), "validated deferred references");
		log.clear();
		failures
	}
}
