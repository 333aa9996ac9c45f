//! Static per-kind field dispatch.
//!
//! Each record kind owns one [`FieldTable`], built once on first use, that maps a
//! flattened field name to the component owning it, the field's kind and a pair of
//! accessor functions. Lookups never inspect components at call time.

use std::fmt;

use genie_primitives::{EntityKind, FieldValue};
use rustc_hash::FxHashMap as HashMap;

use crate::domains::{EnumDomain, EnumValueError};

/// The part of a record a field lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
	/// Always present.
	Base,
	/// Combat data; only attacking units carry it.
	Combat,
	/// Training data; only creatable units carry it.
	Creation,
	/// Building data; only buildings carry it.
	Building,
}

impl Component {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Base => "base",
			Self::Combat => "combat",
			Self::Creation => "creation",
			Self::Building => "building",
		}
	}
}

impl fmt::Display for Component {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// How assignments to a field are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
	/// Range-checked against the storage width only.
	Plain,
	/// Holds an id of the given kind; existence is checked at save time.
	Reference(EntityKind),
	/// Checked against a closed domain at assignment time.
	Enum(&'static EnumDomain),
}

/// Synchronous failures of field access.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
	#[error("{kind} has no field named {field:?}")]
	UnknownField { kind: EntityKind, field: String },

	#[error("{field}: record has no {component} component")]
	ComponentMissing { field: &'static str, component: Component },

	#[error("{field}: expected {expected}, got {found}")]
	TypeMismatch {
		field: &'static str,
		expected: &'static str,
		found: &'static str,
	},

	#[error("{field}: {value} does not fit in {ty}")]
	OutOfRange {
		field: &'static str,
		value: FieldValue,
		ty: &'static str,
	},

	#[error(transparent)]
	EnumValue(#[from] EnumValueError),

	#[error("{field}: expected a {expected} handle, got a {found} handle")]
	HandleKindMismatch {
		field: String,
		expected: EntityKind,
		found: EntityKind,
	},

	#[error("no real {kind} record at id {id} in the selected groups")]
	NoRecord { kind: EntityKind, id: i32 },
}

/// Storage types a field accessor can convert to and from [`FieldValue`].
pub trait FieldType: Sized {
	const TYPE_NAME: &'static str;

	fn to_value(&self) -> FieldValue;

	fn from_value(field: &'static str, value: &FieldValue) -> Result<Self, FieldError>;
}

fn mismatch(field: &'static str, expected: &'static str, value: &FieldValue) -> FieldError {
	FieldError::TypeMismatch {
		field,
		expected,
		found: value.type_name(),
	}
}

macro_rules! int_field_type {
	($($ty:ty),* $(,)?) => {$(
		impl FieldType for $ty {
			const TYPE_NAME: &'static str = stringify!($ty);

			fn to_value(&self) -> FieldValue {
				FieldValue::Int(i64::from(*self))
			}

			fn from_value(field: &'static str, value: &FieldValue) -> Result<Self, FieldError> {
				let raw = value.as_int().ok_or_else(|| mismatch(field, "int", value))?;
				<$ty>::try_from(raw).map_err(|_| FieldError::OutOfRange {
					field,
					value: value.clone(),
					ty: Self::TYPE_NAME,
				})
			}
		}
	)*};
}

int_field_type!(i8, i16, i32, u8, u16, u32);

impl FieldType for f32 {
	const TYPE_NAME: &'static str = "f32";

	fn to_value(&self) -> FieldValue {
		FieldValue::Float(f64::from(*self))
	}

	fn from_value(field: &'static str, value: &FieldValue) -> Result<Self, FieldError> {
		let raw = value.as_float().ok_or_else(|| mismatch(field, "float", value))?;
		if raw.is_finite() && raw.abs() > f64::from(f32::MAX) {
			return Err(FieldError::OutOfRange {
				field,
				value: value.clone(),
				ty: Self::TYPE_NAME,
			});
		}
		Ok(raw as f32)
	}
}

impl FieldType for bool {
	const TYPE_NAME: &'static str = "bool";

	fn to_value(&self) -> FieldValue {
		FieldValue::Bool(*self)
	}

	fn from_value(field: &'static str, value: &FieldValue) -> Result<Self, FieldError> {
		match value {
			FieldValue::Bool(flag) => Ok(*flag),
			FieldValue::Int(0) => Ok(false),
			FieldValue::Int(1) => Ok(true),
			other => Err(mismatch(field, "bool", other)),
		}
	}
}

impl FieldType for String {
	const TYPE_NAME: &'static str = "text";

	fn to_value(&self) -> FieldValue {
		FieldValue::Text(self.clone())
	}

	fn from_value(field: &'static str, value: &FieldValue) -> Result<Self, FieldError> {
		value.as_str().map(str::to_string).ok_or_else(|| mismatch(field, "text", value))
	}
}

/// Reads a field; `None` when the owning component is absent.
pub type FieldGetter<R> = fn(&R) -> Option<FieldValue>;

/// Writes a field after converting the value to its storage type.
pub type FieldSetter<R> = fn(&mut R, &FieldValue) -> Result<(), FieldError>;

/// One entry of a kind's field table.
pub struct FieldDef<R> {
	pub name: &'static str,
	pub component: Component,
	pub kind: FieldKind,
	pub get: FieldGetter<R>,
	pub set: FieldSetter<R>,
}

impl<R> fmt::Debug for FieldDef<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FieldDef")
			.field("name", &self.name)
			.field("component", &self.component)
			.field("kind", &self.kind)
			.finish()
	}
}

impl<R> FieldDef<R> {
	/// Reads the field, reporting an absent component as an error.
	pub fn read(&self, record: &R) -> Result<FieldValue, FieldError> {
		(self.get)(record).ok_or(FieldError::ComponentMissing {
			field: self.name,
			component: self.component,
		})
	}

	/// Runs the checks that do not depend on other tables, then writes.
	pub fn write(&self, record: &mut R, value: &FieldValue) -> Result<(), FieldError> {
		if let FieldKind::Enum(domain) = self.kind {
			let raw = value.as_int().ok_or_else(|| mismatch(self.name, "int", value))?;
			domain.check(self.name, raw)?;
		}
		(self.set)(record, value)
	}
}

/// Name-indexed field definitions for one record kind.
#[derive(Debug)]
pub struct FieldTable<R> {
	defs: Vec<FieldDef<R>>,
	index: HashMap<&'static str, usize>,
}

impl<R> FieldTable<R> {
	pub fn new(defs: Vec<FieldDef<R>>) -> Self {
		let index = defs.iter().enumerate().map(|(slot, def)| (def.name, slot)).collect();
		Self { defs, index }
	}

	pub fn get(&self, name: &str) -> Option<&FieldDef<R>> {
		self.index.get(name).map(|&slot| &self.defs[slot])
	}

	pub fn iter(&self) -> impl Iterator<Item = &FieldDef<R>> {
		self.defs.iter()
	}

	/// Fields that hold ids of another kind.
	pub fn references(&self) -> impl Iterator<Item = (&FieldDef<R>, EntityKind)> {
		self.defs.iter().filter_map(|def| match def.kind {
			FieldKind::Reference(target) => Some((def, target)),
			_ => None,
		})
	}

	pub fn len(&self) -> usize {
		self.defs.len()
	}

	pub fn is_empty(&self) -> bool {
		self.defs.is_empty()
	}
}

/// Records that expose a static field table.
pub trait Fields: Sized + 'static {
	fn fields() -> &'static FieldTable<Self>;

	/// Looks up a field, reporting unknown names against `kind`.
	fn field(kind: EntityKind, name: &str) -> Result<&'static FieldDef<Self>, FieldError> {
		Self::fields().get(name).ok_or_else(|| FieldError::UnknownField {
			kind,
			field: name.to_string(),
		})
	}
}

/// Builds a [`FieldDef`] for a field of the record itself or of one optional component.
macro_rules! field {
	($record:ty, $name:literal, $kind:expr, base.$field:ident) => {
		$crate::fields::FieldDef::<$record> {
			name: $name,
			component: $crate::fields::Component::Base,
			kind: $kind,
			get: |record: &$record| Some($crate::fields::FieldType::to_value(&record.$field)),
			set: |record: &mut $record, value: &::genie_primitives::FieldValue| {
				record.$field = $crate::fields::FieldType::from_value($name, value)?;
				Ok(())
			},
		}
	};
	($record:ty, $name:literal, $kind:expr, $component:ident($slot:ident).$field:ident) => {
		$crate::fields::FieldDef::<$record> {
			name: $name,
			component: $crate::fields::Component::$component,
			kind: $kind,
			get: |record: &$record| {
				record
					.$slot
					.as_ref()
					.map(|part| $crate::fields::FieldType::to_value(&part.$field))
			},
			set: |record: &mut $record, value: &::genie_primitives::FieldValue| {
				let part = record.$slot.as_mut().ok_or($crate::fields::FieldError::ComponentMissing {
					field: $name,
					component: $crate::fields::Component::$component,
				})?;
				part.$field = $crate::fields::FieldType::from_value($name, value)?;
				Ok(())
			},
		}
	};
}

pub(crate) use field;
