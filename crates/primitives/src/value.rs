use std::fmt;

/// A dynamically typed field value exchanged with the field dispatch tables.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
	/// Any integer-backed field (ids, counts, flags, enumerations).
	Int(i64),
	/// Floating-point field.
	Float(f64),
	/// Text field.
	Text(String),
	/// Boolean field.
	Bool(bool),
}

impl FieldValue {
	/// Returns the integer value if this is an `Int` variant.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			Self::Int(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the value as a float; integers widen.
	pub fn as_float(&self) -> Option<f64> {
		match self {
			Self::Float(v) => Some(*v),
			Self::Int(v) => Some(*v as f64),
			_ => None,
		}
	}

	/// Returns the text value if this is a `Text` variant.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Text(v) => Some(v),
			_ => None,
		}
	}

	/// Returns the boolean value if this is a `Bool` variant.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the type name of this value.
	pub fn type_name(&self) -> &'static str {
		match self {
			Self::Int(_) => "int",
			Self::Float(_) => "float",
			Self::Text(_) => "text",
			Self::Bool(_) => "bool",
		}
	}
}

impl fmt::Display for FieldValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Int(v) => write!(f, "{v}"),
			Self::Float(v) => write!(f, "{v}"),
			Self::Text(v) => write!(f, "{v:?}"),
			Self::Bool(v) => write!(f, "{v}"),
		}
	}
}

impl From<i64> for FieldValue {
	fn from(v: i64) -> Self {
		Self::Int(v)
	}
}

impl From<i32> for FieldValue {
	fn from(v: i32) -> Self {
		Self::Int(v.into())
	}
}

impl From<f64> for FieldValue {
	fn from(v: f64) -> Self {
		Self::Float(v)
	}
}

impl From<f32> for FieldValue {
	fn from(v: f32) -> Self {
		Self::Float(v.into())
	}
}

impl From<bool> for FieldValue {
	fn from(v: bool) -> Self {
		Self::Bool(v)
	}
}

impl From<String> for FieldValue {
	fn from(v: String) -> Self {
		Self::Text(v)
	}
}

impl From<&str> for FieldValue {
	fn from(v: &str) -> Self {
		Self::Text(v.to_string())
	}
}
