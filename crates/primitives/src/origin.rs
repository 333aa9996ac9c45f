use std::borrow::Cow;
use std::fmt;
use std::panic::Location;

/// Where a recorded operation came from.
///
/// Captured with `#[track_caller]` at the public entry point, optionally tagged
/// with a caller-supplied label (a script name, an edit batch, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
	pub label: Option<Cow<'static, str>>,
	pub file: &'static str,
	pub line: u32,
}

impl Origin {
	/// Records the location of the caller.
	#[track_caller]
	pub fn caller() -> Self {
		let location = Location::caller();
		Self {
			label: None,
			file: location.file(),
			line: location.line(),
		}
	}

	/// Records the location of the caller under a label.
	#[track_caller]
	pub fn labeled(label: impl Into<Cow<'static, str>>) -> Self {
		Self {
			label: Some(label.into()),
			..Self::caller()
		}
	}

	/// Returns a copy carrying `label`, keeping the location.
	pub fn with_label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
		self.label = Some(label.into());
		self
	}
}

impl fmt::Display for Origin {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.label {
			Some(label) => write!(f, "{label} ({}:{})", self.file, self.line),
			None => write!(f, "{}:{}", self.file, self.line),
		}
	}
}
