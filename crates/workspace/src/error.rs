use genie_dataset::{CodecError, FieldError};
use genie_primitives::EntityKind;
use genie_tables::TableError;

use crate::config::ConfigError;
use crate::export::ExportError;
use crate::integrity::IntegrityReport;
use crate::refs::ValidationError;

/// Any failure of a workspace operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Table(#[from] TableError),

	#[error(transparent)]
	Field(#[from] FieldError),

	#[error(transparent)]
	Validation(#[from] ValidationError),

	#[error(transparent)]
	Codec(#[from] CodecError),

	#[error(transparent)]
	Config(#[from] ConfigError),

	#[error(transparent)]
	Export(#[from] ExportError),

	#[error("{0}")]
	Integrity(IntegrityReport),

	#[error("clipboard is empty")]
	ClipboardEmpty,

	#[error("clipboard holds a {found}, not a {expected}")]
	ClipboardKind { expected: EntityKind, found: EntityKind },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
