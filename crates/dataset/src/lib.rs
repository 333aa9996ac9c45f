//! Genie dataset model.
//!
//! # Purpose
//!
//! Owns the concrete record kinds (units, graphics, sounds, techs, effects), the
//! [`Dataset`] that groups their tables, the static field dispatch tables used for
//! dynamic field access, and the [`DatCodec`] seam through which datasets are read
//! and written.
//!
//! # Key Types
//!
//! | Type | Role |
//! |------|------|
//! | [`Dataset`] | Civilizations plus one [`genie_tables::EntityTables`] per kind. |
//! | [`Record`] | Maps a record type to its table inside a dataset. |
//! | [`FieldTable`] / [`FieldDef`] | Name-indexed accessors, component and field kind per record type. |
//! | [`EnumDomain`] | Closed value set for enumeration and bitmask fields. |
//! | [`PostcardCodec`] | Versioned envelope codec with atomic writes. |
//!
//! # Invariants
//!
//! - A field table must be built once per kind and never consulted by probing components.
//!   - Enforced in: the `LazyLock` statics in each record module.
//!   - Tested by: `records::tests::component_fields_require_the_component`
//!   - Failure symptom: a field resolves to a different component depending on which
//!     components a record happens to carry.
//!
//! - A failed write must leave the previous file in place.
//!   - Enforced in: [`PostcardCodec`]'s `write` (temp file, then rename).
//!   - Tested by: `tests/codec_files.rs`
//!   - Failure symptom: a truncated dataset on disk after an I/O error.

pub mod codec;
mod dataset;
pub mod domains;
pub mod fields;
pub mod records;

pub use codec::{CodecError, DatCodec, PostcardCodec};
pub use dataset::{Civilization, Dataset, KindSummary, Record};
pub use domains::{EnumDomain, EnumValueError};
pub use fields::{Component, FieldDef, FieldError, FieldKind, FieldTable, Fields};
pub use records::{Effect, Graphic, Sound, Tech, Unit};
