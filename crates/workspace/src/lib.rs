#![cfg_attr(doc, allow(rustdoc::private_intra_doc_links))]
//! Editing session over a Genie dataset.
//!
//! # Purpose
//!
//! Ties the tables, the field dispatch and the codec into one [`Workspace`] per loaded
//! dataset. Reference fields may name records that do not exist yet; the workspace
//! records every such assignment and checks them all in one pass before a save is
//! allowed to write.
//!
//! # Mental Model
//!
//! 1. **Immediate checks:** ids, placement conflicts, enumeration values and storage
//!    ranges are checked when the edit is made and rejected synchronously.
//! 2. **Deferred checks:** a reference assignment is written to the record and appended
//!    to the [`ReferenceLog`] with its [`Origin`](genie_primitives::Origin). Nothing
//!    checks it yet.
//! 3. **Two-pass save:** [`Workspace::save`] runs the [`Validator`] against the dataset
//!    as it is at that moment, then [`integrity::check_on_save`] for looping unit chains
//!    and duplicate export names. Any failure aborts the save before the codec is
//!    touched; otherwise the dataset is written and the export JSON follows on a best
//!    effort basis.
//!
//! # Key Types
//!
//! | Type | Role |
//! |------|------|
//! | [`Workspace`] | Session context: dataset, reference log, clipboard, exports, config. |
//! | [`ReferenceLog`] | Pending reference assignments since the last validation. |
//! | [`Validator`] | Resolves and checks logged references against a dataset. |
//! | [`ExportRegistry`] | UUID-tracked entities created this session, written as JSON. |
//! | [`WorkspaceConfig`] | Default policies and save switches, loaded from TOML. |
//! | [`IntegrityReport`] | Whole-dataset structural and reference problems. |
//!
//! # Invariants
//!
//! - The reference log must be empty after every validation pass.
//!   - Enforced in: [`Validator::validate_all`].
//!   - Tested by: [`crate::invariants::test_log_empty_after_validation`]
//!   - Failure symptom: a fixed reference keeps failing later saves.
//!
//! - A failed save must not call the codec.
//!   - Enforced in: [`Workspace::save`].
//!   - Tested by: [`crate::invariants::test_failed_save_writes_nothing`]
//!   - Failure symptom: a dataset with a dangling id or a looping `dead_unit_id` chain
//!     reaches disk.
//!
//! - A reference to a record created later in the session must pass validation.
//!   - Enforced in: [`ReferenceLog::add_deferred`] (no existence check at assignment).
//!   - Tested by: [`crate::invariants::test_forward_reference_accepted`]
//!   - Failure symptom: edit scripts must be ordered so targets exist before use.

mod clipboard;
pub mod config;
mod error;
pub mod export;
pub mod integrity;
pub mod refs;
mod workspace;

pub use clipboard::Clipboard;
pub use config::{ConfigError, WorkspaceConfig};
pub use error::{Error, Result};
pub use export::{Dependency, ExportEntry, ExportError, ExportRegistry};
pub use integrity::{IntegrityIssue, IntegrityReport};
pub use refs::{DeferredReference, ReferenceLog, ReferenceNotFound, ValidationError, Validator};
pub use workspace::Workspace;

#[cfg(any(test, doc))]
pub(crate) mod invariants;

#[cfg(any(test, doc))]
pub(crate) mod test_fixtures;

#[cfg(test)]
mod tests;
