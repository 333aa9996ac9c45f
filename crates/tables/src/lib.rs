#![cfg_attr(doc, allow(rustdoc::private_intra_doc_links))]
//! Dense, placeholder-backed entity tables.
//!
//! # Purpose
//!
//! A dataset stores each entity kind as one or more parallel tables ("groups"), e.g. one
//! unit table per civilization. An entity's identifier is its position in the table, so
//! the tables can never contain an unrepresentable hole. This crate owns that layout:
//! it allocates identifiers, grows tables with placeholders, and places, relocates and
//! tombstones records.
//!
//! # Mental Model
//!
//! 1. **Slots:** every position holds `Some(record)` or, only in data loaded from an
//!    external file, `None`. A record is either real or a placeholder; placeholders are
//!    recognised by a structural fingerprint (see [`Entity::is_placeholder`]).
//! 2. **Allocation:** [`alloc::allocate_next`] hands out the append position of the
//!    representative group; explicit ids are checked by [`alloc::validate_positive`].
//! 3. **Placement:** [`EntityTables::create`], [`EntityTables::clone_entity`],
//!    [`EntityTables::move_entity`] and [`EntityTables::delete`] run every check first,
//!    then mutate.
//!
//! # Key Types
//!
//! | Type | Role |
//! |------|------|
//! | [`Entity`] | Identity, naming and fingerprint accessors a record must expose. |
//! | [`EntityTables`] | The per-kind table set and every placement operation. |
//! | [`Placeholders`] | Builds fresh placeholders from an owned template. |
//! | [`CreateSpec`] / [`CloneSpec`] | Placement requests with their policies. |
//! | [`TableError`] | Synchronous rejection reasons. |
//!
//! # Invariants
//!
//! - Groups of a kind must stay the same length unless a caller restricts the groups.
//!   - Enforced in: [`EntityTables::ensure_capacity`] (placement operations always grow every group).
//!   - Tested by: [`crate::invariants::test_density_across_groups`]
//!   - Failure symptom: a civilization's roster is shorter than the others and the file
//!     is rejected by the game.
//!
//! - Extension must insert distinct, freshly built placeholders, never `None`.
//!   - Enforced in: [`Placeholders::make`].
//!   - Tested by: [`crate::invariants::test_extension_inserts_distinct_placeholders`]
//!   - Failure symptom: editing one placeholder edits many, or a null slot is written.
//!
//! - Identifier must equal table position.
//!   - Enforced in: [`EntityTables::move_entity`], [`Placeholders::make`].
//!   - Tested by: [`crate::invariants::test_identifier_equals_position`]
//!   - Failure symptom: a moved record still reports its old id.
//!
//! - A rejected operation must leave every table unchanged.
//!   - Enforced in: every placement operation (checks precede the first write).
//!   - Tested by: [`crate::invariants::test_rejected_operation_is_noop`]
//!   - Failure symptom: a `Conflict` error leaves a half-extended table behind.

pub mod alloc;
mod entity;
mod error;
mod spec;
mod table;

pub use entity::{Entity, Placeholders};
pub use error::TableError;
pub use spec::{CloneSpec, CreateSpec};
pub use table::{EntityTables, Slot};

#[cfg(any(test, doc))]
pub(crate) mod invariants;

#[cfg(any(test, doc))]
pub(crate) mod test_fixtures;
