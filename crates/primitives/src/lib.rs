//! Core vocabulary for dataset editing: entity kinds, group selection, placement
//! policies, field values and call origins.

/// Group selectors for per-group tables.
pub mod groups;
/// Typed entity handles and reference candidates.
pub mod handle;
/// Entity kinds stored in a dataset.
pub mod kind;
/// Call-site provenance attached to recorded operations.
pub mod origin;
/// Conflict and gap policies for placement operations.
pub mod policy;
/// Dynamically typed field values.
pub mod value;

pub use groups::Groups;
pub use handle::{Handle, RefValue};
pub use kind::{EntityKind, ParseKindError};
pub use origin::Origin;
pub use policy::{ConflictPolicy, GapPolicy, MovePolicy};
pub use value::FieldValue;
