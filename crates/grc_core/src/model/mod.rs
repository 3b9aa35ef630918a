//! Typed domain model shared by the resource layer and the web-UI services.
//!
//! # Responsibility
//! - Define the fixed set of object types and their per-type descriptors.
//! - Define the in-memory `Entity` built from normalized UI scopes.
//! - Define the persisted records served by the resource layer.
//!
//! # Invariants
//! - Every object type resolves to exactly one static descriptor.
//! - Entities are never persisted by this crate; only `Category` and
//!   `Facility` records are.

pub mod category;
pub mod entity;
pub mod facility;
pub mod object_type;
