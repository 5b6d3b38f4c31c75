//! Common types and traits for all records

pub mod aggregate_root;
pub mod entity_ref;

// Re-exports
pub use aggregate_root::{CrudEntity, Reactivatable, Resource, ValidationContext};
pub use entity_ref::{EntityRef, RecordId};
