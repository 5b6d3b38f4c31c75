//! Shared types and business rules for the administration front-end.
//!
//! Nothing in this crate touches the browser: records as the backend serializes
//! them, forms and payloads, validation, document checks, input masks and the
//! appointment calendar arithmetic all live here so they can be tested natively.

pub mod domain;
pub mod shared;
pub mod system;
