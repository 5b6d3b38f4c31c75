//! Appointment report
//!
//! - model.rs: filters, columns, sorting and CSV assembly (no UI)
//! - view.rs: filter bar, column picker, table and export

pub mod model;
mod view;

pub use view::AppointmentReportPage;
