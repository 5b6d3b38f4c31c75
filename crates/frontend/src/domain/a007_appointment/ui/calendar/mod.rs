//! Weekly appointment calendar
//!
//! - view_model.rs: visible week, fetched appointments, day buckets
//! - view.rs: week navigation and the 7-day grid

mod view;
mod view_model;

pub use view::AppointmentsCalendar;
