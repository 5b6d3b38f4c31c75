pub mod calendar;
pub mod details;
pub mod model;

pub use calendar::AppointmentsCalendar;
