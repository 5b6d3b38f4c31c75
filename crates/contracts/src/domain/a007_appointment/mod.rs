pub mod aggregate;
pub mod reminders;
pub mod schedule;
