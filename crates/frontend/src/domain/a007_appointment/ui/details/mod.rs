//! Appointment dialog
//!
//! - view_model.rs: dialog mode, form state and lifecycle commands
//! - view.rs: the view/edit dialog (pure UI)

mod view;
mod view_model;

pub use view::{status_color, AppointmentDialog};
pub use view_model::{AppointmentDetailsVm, DialogMode};
