pub mod entity_ui;
pub mod form;
pub mod mutation;
pub mod page;
pub mod state;

pub use entity_ui::{or_dash, EntityUi};
pub use mutation::Mutation;
pub use page::{crud_page, status_badge};
