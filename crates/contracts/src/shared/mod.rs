pub mod address;
pub mod api_error;
pub mod documents;
pub mod masks;
pub mod validation;
