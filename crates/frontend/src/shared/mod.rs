pub mod address_lookup;
pub mod api_utils;
pub mod config;
pub mod crud;
pub mod crud_api;
pub mod date_utils;
pub mod export;
pub mod http;
pub mod icons;
pub mod list_utils;
pub mod masked_input;
pub mod modal;
pub mod notify;
pub mod page_frame;
pub mod query_cache;
