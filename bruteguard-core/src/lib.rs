pub mod address_list;
pub mod admin;
pub mod admission;
pub mod api;
pub mod error;
pub mod limiter;
pub mod settings;
pub mod stop_flag;
