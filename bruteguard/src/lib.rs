//! bruteguard service library
//!
//! The binary only wires these modules together; routers and state are
//! exposed here for integration testing.

pub mod api;
pub mod app_state;
pub mod http;
pub mod init_telemetry;
pub mod settings;
pub mod stop_flag;

pub use app_state::AppState;
