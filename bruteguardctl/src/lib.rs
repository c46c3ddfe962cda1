// Library exports for testing
pub mod api;
pub mod cli;
pub mod commands;
pub mod context;
pub mod utils;
