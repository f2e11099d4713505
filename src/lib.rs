pub mod analytics;
pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod query;
pub mod server;
pub mod utils;
