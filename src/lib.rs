//! userdesk — terminal front end for a remote user directory (library crate).
//!
//! Re-exports public modules for integration tests and external use.

pub mod config;
pub mod console;
pub mod constants;
pub mod env;
pub mod forms;
pub mod models;
pub mod notify;
pub mod output;
pub mod repository;
