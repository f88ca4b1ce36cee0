//! Core module - configuration, state, server and background tasks
//!
//! - [`Config`] - server configuration
//! - [`ServerState`] - shared service handles
//! - [`Server`] - HTTP server
//! - [`BackgroundTasks`] - long-lived task registry
//! - [`ServerError`] - startup errors

pub mod config;
pub mod error;
pub mod server;
pub mod state;
pub mod tasks;

pub use config::{Config, PrinterTarget};
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::ServerState;
pub use tasks::BackgroundTasks;
