//! Shared types for the comanda workspace
//!
//! Domain models, the unified error system and small utilities used by the
//! printer and server crates.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
