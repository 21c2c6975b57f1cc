//! Streamsign API Library
//!
//! HTTP surface over the playlist pipeline: handlers, error mapping, route and server setup.

pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
mod telemetry;

pub use error::HttpAppError;
pub use state::AppState;
