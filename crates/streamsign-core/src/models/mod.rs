//! Data models for the application
//!
//! Every value here is built per request and never mutated afterwards.

mod playlist;
mod video;

// Re-export all models for convenient imports
pub use playlist::*;
pub use video::*;
