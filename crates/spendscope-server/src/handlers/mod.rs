//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod actions;
pub mod health;
pub mod patterns;

// Re-export all handlers for use in router
pub use actions::*;
pub use health::*;
pub use patterns::*;
