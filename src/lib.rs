//! Student Dashboard - authenticated backend for an AI study assistant
//!
//! This library provides account registration, password verification,
//! signed bearer tokens used as a request gate, and the tutor endpoints
//! that forward student input to an external chat-completion API.

pub mod assistant;
pub mod auth;
pub mod config;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod security;
pub mod security_logger;
pub mod storage;

// Re-export main components
pub use config::*;
pub use constants::*;
