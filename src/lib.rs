//! Friendly - social matching service
//!
//! This library implements the matching core of the Friendly app: the
//! geographic candidate selector and the mutual-match resolver, plus the
//! web, persistence and storage plumbing around them.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{confirmed_matches, nearby_candidates, pair_state, potential_matches};
pub use models::{Interest, PairState, User};
