//! Unicompare Web - JSON API Server

#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]
//!
//! RESTful endpoints for browsing and filtering universities, building a
//! side-by-side comparison, requesting admission estimates and managing the
//! catalog behind an admin passcode.

pub mod errors;
pub mod handlers;
pub mod server;

// Re-export main types
pub use errors::ApiError;
pub use server::{AppState, build_router, run_server};
