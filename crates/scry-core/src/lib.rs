//! Core domain types for Scry.
//!
//! This crate holds the "pure" model the rest of the workspace operates on:
//! the session (snapshot, selection, transcript, send-flag), the selection
//! drag state machine, snapshot image handling, markup helpers, shared
//! configuration, and the common error type.

pub mod config;
pub mod error;
pub mod markup;
pub mod selection;
pub mod session;
pub mod snapshot;

// Re-export common error type
pub use error::{Result, ScryError};
