//! Session domain module.
//!
//! This module contains the session entity and its conversation types.
//!
//! # Module Structure
//!
//! - `model`: Core session domain model (`Session`)
//! - `message`: Conversation message types (`MessageRole`, `ConversationMessage`)

mod message;
mod model;

// Re-export public API
pub use message::{ConversationMessage, MessageRole};
pub use model::{GREETING, Session};
