//! Session controller for Scry.
//!
//! `SessionUseCase` owns the session state and drives the user-facing
//! operations (capture, clear, selection, crop, send, quick insight) against
//! the capture relay and the analysis endpoint. Presentation is behind the
//! [`Renderer`] trait so frontends only draw what they are handed.

mod renderer;
mod session_usecase;

pub use renderer::Renderer;
pub use session_usecase::{INSIGHT_PROMPT, SessionUseCase};
