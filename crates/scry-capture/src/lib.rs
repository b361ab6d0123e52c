//! Screen capture for Scry.
//!
//! Two pieces: a backend seam ([`CaptureSource`]) over the platform's screen
//! capture mechanism, and a one-shot request/response relay
//! ([`CaptureRelay`]) in front of it. The relay answers every request exactly
//! once, with either a captured frame or an error; it performs no retries and
//! holds no state.

mod monitor;
mod relay;
mod source;

pub use monitor::MonitorCapture;
pub use relay::{CaptureRelay, CaptureRelayHandle};
pub use source::{CaptureSource, CapturedFrame};
