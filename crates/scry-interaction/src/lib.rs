//! Remote analysis endpoint client for Scry.

mod analysis;

pub use analysis::{AnalysisApi, AnalysisClient, AnalysisReply};
