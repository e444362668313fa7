//! Summary Module
//!
//! Executive summary over every other component's output. Missing
//! sub-results become explicit "Insufficient data" insights.

pub mod types;
pub mod synthesizer;

pub use types::ExecutiveSummary;
pub use synthesizer::{synthesize_summary, SummaryInputs, BASE_CONFIDENCE, CONFIDENCE_PER_COMPONENT};
