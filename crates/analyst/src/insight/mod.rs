//! Insights: rule-based synthesis and validation of external candidates.

mod insight;
mod synthesizer;
mod validator;

pub use insight::{Insight, InsightParameters};
pub use synthesizer::{InsightSynthesizer, SynthesizerConfig};
pub use validator::{CandidateValidator, InsufficientCandidates, ValidatorConfig};
