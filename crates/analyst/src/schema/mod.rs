//! Column classification and profiling result types.

mod column;
mod summary;
mod types;

pub use column::{display_name, is_placeholder_name, ColumnProfile};
pub use summary::{
    AnalysisSummary, CorrelationPair, DistributionRecord, GroupMean, TopPerformerRecord,
};
pub use types::{CorrelationDirection, CorrelationStrength, SemanticType, SkewClass};
