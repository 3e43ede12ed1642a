//! Validation of externally produced insight candidates.

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use super::Insight;

/// Too few candidates survived validation; use synthesized insights instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("only {valid} valid candidate insight(s), at least {required} required")]
pub struct InsufficientCandidates {
    pub valid: usize,
    pub required: usize,
}

#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Fewest valid candidates that still count as an acceptable list.
    pub min_accepted: usize,
    /// Candidates kept from an accepted list.
    pub max_kept: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            min_accepted: 3,
            max_kept: 4,
        }
    }
}

/// Filters untrusted candidates against the columns that actually exist.
pub struct CandidateValidator {
    config: ValidatorConfig,
}

impl CandidateValidator {
    pub fn new() -> Self {
        Self {
            config: ValidatorConfig::default(),
        }
    }

    pub fn with_config(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Keep candidates whose x names a valid column and whose y is absent or
    /// valid. Malformed candidates are dropped, never reported as errors.
    pub fn validate(
        &self,
        candidates: &[Value],
        valid_columns: &[&str],
    ) -> Result<Vec<Insight>, InsufficientCandidates> {
        let mut accepted: Vec<Insight> = candidates
            .iter()
            .enumerate()
            .filter_map(|(index, candidate)| {
                let insight: Insight = match serde_json::from_value(candidate.clone()) {
                    Ok(insight) => insight,
                    Err(e) => {
                        warn!(index, error = %e, "dropping malformed candidate");
                        return None;
                    }
                };

                let params = &insight.parameters;
                let x_ok = valid_columns.contains(&params.x.as_str());
                let y_ok = params
                    .y
                    .as_deref()
                    .map_or(true, |y| valid_columns.contains(&y));

                if x_ok && y_ok {
                    Some(insight)
                } else {
                    debug!(index, x = %params.x, y = ?params.y, "candidate references unknown column");
                    None
                }
            })
            .collect();

        if accepted.len() < self.config.min_accepted {
            return Err(InsufficientCandidates {
                valid: accepted.len(),
                required: self.config.min_accepted,
            });
        }

        accepted.truncate(self.config.max_kept);
        Ok(accepted)
    }
}

impl Default for CandidateValidator {
    fn default() -> Self {
        Self::new()
    }
}
