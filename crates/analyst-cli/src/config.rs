//! Service settings read from the environment.
//!
//! Every value has a default, so an empty environment gives a working local
//! setup. Command-line flags override what is read here.
//!
//! | Variable                   | Default                 |
//! |----------------------------|-------------------------|
//! | `ANALYST_ENVIRONMENT`      | `development`           |
//! | `ANALYST_CORS_ORIGINS`     | `http://localhost:5173` |
//! | `ANALYST_LLM`              | `none`                  |
//! | `ANALYST_LLM_MODEL`        | provider default        |
//! | `ANALYST_LLM_TIMEOUT_SECS` | `30`                    |
//! | `ANALYST_MAX_DATASETS`     | `16`                    |

use std::env;

use tracing::warn;

use crate::cli::LlmProviderChoice;

const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_DATASETS: usize = 16;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Deployment name; `production` hides internal error detail.
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub llm: LlmProviderChoice,
    pub llm_model: Option<String>,
    /// Upper bound on one analysis, including the suggestion request.
    pub llm_timeout_secs: u64,
    /// Datasets kept in memory before the oldest is evicted.
    pub max_datasets: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            cors_origins: vec![DEFAULT_CORS_ORIGIN.to_string()],
            llm: LlmProviderChoice::None,
            llm_model: None,
            llm_timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_datasets: DEFAULT_MAX_DATASETS,
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read settings through `lookup`. Unparsable values fall back to the
    /// default with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let cors_origins = get("ANALYST_CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .filter(|origins| !origins.is_empty())
            .unwrap_or(defaults.cors_origins);

        Self {
            environment: get("ANALYST_ENVIRONMENT").unwrap_or(defaults.environment),
            cors_origins,
            llm: parse_or("ANALYST_LLM", get("ANALYST_LLM"), defaults.llm),
            llm_model: get("ANALYST_LLM_MODEL"),
            llm_timeout_secs: parse_or(
                "ANALYST_LLM_TIMEOUT_SECS",
                get("ANALYST_LLM_TIMEOUT_SECS"),
                defaults.llm_timeout_secs,
            ),
            max_datasets: parse_or(
                "ANALYST_MAX_DATASETS",
                get("ANALYST_MAX_DATASETS"),
                defaults.max_datasets,
            )
            .max(1),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

fn parse_or<T>(name: &str, raw: Option<String>, default: T) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            warn!(variable = name, value = %raw, error = %e, "ignoring invalid setting");
            default
        }),
        None => default,
    }
}
