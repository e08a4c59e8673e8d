//! Server configuration from environment variables
//!
//! - `PORT`: listen port (default 3000)
//! - `DATA_DIR`: reference table directory (default: embedded tables)
//! - `OTHER_GENDER_BUCKET`: `male` or `female` (default male)
//! - `CANDIDATE_COUNT`: candidates per recommendation (1 to 4, default 4)

use crate::composer::{ComposerPolicy, MAX_CANDIDATES};
use crate::types::GenderBucket;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub data_dir: Option<PathBuf>,
    pub policy: ComposerPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            data_dir: None,
            policy: ComposerPolicy::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unparseable values are logged and replaced by defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = parsed(&lookup, "PORT").unwrap_or(defaults.port);

        let data_dir = lookup("DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        let other_gender_bucket: GenderBucket =
            parsed(&lookup, "OTHER_GENDER_BUCKET").unwrap_or(defaults.policy.other_gender_bucket);

        let candidate_count = match parsed::<usize, _>(&lookup, "CANDIDATE_COUNT") {
            Some(0) => {
                tracing::warn!("CANDIDATE_COUNT must be at least 1, using {}", defaults.policy.candidate_count);
                defaults.policy.candidate_count
            }
            Some(n) if n > MAX_CANDIDATES => {
                tracing::warn!("CANDIDATE_COUNT={} exceeds {}, clamping", n, MAX_CANDIDATES);
                MAX_CANDIDATES
            }
            Some(n) => n,
            None => defaults.policy.candidate_count,
        };

        Self {
            port,
            data_dir,
            policy: ComposerPolicy {
                candidate_count,
                other_gender_bucket,
                ..defaults.policy
            },
        }
    }
}

fn parsed<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring invalid {}={:?}", key, raw);
            None
        }
    }
}
