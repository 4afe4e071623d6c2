use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use serde::Deserialize;

/// What the intake endpoint does when appending a lead fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistencePolicy {
    /// Log the failure and still acknowledge the submission.
    BestEffort,
    /// Surface the failure to the caller as a server error.
    Strict,
}

impl FromStr for PersistencePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "best_effort" | "best-effort" => Ok(Self::BestEffort),
            "strict" => Ok(Self::Strict),
            other => anyhow::bail!("unknown persistence policy: {other}"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub leads_path: PathBuf,
    pub persistence: PersistencePolicy,
    pub site_url: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = match std::env::var("APP_PORT") {
            Ok(v) => v.parse::<u16>().context("APP_PORT must be a port number")?,
            Err(_) => 8080,
        };
        let persistence = match std::env::var("LEADS_PERSISTENCE") {
            Ok(v) => v.parse().context("LEADS_PERSISTENCE")?,
            Err(_) => PersistencePolicy::BestEffort,
        };
        Ok(Self {
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port,
            leads_path: std::env::var("LEADS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/tmp/leads.jsonl")),
            persistence,
            site_url: std::env::var("SITE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "https://agentic-cd9a2abc.vercel.app".into()),
        })
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn parses_persistence_policy() {
        assert_eq!("best_effort".parse::<PersistencePolicy>().unwrap(), PersistencePolicy::BestEffort);
        assert_eq!("Best-Effort".parse::<PersistencePolicy>().unwrap(), PersistencePolicy::BestEffort);
        assert_eq!(" strict ".parse::<PersistencePolicy>().unwrap(), PersistencePolicy::Strict);
        assert!("at_least_once".parse::<PersistencePolicy>().is_err());
    }
}
