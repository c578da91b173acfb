//! Dashboard configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use n8n_client::{N8nConfig, PollOptions};
use serde::Deserialize;

use crate::dashboard::DashboardSettings;

/// Dashboard behaviour settings.
///
/// Environment variables are prefixed with `OUTREACH_`:
/// - `OUTREACH_POLL_INTERVAL_MS`: Delay between execution status checks (default: 2000)
/// - `OUTREACH_POLL_MAX_ATTEMPTS`: Give up after this many checks (default: unbounded)
/// - `OUTREACH_POLL_TIMEOUT_SECS`: Give up after this long (default: unbounded)
/// - `OUTREACH_DEMO_DELAY_MS`: Simulated search time in demo mode (default: 2000)
/// - `OUTREACH_WEBHOOK_PATH`: Trigger searches through this webhook
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default)]
    pub poll_max_attempts: Option<u32>,

    #[serde(default)]
    pub poll_timeout_secs: Option<u64>,

    #[serde(default = "default_demo_delay_ms")]
    pub demo_delay_ms: u64,

    #[serde(default)]
    pub webhook_path: Option<String>,
}

fn default_poll_interval_ms() -> u64 {
    2000
}

fn default_demo_delay_ms() -> u64 {
    2000
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            poll_max_attempts: None,
            poll_timeout_secs: None,
            demo_delay_ms: default_demo_delay_ms(),
            webhook_path: None,
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed("OUTREACH_").from_env::<DashboardConfig>()
    }

    pub fn poll_options(&self) -> PollOptions {
        let mut options = PollOptions::every(Duration::from_millis(self.poll_interval_ms));
        if let Some(max) = self.poll_max_attempts {
            options = options.with_max_attempts(max);
        }
        if let Some(secs) = self.poll_timeout_secs {
            options = options.with_timeout(Duration::from_secs(secs));
        }
        options
    }

    pub fn settings(&self) -> DashboardSettings {
        DashboardSettings {
            poll: self.poll_options(),
            demo_delay: Duration::from_millis(self.demo_delay_ms),
            webhook_path: self.webhook_path.clone().filter(|p| !p.is_empty()),
        }
    }
}

/// Full application configuration.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub n8n: N8nConfig,
    pub dashboard: DashboardConfig,
}

impl AppConfig {
    /// Load both sections from the environment.
    pub fn from_env() -> Result<Self> {
        let n8n = N8nConfig::from_env().context("Invalid N8N_ configuration")?;
        let dashboard = DashboardConfig::from_env().context("Invalid OUTREACH_ configuration")?;
        Ok(Self { n8n, dashboard })
    }
}
