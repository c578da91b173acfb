//! Lead filtering and headline statistics.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::models::{Lead, LeadStatus, Message, MessageStatus};
use crate::store::AppState;

/// Score band used by the lead list filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    /// 80 and above.
    High,
    /// 50 to 79.
    Medium,
    /// Below 50.
    Low,
}

impl ScoreTier {
    pub fn contains(&self, score: u8) -> bool {
        match self {
            Self::High => score >= 80,
            Self::Medium => (50..80).contains(&score),
            Self::Low => score < 50,
        }
    }
}

impl FromStr for ScoreTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(format!("unknown score tier: {other}")),
        }
    }
}

impl fmt::Display for ScoreTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// Lead list filter. `None` fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeadFilter {
    pub status: Option<LeadStatus>,
    pub tier: Option<ScoreTier>,
}

impl LeadFilter {
    pub fn matches(&self, lead: &Lead) -> bool {
        self.status.map_or(true, |status| lead.status == status)
            && self.tier.map_or(true, |tier| tier.contains(lead.score))
    }

    pub fn apply<'a>(&self, leads: &'a [Lead]) -> Vec<&'a Lead> {
        leads.iter().filter(|lead| self.matches(lead)).collect()
    }
}

/// Headline numbers for the overview page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_leads: usize,
    pub messages_sent: usize,
    /// Percentage of leads that responded or converted, one decimal.
    pub response_rate: String,
    pub conversions: usize,
}

impl DashboardStats {
    pub fn compute(leads: &[Lead], messages: &[Message]) -> Self {
        let engaged = leads
            .iter()
            .filter(|l| matches!(l.status, LeadStatus::Responded | LeadStatus::Converted))
            .count();

        let response_rate = if leads.is_empty() {
            "0".to_string()
        } else {
            format!("{:.1}", engaged as f64 / leads.len() as f64 * 100.0)
        };

        Self {
            total_leads: leads.len(),
            messages_sent: messages
                .iter()
                .filter(|m| m.status != MessageStatus::Draft)
                .count(),
            response_rate,
            conversions: leads
                .iter()
                .filter(|l| l.status == LeadStatus::Converted)
                .count(),
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::compute(&state.leads, &state.messages)
    }
}
