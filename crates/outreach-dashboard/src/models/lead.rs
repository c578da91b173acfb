//! Lead records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Outreach stage of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Responded,
    Converted,
    Rejected,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 5] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Responded,
        LeadStatus::Converted,
        LeadStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Responded => "responded",
            Self::Converted => "converted",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown lead status: {s}"))
    }
}

/// A prospective contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub urn: String,
    pub profile_url: String,
    pub image_url: String,
    pub headline: String,
    pub location: String,
    pub is_premium: bool,
    pub company_name: String,
    pub company_urn: String,
    pub company_url: String,
    pub industry: String,
    pub position: String,
    /// Outreach priority, always within `0..=100`.
    pub score: u8,
    pub status: LeadStatus,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posts_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_posts_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_news_summary: Option<String>,
}

/// Partial update applied by `Action::UpdateLead`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadUpdate {
    pub status: Option<LeadStatus>,
    pub score: Option<u8>,
    pub posts_summary: Option<String>,
    pub company_posts_summary: Option<String>,
    pub company_news_summary: Option<String>,
}

impl LeadUpdate {
    pub fn status(status: LeadStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Apply the set fields to `lead`, leaving the rest untouched.
    pub fn apply(&self, lead: &mut Lead) {
        if let Some(status) = self.status {
            lead.status = status;
        }
        if let Some(score) = self.score {
            lead.score = score.min(100);
        }
        if let Some(summary) = &self.posts_summary {
            lead.posts_summary = Some(summary.clone());
        }
        if let Some(summary) = &self.company_posts_summary {
            lead.company_posts_summary = Some(summary.clone());
        }
        if let Some(summary) = &self.company_news_summary {
            lead.company_news_summary = Some(summary.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip_through_str() {
        for status in LeadStatus::ALL {
            assert_eq!(status.as_str().parse::<LeadStatus>(), Ok(status));
        }
        assert_eq!("Converted".parse::<LeadStatus>(), Ok(LeadStatus::Converted));
        assert!("archived".parse::<LeadStatus>().is_err());
    }

    #[test]
    fn test_update_clamps_score() {
        let mut lead = crate::demo::leads().remove(0);
        LeadUpdate {
            score: Some(250),
            ..Default::default()
        }
        .apply(&mut lead);
        assert_eq!(lead.score, 100);
        assert_eq!(lead.status, LeadStatus::New);
    }
}
