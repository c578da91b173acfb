//! Outreach messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Delivery state of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Draft,
    Sent,
    Delivered,
    Read,
    Replied,
}

impl std::fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Sent => write!(f, "sent"),
            Self::Delivered => write!(f, "delivered"),
            Self::Read => write!(f, "read"),
            Self::Replied => write!(f, "replied"),
        }
    }
}

/// A message sent to a lead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub lead_id: String,
    pub lead_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub content: String,
    pub sent_at: DateTime<Utc>,
    pub status: MessageStatus,
}

impl Message {
    /// A freshly sent message.
    pub fn sent(lead_id: impl Into<String>, lead_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            lead_id: lead_id.into(),
            lead_name: lead_name.into(),
            subject: None,
            content: content.into(),
            sent_at: Utc::now(),
            status: MessageStatus::Sent,
        }
    }
}
