//! Search history entries.

use chrono::{DateTime, Utc};
use n8n_client::SearchParams;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHistory {
    pub id: String,
    pub params: SearchParams,
    pub leads_found: u32,
    pub executed_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SearchHistory {
    /// Record a search started now. Named after the current date.
    pub fn started(params: SearchParams) -> Self {
        let executed_at = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            params,
            leads_found: 0,
            name: Some(format!("Search {}", executed_at.format("%Y-%m-%d"))),
            executed_at,
        }
    }
}
