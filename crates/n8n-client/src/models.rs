//! n8n API payloads.
//!
//! Field names follow the camelCase JSON the backend emits. Unknown fields
//! are ignored so newer backend versions keep deserializing.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Per-node run data of an execution, keyed by node name.
///
/// A value is normally an array of run records; anything else is treated
/// as an in-progress marker.
pub type RunData = BTreeMap<String, serde_json::Value>;

/// Remote execution status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    #[default]
    Running,
    Success,
    Error,
    Waiting,
    /// Any status this client does not model (`new`, `crashed`, `canceled`, ...).
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
            Self::Waiting => write!(f, "waiting"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// One run of a workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct N8nExecution {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    #[serde(default)]
    pub finished: bool,

    #[serde(default)]
    pub mode: String,

    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub stopped_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub status: ExecutionStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ExecutionData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_data: Option<ResultData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_data: Option<RunData>,
}

impl N8nExecution {
    /// Per-node run data, if the backend included it.
    pub fn run_data(&self) -> Option<&RunData> {
        self.data
            .as_ref()
            .and_then(|d| d.result_data.as_ref())
            .and_then(|r| r.run_data.as_ref())
    }

    /// Shortened id for log lines and activity descriptions.
    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(8) {
            Some((idx, _)) => &self.id[..idx],
            None => &self.id,
        }
    }
}

/// Envelope of `GET /executions`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionList {
    #[serde(default)]
    pub data: Vec<N8nExecution>,

    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// A workflow definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct N8nWorkflow {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub active: bool,

    #[serde(default)]
    pub nodes: Vec<N8nWorkflowNode>,

    #[serde(default)]
    pub connections: HashMap<String, N8nConnection>,
}

/// One node of a workflow definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct N8nWorkflowNode {
    #[serde(default)]
    pub id: String,

    pub name: String,

    #[serde(rename = "type")]
    pub node_type: String,

    /// Editor canvas position `[x, y]`.
    #[serde(default)]
    pub position: [f64; 2],

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

impl N8nWorkflowNode {
    /// Horizontal canvas position.
    pub fn x(&self) -> f64 {
        self.position[0]
    }
}

/// Outgoing connections of one node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct N8nConnection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<Vec<Vec<ConnectionTarget>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionTarget {
    pub node: String,

    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub index: u32,
}

/// Lead search criteria.
///
/// Serialized camelCase, which is also the webhook body format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_titles: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_companies: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_sizes: Option<Vec<String>>,

    pub count: u32,
}

/// Body of `POST /workflows/{id}/execute`.
#[derive(Debug, Serialize)]
pub(crate) struct TriggerRequest<'a> {
    #[serde(rename = "salesNavigatorParams")]
    pub sales_navigator_params: SalesNavigatorParams<'a>,
    pub count: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct SalesNavigatorParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_titles: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_companies: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_sizes: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<&'a str>,
}

impl<'a> From<&'a SearchParams> for TriggerRequest<'a> {
    fn from(params: &'a SearchParams) -> Self {
        Self {
            sales_navigator_params: SalesNavigatorParams {
                current_titles: params.current_titles.as_deref(),
                current_companies: params.current_companies.as_deref(),
                location: params.location.as_deref(),
                industry: params.industry.as_deref(),
                company_sizes: params.company_sizes.as_deref(),
                keywords: params.keywords.as_deref(),
            },
            count: params.count,
        }
    }
}

/// n8n returns ids as strings on some versions and numbers on others.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Str(String),
        Num(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Str(s) => s,
        Id::Num(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_execution_deserialization() {
        let json = json!({
            "id": 1042,
            "finished": false,
            "mode": "manual",
            "startedAt": "2026-01-27T10:00:00.000Z",
            "status": "running",
            "data": {
                "resultData": {
                    "runData": {
                        "Find Leads": [{"startTime": 1}],
                        "Score Leads": []
                    }
                }
            }
        });

        let execution: N8nExecution = serde_json::from_value(json).unwrap();
        assert_eq!(execution.id, "1042");
        assert_eq!(execution.status, ExecutionStatus::Running);
        assert!(execution.started_at.is_some());

        let run_data = execution.run_data().unwrap();
        assert_eq!(run_data.len(), 2);
        assert!(run_data.contains_key("Find Leads"));
    }

    #[test]
    fn test_unmodelled_status_is_unknown() {
        let json = json!({"id": "abc", "status": "crashed"});
        let execution: N8nExecution = serde_json::from_value(json).unwrap();
        assert_eq!(execution.status, ExecutionStatus::Unknown);
        assert!(!execution.finished);
        assert!(execution.run_data().is_none());
    }

    #[test]
    fn test_short_id() {
        let json = json!({"id": "0123456789abcdef"});
        let execution: N8nExecution = serde_json::from_value(json).unwrap();
        assert_eq!(execution.short_id(), "01234567");

        let json = json!({"id": 7});
        let execution: N8nExecution = serde_json::from_value(json).unwrap();
        assert_eq!(execution.short_id(), "7");
    }

    #[test]
    fn test_workflow_deserialization() {
        let json = json!({
            "id": "wf-1",
            "name": "Lead Pipeline",
            "active": true,
            "nodes": [
                {"id": "n1", "name": "Find Leads", "type": "n8n-nodes-hdw.hdwLinkedin", "position": [200, 300]},
                {"id": "n2", "name": "Note", "type": "n8n-nodes-base.stickyNote", "position": [0, 0], "parameters": {"content": "hi"}}
            ],
            "connections": {
                "Find Leads": {"main": [[{"node": "Score Leads", "type": "main", "index": 0}]]}
            }
        });

        let workflow: N8nWorkflow = serde_json::from_value(json).unwrap();
        assert_eq!(workflow.nodes.len(), 2);
        assert_eq!(workflow.nodes[0].x(), 200.0);
        assert_eq!(workflow.nodes[0].node_type, "n8n-nodes-hdw.hdwLinkedin");

        let targets = workflow.connections["Find Leads"].main.as_ref().unwrap();
        assert_eq!(targets[0][0].node, "Score Leads");
    }

    #[test]
    fn test_trigger_request_shape() {
        let params = SearchParams {
            current_titles: Some("CTO".to_string()),
            company_sizes: Some(vec!["51-200".to_string()]),
            count: 25,
            ..Default::default()
        };

        let body = serde_json::to_value(TriggerRequest::from(&params)).unwrap();
        assert_eq!(
            body,
            json!({
                "salesNavigatorParams": {
                    "current_titles": "CTO",
                    "company_sizes": ["51-200"]
                },
                "count": 25
            })
        );
    }

    #[test]
    fn test_search_params_camel_case() {
        let params = SearchParams {
            current_companies: Some("Acme".to_string()),
            count: 10,
            ..Default::default()
        };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json, json!({"currentCompanies": "Acme", "count": 10}));
    }
}
