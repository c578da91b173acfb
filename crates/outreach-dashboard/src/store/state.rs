use n8n_client::{N8nExecution, N8nWorkflow};
use serde::Serialize;

use crate::demo;
use crate::models::{Activity, Lead, Message, SearchHistory, WorkflowNode};

/// Everything the dashboard shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub is_connected: bool,
    pub is_connecting: bool,
    pub connection_error: Option<String>,
    pub use_mock_data: bool,

    pub leads: Vec<Lead>,
    pub leads_loading: bool,
    pub leads_error: Option<String>,

    pub workflow: Option<N8nWorkflow>,
    pub workflow_nodes: Vec<WorkflowNode>,
    pub current_execution: Option<N8nExecution>,
    pub is_executing: bool,

    /// Newest first.
    pub activities: Vec<Activity>,
    /// Newest first.
    pub messages: Vec<Message>,
    /// Newest first.
    pub search_history: Vec<SearchHistory>,
}

/// Connection indicator derived from [`AppState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connecting,
    Connected,
    Disconnected(String),
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connecting => write!(f, "connecting"),
            Self::Connected => write!(f, "connected"),
            Self::Disconnected(reason) => write!(f, "disconnected ({reason})"),
        }
    }
}

impl AppState {
    /// Startup state: connecting, demo data on.
    pub fn initial() -> Self {
        Self {
            is_connecting: true,
            use_mock_data: true,
            leads: demo::leads(),
            workflow_nodes: demo::workflow_nodes(),
            activities: demo::activities(),
            messages: demo::messages(),
            search_history: demo::search_history(),
            ..Default::default()
        }
    }

    pub fn connection_status(&self) -> ConnectionStatus {
        if self.is_connecting {
            ConnectionStatus::Connecting
        } else if self.is_connected {
            ConnectionStatus::Connected
        } else {
            ConnectionStatus::Disconnected(
                self.connection_error
                    .clone()
                    .unwrap_or_else(|| "not connected".to_string()),
            )
        }
    }

    pub fn lead(&self, id: &str) -> Option<&Lead> {
        self.leads.iter().find(|lead| lead.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_demo() {
        let state = AppState::initial();
        assert!(state.is_connecting);
        assert!(state.use_mock_data);
        assert_eq!(state.leads.len(), 5);
        assert_eq!(state.workflow_nodes.len(), 8);
        assert!(state.current_execution.is_none());
        assert_eq!(state.connection_status(), ConnectionStatus::Connecting);
    }

    #[test]
    fn test_connection_status() {
        let mut state = AppState::default();
        assert_eq!(
            state.connection_status(),
            ConnectionStatus::Disconnected("not connected".to_string())
        );

        state.connection_error = Some("n8n not reachable".to_string());
        assert_eq!(
            state.connection_status().to_string(),
            "disconnected (n8n not reachable)"
        );

        state.is_connected = true;
        assert_eq!(state.connection_status(), ConnectionStatus::Connected);
    }
}
