use n8n_client::{N8nExecution, N8nWorkflow};

use super::AppState;
use crate::models::{
    Activity, Lead, LeadUpdate, Message, SearchHistory, WorkflowNode, MAX_ACTIVITIES,
};

/// A state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetConnecting(bool),
    SetConnected {
        connected: bool,
        error: Option<String>,
    },
    SetUseMockData(bool),
    SetLeads(Vec<Lead>),
    SetLeadsLoading(bool),
    SetLeadsError(Option<String>),
    /// Prepends.
    AddLead(Lead),
    UpdateLead {
        id: String,
        update: LeadUpdate,
    },
    SetWorkflow(Option<N8nWorkflow>),
    SetWorkflowNodes(Vec<WorkflowNode>),
    SetExecution(Option<N8nExecution>),
    SetExecuting(bool),
    /// Prepends and evicts beyond [`MAX_ACTIVITIES`].
    AddActivity(Activity),
    SetActivities(Vec<Activity>),
    /// Prepends.
    AddMessage(Message),
    SetMessages(Vec<Message>),
    /// Prepends.
    AddSearchHistory(SearchHistory),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetConnecting(_) => "set_connecting",
            Self::SetConnected { .. } => "set_connected",
            Self::SetUseMockData(_) => "set_use_mock_data",
            Self::SetLeads(_) => "set_leads",
            Self::SetLeadsLoading(_) => "set_leads_loading",
            Self::SetLeadsError(_) => "set_leads_error",
            Self::AddLead(_) => "add_lead",
            Self::UpdateLead { .. } => "update_lead",
            Self::SetWorkflow(_) => "set_workflow",
            Self::SetWorkflowNodes(_) => "set_workflow_nodes",
            Self::SetExecution(_) => "set_execution",
            Self::SetExecuting(_) => "set_executing",
            Self::AddActivity(_) => "add_activity",
            Self::SetActivities(_) => "set_activities",
            Self::AddMessage(_) => "add_message",
            Self::SetMessages(_) => "set_messages",
            Self::AddSearchHistory(_) => "add_search_history",
        }
    }
}

/// Pure transition function.
pub fn reduce(mut state: AppState, action: Action) -> AppState {
    match action {
        Action::SetConnecting(connecting) => state.is_connecting = connecting,
        Action::SetConnected { connected, error } => {
            state.is_connected = connected;
            state.connection_error = error;
            state.is_connecting = false;
            state.use_mock_data = !connected;
        }
        Action::SetUseMockData(on) => state.use_mock_data = on,
        Action::SetLeads(leads) => {
            state.leads = leads;
            state.leads_loading = false;
        }
        Action::SetLeadsLoading(loading) => state.leads_loading = loading,
        Action::SetLeadsError(error) => {
            state.leads_error = error;
            state.leads_loading = false;
        }
        Action::AddLead(lead) => state.leads.insert(0, lead),
        Action::UpdateLead { id, update } => {
            if let Some(lead) = state.leads.iter_mut().find(|lead| lead.id == id) {
                update.apply(lead);
            }
        }
        Action::SetWorkflow(workflow) => state.workflow = workflow,
        Action::SetWorkflowNodes(nodes) => state.workflow_nodes = nodes,
        Action::SetExecution(execution) => state.current_execution = execution,
        Action::SetExecuting(executing) => state.is_executing = executing,
        Action::AddActivity(activity) => {
            state.activities.insert(0, activity);
            state.activities.truncate(MAX_ACTIVITIES);
        }
        Action::SetActivities(activities) => state.activities = activities,
        Action::AddMessage(message) => state.messages.insert(0, message),
        Action::SetMessages(messages) => state.messages = messages,
        Action::AddSearchHistory(entry) => state.search_history.insert(0, entry),
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo;
    use crate::models::{ActivityKind, LeadStatus};

    fn activity(n: usize) -> Activity {
        Activity::new(ActivityKind::LeadFound, format!("Lead {n}"), "")
    }

    #[test]
    fn test_activity_log_is_capped() {
        let mut state = AppState::default();
        for n in 0..MAX_ACTIVITIES {
            state = reduce(state, Action::AddActivity(activity(n)));
        }
        assert_eq!(state.activities.len(), 50);
        let oldest = state.activities[49].title.clone();
        assert_eq!(oldest, "Lead 0");

        state = reduce(state, Action::AddActivity(activity(50)));
        assert_eq!(state.activities.len(), 50);
        assert_eq!(state.activities[0].title, "Lead 50");
        assert_eq!(state.activities[49].title, "Lead 1");
        assert!(state.activities.iter().all(|a| a.title != oldest));
    }

    #[test]
    fn test_set_connected_toggles_demo_mode() {
        let state = reduce(
            AppState::initial(),
            Action::SetConnected {
                connected: false,
                error: Some("Invalid API key".to_string()),
            },
        );
        assert!(!state.is_connecting);
        assert!(state.use_mock_data);
        assert_eq!(state.connection_error.as_deref(), Some("Invalid API key"));

        let state = reduce(
            state,
            Action::SetConnected {
                connected: true,
                error: None,
            },
        );
        assert!(!state.use_mock_data);
        assert!(state.connection_error.is_none());
    }

    #[test]
    fn test_update_lead_by_id() {
        let state = AppState {
            leads: demo::leads(),
            ..Default::default()
        };
        let state = reduce(
            state,
            Action::UpdateLead {
                id: "2".to_string(),
                update: LeadUpdate::status(LeadStatus::Converted),
            },
        );
        assert_eq!(state.lead("2").map(|l| l.status), Some(LeadStatus::Converted));

        // Unknown ids are ignored.
        let before = state.clone();
        let after = reduce(
            state,
            Action::UpdateLead {
                id: "missing".to_string(),
                update: LeadUpdate::status(LeadStatus::Rejected),
            },
        );
        assert_eq!(before, after);
    }

    #[test]
    fn test_prepend_actions() {
        let mut leads = demo::leads();
        let first = leads.remove(0);
        let state = reduce(
            AppState {
                leads,
                ..Default::default()
            },
            Action::AddLead(first.clone()),
        );
        assert_eq!(state.leads[0], first);

        let state = reduce(
            state,
            Action::AddMessage(Message::sent("1", "Sarah Chen", "Hi")),
        );
        let state = reduce(
            state,
            Action::AddMessage(Message::sent("2", "Michael Rodriguez", "Hello")),
        );
        assert_eq!(state.messages[0].lead_id, "2");
    }

    #[test]
    fn test_leads_loading_cleared() {
        let state = reduce(AppState::default(), Action::SetLeadsLoading(true));
        assert!(state.leads_loading);
        let state = reduce(state, Action::SetLeads(demo::leads()));
        assert!(!state.leads_loading);
        assert_eq!(state.leads.len(), 5);
    }
}
