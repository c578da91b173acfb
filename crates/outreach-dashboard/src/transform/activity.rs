use n8n_client::{ExecutionStatus, N8nExecution};

use crate::models::{Activity, ActivityKind};

/// Feed entry describing an execution's latest status.
pub fn execution_to_activity(execution: &N8nExecution) -> Activity {
    let (kind, title) = match execution.status {
        ExecutionStatus::Error => (ActivityKind::Error, "Workflow Error"),
        ExecutionStatus::Success => (ActivityKind::SearchCompleted, "Search Completed"),
        _ => (ActivityKind::LeadFound, "Workflow Running"),
    };

    let mut activity = Activity::new(
        kind,
        title,
        format!("Execution {}...", execution.short_id()),
    );
    activity.id = execution.id.clone();
    if let Some(started_at) = execution.started_at {
        activity.timestamp = started_at;
    }
    activity
}
