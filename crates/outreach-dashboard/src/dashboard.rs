//! Dashboard orchestrator.
//!
//! Owns the [`Store`] and the backend and runs the side-effecting
//! operations (connectivity, search, outreach) around them. Operations take
//! `&mut self`, so only one of them is in flight at a time.

use std::time::Duration;

use n8n_client::{
    ExecutionPoller, N8nExecution, PollOptions, PollOutcome, SearchParams, WebhookResponse,
};
use tokio_util::sync::CancellationToken;

use crate::backend::WorkflowBackend;
use crate::demo;
use crate::error::{DashboardError, Result};
use crate::models::{
    Activity, ActivityKind, Lead, LeadStatus, LeadUpdate, Message, SearchHistory,
};
use crate::store::{Action, AppState, ConnectionStatus, Store};
use crate::templates::MAX_MESSAGE_LENGTH;
use crate::transform::{self, EnrichmentRow, LeadRow};

/// Simulated search duration in demo mode.
pub const DEFAULT_DEMO_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSettings {
    pub poll: PollOptions,
    pub demo_delay: Duration,
    /// Trigger searches through this webhook instead of the REST API.
    pub webhook_path: Option<String>,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            poll: PollOptions::default(),
            demo_delay: DEFAULT_DEMO_DELAY,
            webhook_path: None,
        }
    }
}

/// How a search ended.
#[derive(Debug, Clone)]
pub enum SearchReport {
    /// Demo mode; no backend call was made.
    Demo { leads_found: usize },
    /// The triggered execution finished (successfully or not).
    Finished(N8nExecution),
    /// Webhook searches are fire-and-forget; the raw response is returned.
    Webhook(WebhookResponse),
}

pub struct Dashboard<B> {
    backend: B,
    store: Store,
    settings: DashboardSettings,
    cancel: CancellationToken,
}

impl<B: WorkflowBackend> Dashboard<B> {
    /// Dashboard in its startup state: demo data, connection not yet checked.
    pub fn new(backend: B, settings: DashboardSettings) -> Self {
        Self::with_store(backend, settings, Store::initial())
    }

    pub fn with_store(backend: B, settings: DashboardSettings, store: Store) -> Self {
        Self {
            backend,
            store,
            settings,
            cancel: CancellationToken::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut DashboardSettings {
        &mut self.settings
    }

    pub fn dispatch(&mut self, action: Action) {
        self.store.dispatch(action);
    }

    /// Token that cancels the current or next live search. A search that
    /// ends cancelled swaps in a fresh token, so take a new handle after it.
    pub fn cancel_handle(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Check health, then the API key. Leaves demo mode on when either fails.
    pub async fn check_connection(&mut self) -> ConnectionStatus {
        self.store.dispatch(Action::SetConnecting(true));

        let error = if !self.backend.health_check().await {
            Some("n8n not reachable")
        } else if !self.backend.validate_api_key().await {
            Some("Invalid API key")
        } else {
            None
        };

        match error {
            None => tracing::info!("Connected to n8n"),
            Some(reason) => tracing::warn!(reason, "n8n unavailable, using demo data"),
        }

        self.store.dispatch(Action::SetConnected {
            connected: error.is_none(),
            error: error.map(str::to_string),
        });

        self.state().connection_status()
    }

    /// Load the configured workflow and reset its pipeline view.
    pub async fn fetch_workflow(&mut self) -> Result<()> {
        if self.state().use_mock_data {
            return Ok(());
        }

        let workflow = self.backend.get_workflow(None).await?;
        let nodes = transform::map_execution_to_nodes(&workflow.nodes, None);

        tracing::debug!(
            workflow_id = %workflow.id,
            nodes = nodes.len(),
            "Workflow loaded"
        );

        self.store.dispatch(Action::SetWorkflow(Some(workflow)));
        self.store.dispatch(Action::SetWorkflowNodes(nodes));
        Ok(())
    }

    /// Run a lead search and wait for it to finish.
    ///
    /// The executing flag is cleared whatever the outcome, and failures are
    /// also recorded in the activity feed.
    pub async fn trigger_search(&mut self, params: SearchParams) -> Result<SearchReport> {
        self.store.dispatch(Action::SetExecuting(true));
        self.store
            .dispatch(Action::AddSearchHistory(SearchHistory::started(params.clone())));

        let target = params
            .current_titles
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or("leads");
        self.store.dispatch(Action::AddActivity(Activity::new(
            ActivityKind::SearchCompleted,
            "Search Started",
            format!("Searching for {target}..."),
        )));

        let result = if self.state().use_mock_data {
            self.run_demo_search().await
        } else if let Some(path) = self.settings.webhook_path.clone() {
            self.run_webhook_search(&path, &params).await
        } else {
            self.run_live_search(&params).await
        };

        self.store.dispatch(Action::SetExecuting(false));

        // The cancel was consumed by this search; the next one starts armed.
        if matches!(result, Err(DashboardError::PollCancelled)) {
            self.cancel = CancellationToken::new();
        }

        if let Err(e) = &result {
            tracing::error!(error = %e, "Search failed");
            self.store.dispatch(Action::AddActivity(Activity::new(
                ActivityKind::Error,
                "Search Failed",
                e.to_string(),
            )));
        }

        result
    }

    async fn run_demo_search(&mut self) -> Result<SearchReport> {
        tokio::time::sleep(self.settings.demo_delay).await;

        let leads_found = demo::leads().len();
        self.store.dispatch(Action::AddActivity(Activity::new(
            ActivityKind::SearchCompleted,
            "Search Completed",
            format!("Found {leads_found} leads"),
        )));

        Ok(SearchReport::Demo { leads_found })
    }

    async fn run_webhook_search(
        &mut self,
        path: &str,
        params: &SearchParams,
    ) -> Result<SearchReport> {
        let response = self.backend.trigger_webhook(path, params).await?;

        self.store.dispatch(Action::AddActivity(Activity::new(
            ActivityKind::SearchCompleted,
            "Search Submitted",
            format!("Webhook {path} answered {}", response.status),
        )));

        Ok(SearchReport::Webhook(response))
    }

    async fn run_live_search(&mut self, params: &SearchParams) -> Result<SearchReport> {
        let execution = self.backend.trigger_execution(params, None).await?;
        let execution_id = execution.id.clone();
        self.store.dispatch(Action::SetExecution(Some(execution)));

        if self.cancel.is_cancelled() {
            tracing::info!(execution_id = %execution_id, "Search cancelled during trigger");
            return Err(DashboardError::PollCancelled);
        }

        let poller = ExecutionPoller::new(&self.backend, self.settings.poll.clone())
            .with_cancellation(self.cancel.clone());
        let store = &mut self.store;

        let outcome = poller
            .poll(&execution_id, |execution| {
                store.dispatch(Action::SetExecution(Some(execution.clone())));

                let nodes = store
                    .state()
                    .workflow
                    .as_ref()
                    .zip(execution.run_data())
                    .map(|(workflow, run_data)| {
                        transform::map_execution_to_nodes(&workflow.nodes, Some(run_data))
                    });
                if let Some(nodes) = nodes {
                    store.dispatch(Action::SetWorkflowNodes(nodes));
                }
            })
            .await;

        match outcome {
            PollOutcome::Finished(execution) => {
                self.store.dispatch(Action::AddActivity(
                    transform::execution_to_activity(&execution),
                ));
                Ok(SearchReport::Finished(execution))
            }
            PollOutcome::Failed(e) => Err(DashboardError::PollFailed(e)),
            PollOutcome::Cancelled { .. } => Err(DashboardError::PollCancelled),
            PollOutcome::TimedOut { attempts, .. } => {
                Err(DashboardError::PollTimedOut { attempts })
            }
        }
    }

    /// Recent executions of the configured workflow.
    pub async fn recent_executions(&self, limit: Option<u32>) -> Result<Vec<N8nExecution>> {
        if self.state().use_mock_data {
            return Ok(Vec::new());
        }
        Ok(self.backend.list_executions(None, limit).await?)
    }

    /// Reload the lead list.
    ///
    /// There is no remote lead source; live mode keeps the leads last
    /// imported with [`Dashboard::import_leads`].
    pub async fn refresh_leads(&mut self) {
        if self.state().use_mock_data {
            self.store.dispatch(Action::SetLeads(demo::leads()));
            return;
        }

        self.store.dispatch(Action::SetLeadsLoading(true));
        let leads = self.state().leads.clone();
        self.store.dispatch(Action::SetLeads(leads));
    }

    /// Replace the lead list with scored sheet rows.
    ///
    /// Enrichment rows are joined on the lead's company URN.
    pub fn import_leads(&mut self, rows: &[LeadRow], enrichment: &[EnrichmentRow]) -> usize {
        let leads: Vec<Lead> = rows
            .iter()
            .map(|row| {
                let content = enrichment
                    .iter()
                    .find(|e| !e.company_urn.is_empty() && e.company_urn == row.company_linkedin_urn);
                transform::map_row_to_lead(row, content)
            })
            .collect();

        let count = leads.len();
        tracing::info!(count, enriched = enrichment.len(), "Leads imported");

        self.store.dispatch(Action::SetLeadsError(None));
        self.store.dispatch(Action::SetLeads(leads));
        count
    }

    /// Record an outreach message and mark its lead contacted.
    pub fn send_message(&mut self, lead_id: &str, content: &str) -> Result<Message> {
        let length = content.chars().count();
        if length > MAX_MESSAGE_LENGTH {
            return Err(DashboardError::MessageTooLong {
                length,
                max: MAX_MESSAGE_LENGTH,
            });
        }

        let lead = self
            .state()
            .lead(lead_id)
            .ok_or_else(|| DashboardError::LeadNotFound(lead_id.to_string()))?;
        let lead_name = lead.name.clone();

        let message = Message::sent(lead_id, lead_name.clone(), content);

        self.store.dispatch(Action::AddMessage(message.clone()));
        self.store.dispatch(Action::UpdateLead {
            id: lead_id.to_string(),
            update: LeadUpdate::status(LeadStatus::Contacted),
        });
        self.store.dispatch(Action::AddActivity(
            Activity::new(
                ActivityKind::MessageSent,
                "Message Sent",
                format!("Sent message to {lead_name}"),
            )
            .with_metadata(serde_json::json!({
                "leadId": lead_id,
                "messageId": message.id,
            })),
        ));

        tracing::info!(lead_id, message_id = %message.id, "Message sent");
        Ok(message)
    }

    /// Run from the demo dataset without contacting n8n.
    pub fn use_demo_data(&mut self) {
        self.store.dispatch(Action::SetConnected {
            connected: false,
            error: Some("demo mode".to_string()),
        });
    }

    /// Flip demo mode; returns the new setting.
    pub fn toggle_mock_data(&mut self) -> bool {
        let on = !self.state().use_mock_data;
        self.store.dispatch(Action::SetUseMockData(on));
        on
    }
}
