//! n8n REST API client.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::N8nConfig;
use crate::error::{ApiResult, ClientError};
use crate::models::{ExecutionList, N8nExecution, N8nWorkflow, SearchParams, TriggerRequest};
use crate::poller::ExecutionSource;

/// Header carrying the API key on authenticated calls.
pub const API_KEY_HEADER: &str = "X-N8N-API-KEY";

/// Default page size for `list_executions`.
const DEFAULT_EXECUTION_LIMIT: u32 = 10;

/// Raw response of a webhook trigger. The body schema is owned by the
/// workflow, so it is passed through untouched.
#[derive(Debug, Clone)]
pub struct WebhookResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

/// HTTP client for the n8n API.
#[derive(Clone, Debug)]
pub struct N8nClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    workflow_id: String,
}

impl N8nClient {
    /// Create a new client from connection settings.
    pub fn new(config: &N8nConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            workflow_id: config.workflow_id.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Workflow id used when a call does not name one.
    pub fn workflow_id(&self) -> &str {
        &self.workflow_id
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/api/v1{}", self.base_url, endpoint)
    }

    fn resolve_workflow<'a>(&'a self, workflow_id: Option<&'a str>) -> &'a str {
        workflow_id
            .filter(|id| !id.is_empty())
            .unwrap_or(&self.workflow_id)
    }

    /// Send an authenticated request and return the raw response.
    ///
    /// Only transport failures are errors here; status handling is left to
    /// the caller.
    async fn send(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<serde_json::Value>,
    ) -> ApiResult<Response> {
        let url = self.api_url(endpoint);

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");

        if !self.api_key.is_empty() {
            request = request.header(API_KEY_HEADER, &self.api_key);
        }

        if let Some(body) = body {
            request = request.json(&body);
        }

        tracing::trace!(method = %method, url = %url, "Sending n8n request");

        request
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))
    }

    /// Send an authenticated request and decode a JSON body.
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<serde_json::Value>,
    ) -> ApiResult<T> {
        let response = self.send(method, endpoint, body).await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(endpoint, status = status.as_u16(), "n8n request rejected");
            return Err(ClientError::api(status.as_u16(), body));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        serde_json::from_str(&text).map_err(|e| ClientError::Decode {
            status: status.as_u16(),
            message: e.to_string(),
        })
    }

    /// Fetch a workflow definition. Defaults to the configured workflow.
    pub async fn get_workflow(&self, workflow_id: Option<&str>) -> ApiResult<N8nWorkflow> {
        let id = self.resolve_workflow(workflow_id);
        self.request(Method::GET, &format!("/workflows/{}", id), None)
            .await
    }

    /// Trigger a workflow run with lead search parameters.
    pub async fn trigger_execution(
        &self,
        params: &SearchParams,
        workflow_id: Option<&str>,
    ) -> ApiResult<N8nExecution> {
        let id = self.resolve_workflow(workflow_id);
        let body = serde_json::to_value(TriggerRequest::from(params)).map_err(|e| {
            ClientError::Decode {
                status: 0,
                message: e.to_string(),
            }
        })?;

        let execution: N8nExecution = self
            .request(Method::POST, &format!("/workflows/{}/execute", id), Some(body))
            .await?;

        tracing::info!(
            workflow_id = %id,
            execution_id = %execution.id,
            "Workflow execution triggered"
        );

        Ok(execution)
    }

    /// Trigger a workflow through its webhook instead of the REST API.
    pub async fn trigger_webhook(
        &self,
        webhook_path: &str,
        params: &SearchParams,
    ) -> ApiResult<WebhookResponse> {
        let url = format!(
            "{}/webhook/{}",
            self.base_url,
            webhook_path.trim_start_matches('/')
        );

        let response = self
            .client
            .post(&url)
            .json(params)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response.json::<serde_json::Value>().await.map_err(|e| {
            ClientError::Decode {
                status,
                message: e.to_string(),
            }
        })?;

        tracing::info!(webhook_path, status, "Webhook triggered");

        Ok(WebhookResponse { status, body })
    }

    /// Fetch the current state of an execution.
    pub async fn get_execution(&self, execution_id: &str) -> ApiResult<N8nExecution> {
        self.request(Method::GET, &format!("/executions/{}", execution_id), None)
            .await
    }

    /// List recent executions of a workflow.
    pub async fn list_executions(
        &self,
        workflow_id: Option<&str>,
        limit: Option<u32>,
    ) -> ApiResult<Vec<N8nExecution>> {
        let id = self.resolve_workflow(workflow_id);
        let limit = limit.unwrap_or(DEFAULT_EXECUTION_LIMIT);

        let list: ExecutionList = self
            .request(
                Method::GET,
                &format!("/executions?workflowId={}&limit={}", id, limit),
                None,
            )
            .await?;

        Ok(list.data)
    }

    /// True iff the health endpoint answers with a success status.
    pub async fn health_check(&self) -> bool {
        match self
            .client
            .get(format!("{}/healthz", self.base_url))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(error = %e, base_url = %self.base_url, "Health check failed");
                false
            }
        }
    }

    /// True iff an authenticated workflow listing returns 200.
    pub async fn validate_api_key(&self) -> bool {
        match self.send(Method::GET, "/workflows", None).await {
            Ok(response) => response.status() == StatusCode::OK,
            Err(e) => {
                tracing::debug!(error = %e, "API key validation failed");
                false
            }
        }
    }
}

#[async_trait]
impl ExecutionSource for N8nClient {
    async fn get_execution(&self, execution_id: &str) -> ApiResult<N8nExecution> {
        N8nClient::get_execution(self, execution_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> N8nClient {
        N8nClient::new(&N8nConfig::new(server.base_url(), "test-key", "wf-1"))
    }

    #[test]
    fn test_client_creation() {
        let client = N8nClient::new(&N8nConfig::new("http://localhost:5678/", "", "wf"));
        assert_eq!(client.base_url(), "http://localhost:5678");
        assert_eq!(client.api_url("/workflows"), "http://localhost:5678/api/v1/workflows");
        assert_eq!(client.resolve_workflow(None), "wf");
        assert_eq!(client.resolve_workflow(Some("")), "wf");
        assert_eq!(client.resolve_workflow(Some("other")), "other");
    }

    #[tokio::test]
    async fn test_get_workflow_sends_api_key() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/v1/workflows/wf-1")
                    .header(API_KEY_HEADER, "test-key");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({
                        "id": "wf-1",
                        "name": "Lead Pipeline",
                        "active": true,
                        "nodes": [],
                        "connections": {}
                    }));
            })
            .await;

        let workflow = tokio_test::assert_ok!(client_for(&server).get_workflow(None).await);

        mock.assert_async().await;
        assert_eq!(workflow.name, "Lead Pipeline");
        assert!(workflow.active);
    }

    #[tokio::test]
    async fn test_trigger_execution_maps_search_params() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/v1/workflows/wf-1/execute")
                    .json_body(json!({
                        "salesNavigatorParams": {
                            "current_titles": "VP Engineering",
                            "location": "Berlin",
                            "keywords": "saas"
                        },
                        "count": 50
                    }));
                then.status(200)
                    .json_body(json!({"id": "exec-1", "finished": false, "status": "running"}));
            })
            .await;

        let params = SearchParams {
            current_titles: Some("VP Engineering".to_string()),
            location: Some("Berlin".to_string()),
            keywords: Some("saas".to_string()),
            count: 50,
            ..Default::default()
        };
        let execution = client_for(&server)
            .trigger_execution(&params, None)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(execution.id, "exec-1");
        assert!(!execution.finished);
    }

    #[tokio::test]
    async fn test_non_success_status_becomes_api_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/executions/missing");
                then.status(404).body("Not Found");
            })
            .await;

        let err = client_for(&server)
            .get_execution("missing")
            .await
            .unwrap_err();

        assert_eq!(err.status(), 404);
        assert_eq!(err.to_string(), "API Error: 404 - Not Found");
    }

    #[tokio::test]
    async fn test_malformed_body_becomes_decode_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/executions/42");
                then.status(200).body("<html>oops</html>");
            })
            .await;

        let err = tokio_test::assert_err!(client_for(&server).get_execution("42").await);
        assert!(matches!(err, ClientError::Decode { status: 200, .. }));
    }

    #[tokio::test]
    async fn test_transport_failure_has_status_zero() {
        let client = N8nClient::new(&N8nConfig::new("http://127.0.0.1:1", "k", "wf"));

        let err = client.get_execution("1").await.unwrap_err();
        assert!(err.is_transport());
        assert_eq!(err.status(), 0);

        assert!(!client.health_check().await);
        assert!(!client.validate_api_key().await);
    }

    #[tokio::test]
    async fn test_list_executions_unwraps_envelope() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/v1/executions")
                    .query_param("workflowId", "wf-1")
                    .query_param("limit", "5");
                then.status(200).json_body(json!({
                    "data": [
                        {"id": 2, "finished": true, "status": "success"},
                        {"id": 1, "finished": true, "status": "error"}
                    ],
                    "nextCursor": null
                }));
            })
            .await;

        let executions = client_for(&server)
            .list_executions(None, Some(5))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(executions.len(), 2);
        assert_eq!(executions[0].id, "2");
    }

    #[tokio::test]
    async fn test_health_and_key_checks() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/healthz");
                then.status(200).json_body(json!({"status": "ok"}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/workflows");
                then.status(401).body("unauthorized");
            })
            .await;

        let client = client_for(&server);
        assert!(client.health_check().await);
        assert!(!client.validate_api_key().await);
    }

    #[tokio::test]
    async fn test_webhook_passes_body_through() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/webhook/lead-search")
                    .json_body(json!({"currentTitles": "CTO", "count": 5}));
                then.status(202).json_body(json!({"message": "Workflow was started"}));
            })
            .await;

        let params = SearchParams {
            current_titles: Some("CTO".to_string()),
            count: 5,
            ..Default::default()
        };
        let response = client_for(&server)
            .trigger_webhook("/lead-search", &params)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, 202);
        assert_eq!(response.body["message"], "Workflow was started");
    }
}
