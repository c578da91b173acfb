//! Remote workflow backend seam.

use async_trait::async_trait;
use n8n_client::{
    ApiResult, ExecutionSource, N8nClient, N8nExecution, N8nWorkflow, SearchParams,
    WebhookResponse,
};

/// Everything the dashboard needs from the automation backend.
#[async_trait]
pub trait WorkflowBackend: ExecutionSource {
    async fn get_workflow(&self, workflow_id: Option<&str>) -> ApiResult<N8nWorkflow>;

    async fn trigger_execution(
        &self,
        params: &SearchParams,
        workflow_id: Option<&str>,
    ) -> ApiResult<N8nExecution>;

    async fn trigger_webhook(
        &self,
        webhook_path: &str,
        params: &SearchParams,
    ) -> ApiResult<WebhookResponse>;

    async fn list_executions(
        &self,
        workflow_id: Option<&str>,
        limit: Option<u32>,
    ) -> ApiResult<Vec<N8nExecution>>;

    async fn health_check(&self) -> bool;

    async fn validate_api_key(&self) -> bool;
}

#[async_trait]
impl WorkflowBackend for N8nClient {
    async fn get_workflow(&self, workflow_id: Option<&str>) -> ApiResult<N8nWorkflow> {
        N8nClient::get_workflow(self, workflow_id).await
    }

    async fn trigger_execution(
        &self,
        params: &SearchParams,
        workflow_id: Option<&str>,
    ) -> ApiResult<N8nExecution> {
        N8nClient::trigger_execution(self, params, workflow_id).await
    }

    async fn trigger_webhook(
        &self,
        webhook_path: &str,
        params: &SearchParams,
    ) -> ApiResult<WebhookResponse> {
        N8nClient::trigger_webhook(self, webhook_path, params).await
    }

    async fn list_executions(
        &self,
        workflow_id: Option<&str>,
        limit: Option<u32>,
    ) -> ApiResult<Vec<N8nExecution>> {
        N8nClient::list_executions(self, workflow_id, limit).await
    }

    async fn health_check(&self) -> bool {
        N8nClient::health_check(self).await
    }

    async fn validate_api_key(&self) -> bool {
        N8nClient::validate_api_key(self).await
    }
}
