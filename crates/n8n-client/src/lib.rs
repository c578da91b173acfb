//! n8n API client
//!
//! Talks to the REST surface of an n8n workflow automation backend.
//!
//! This crate provides:
//! - Typed models for workflows, executions and per-node run data
//! - An authenticated HTTP client that returns errors as values
//! - A cancellable execution poller with optional attempt/time budgets
//! - Environment-driven connection configuration

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod poller;

pub use client::{N8nClient, WebhookResponse, API_KEY_HEADER};
pub use config::N8nConfig;
pub use error::{ApiResult, ClientError};
pub use models::{
    ExecutionStatus, N8nConnection, N8nExecution, N8nWorkflow, N8nWorkflowNode, RunData,
    SearchParams,
};
pub use poller::{ExecutionPoller, ExecutionSource, PollOptions, PollOutcome};
