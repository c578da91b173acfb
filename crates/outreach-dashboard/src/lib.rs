//! Lead outreach dashboard core
//!
//! Tracks an n8n lead-generation pipeline and the outreach done on its
//! results.
//!
//! This crate provides:
//! - Domain models for leads, messages, activities and pipeline stages
//! - Transformers from n8n payloads and sheet rows to those models
//! - A single state store mutated only through a pure reducer
//! - The `Dashboard` orchestrator for searches, polling and outreach
//! - Demo data, lead filters, message templates and CSV export

pub mod backend;
pub mod config;
pub mod dashboard;
pub mod demo;
pub mod error;
pub mod export;
pub mod filters;
pub mod models;
pub mod store;
pub mod templates;
pub mod transform;

pub use backend::WorkflowBackend;
pub use config::{AppConfig, DashboardConfig};
pub use dashboard::{Dashboard, DashboardSettings, SearchReport};
pub use error::{DashboardError, Result};
pub use filters::{DashboardStats, LeadFilter, ScoreTier};
pub use store::{reduce, Action, AppState, ConnectionStatus, Store};
