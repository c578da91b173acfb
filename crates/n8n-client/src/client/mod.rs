//! HTTP client for the n8n REST API.

mod n8n;

pub use n8n::{N8nClient, WebhookResponse, API_KEY_HEADER};
