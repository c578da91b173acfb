//! Dashboard error types.

use n8n_client::ClientError;
use thiserror::Error;

/// Errors surfaced by dashboard operations.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Execution poll failed: {0}")]
    PollFailed(ClientError),

    #[error("Execution did not finish after {attempts} status checks")]
    PollTimedOut { attempts: u32 },

    #[error("Execution poll cancelled")]
    PollCancelled,

    #[error("Lead not found: {0}")]
    LeadNotFound(String),

    #[error("Message is {length} characters, the limit is {max}")]
    MessageTooLong { length: usize, max: usize },

    #[error("Export failed: {0}")]
    Export(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
