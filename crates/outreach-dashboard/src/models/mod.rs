//! Dashboard domain models.

mod activity;
mod lead;
mod message;
mod search;
mod workflow;

pub use activity::{Activity, ActivityKind, MAX_ACTIVITIES};
pub use lead::{Lead, LeadStatus, LeadUpdate};
pub use message::{Message, MessageStatus};
pub use search::SearchHistory;
pub use workflow::{NodeIcon, NodeStatus, WorkflowNode};
