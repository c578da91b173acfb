//! Transformers from remote payloads to dashboard view models.
//!
//! - `nodes` - n8n workflow + run data to pipeline stages
//! - `leads` - sheet rows + enrichment to scored leads
//! - `activity` - executions to activity feed entries

mod activity;
mod leads;
mod nodes;

pub use activity::execution_to_activity;
pub use leads::{avatar_url, calculate_lead_score, map_row_to_lead, EnrichmentRow, LeadRow};
pub use nodes::{map_execution_to_nodes, node_icon, node_status};
