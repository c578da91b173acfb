//! Pipeline stage derivation.

use n8n_client::{N8nWorkflowNode, RunData};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::models::{NodeIcon, NodeStatus, WorkflowNode};

/// Longest display name, in characters.
const MAX_NAME_LEN: usize = 20;

/// Nominal item count a stage reports against.
const NOMINAL_TOTAL: u32 = 100;

static HDW_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^HDW\s+").expect("valid regex"));
static GOOGLE_SHEETS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^Google\s+Sheets\d*").expect("valid regex"));
static LOOP_OVER_ITEMS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^Loop\s+Over\s+Items\d*").expect("valid regex"));

/// Curated node-name keywords, checked first and in order.
const NAME_ICONS: &[(&str, NodeIcon)] = &[
    ("Find Leads", NodeIcon::Search),
    ("Get Company", NodeIcon::Building2),
    ("Research Website", NodeIcon::Globe),
    ("Analyze Posts", NodeIcon::FileText),
    ("Company Posts", NodeIcon::Building),
    ("Company News", NodeIcon::Newspaper),
    ("Score Leads", NodeIcon::BarChart3),
    ("Send Messages", NodeIcon::Send),
    ("OpenAI", NodeIcon::Brain),
    ("Google Sheets", NodeIcon::FileSpreadsheet),
];

/// Exact node types.
const TYPE_ICONS: &[(&str, NodeIcon)] = &[
    ("@n8n/n8n-nodes-langchain.lmChatOpenAi", NodeIcon::Brain),
    ("n8n-nodes-hdw.hdwLinkedin", NodeIcon::Search),
    ("n8n-nodes-base.googleSheets", NodeIcon::FileSpreadsheet),
    ("n8n-nodes-base.splitInBatches", NodeIcon::Layers),
    ("n8n-nodes-base.aggregate", NodeIcon::Merge),
    ("n8n-nodes-base.if", NodeIcon::GitBranch),
    ("n8n-nodes-base.httpRequest", NodeIcon::Globe),
    ("n8n-nodes-base.stickyNote", NodeIcon::StickyNote),
];

/// Node-type keywords for descriptions, first match wins.
const TYPE_DESCRIPTIONS: &[(&str, &str)] = &[
    ("hdwLinkedin", "Search LinkedIn Sales Navigator for leads"),
    ("googleSheets", "Read/write data to Google Sheets"),
    ("lmChatOpenAi", "AI analysis with GPT models"),
    ("splitInBatches", "Process items in batches"),
    ("aggregate", "Combine multiple data items"),
    ("httpRequest", "Make HTTP request to external API"),
];

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Sticky notes are canvas annotations, not pipeline stages.
fn is_annotation(node: &N8nWorkflowNode) -> bool {
    node.node_type.contains("stickyNote")
}

/// Map workflow nodes and optional run data to pipeline stages, left to right.
pub fn map_execution_to_nodes(
    nodes: &[N8nWorkflowNode],
    run_data: Option<&RunData>,
) -> Vec<WorkflowNode> {
    let mut stages: Vec<&N8nWorkflowNode> = nodes.iter().filter(|n| !is_annotation(n)).collect();

    // Stable: equal x keeps declaration order.
    stages.sort_by(|a, b| a.x().total_cmp(&b.x()));

    stages
        .into_iter()
        .map(|node| {
            let status = node_status(&node.name, run_data);
            let processed_count = match status {
                NodeStatus::Completed => NOMINAL_TOTAL,
                NodeStatus::Running => NOMINAL_TOTAL / 2,
                NodeStatus::Idle | NodeStatus::Error => 0,
            };

            WorkflowNode {
                id: node.id.clone(),
                name: display_name(&node.name),
                description: describe(node),
                status,
                icon: node_icon(node),
                progress: (status == NodeStatus::Running).then_some(50),
                processed_count,
                total_count: NOMINAL_TOTAL,
            }
        })
        .collect()
}

/// Status of a node given the latest run data.
///
/// An entry that is a non-empty array means the node produced output; any
/// other entry (empty array, in-progress marker) means it is still running.
pub fn node_status(node_name: &str, run_data: Option<&RunData>) -> NodeStatus {
    match run_data.and_then(|data| data.get(node_name)) {
        None | Some(Value::Null) => NodeStatus::Idle,
        Some(entry) if entry.as_array().is_some_and(|runs| !runs.is_empty()) => {
            NodeStatus::Completed
        }
        Some(_) => NodeStatus::Running,
    }
}

/// Icon for a node: curated name keywords, then exact type, then the default.
pub fn node_icon(node: &N8nWorkflowNode) -> NodeIcon {
    NAME_ICONS
        .iter()
        .find(|(keyword, _)| contains_ignore_case(&node.name, keyword))
        .or_else(|| TYPE_ICONS.iter().find(|(ty, _)| *ty == node.node_type))
        .map(|(_, icon)| *icon)
        .unwrap_or(NodeIcon::Default)
}

fn display_name(name: &str) -> String {
    let name = HDW_PREFIX.replace(name, "");
    let name = GOOGLE_SHEETS.replace(&name, "Save Data");
    let name = LOOP_OVER_ITEMS.replace(&name, "Process Batch");
    name.chars().take(MAX_NAME_LEN).collect()
}

fn describe(node: &N8nWorkflowNode) -> String {
    TYPE_DESCRIPTIONS
        .iter()
        .find(|(keyword, _)| contains_ignore_case(&node.node_type, keyword))
        .map(|(_, description)| description.to_string())
        .unwrap_or_else(|| format!("Execute {}", node.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wf_node(id: &str, name: &str, node_type: &str, x: f64) -> N8nWorkflowNode {
        N8nWorkflowNode {
            id: id.to_string(),
            name: name.to_string(),
            node_type: node_type.to_string(),
            position: [x, 0.0],
            parameters: None,
        }
    }

    fn pipeline() -> Vec<N8nWorkflowNode> {
        vec![
            wf_node("3", "OpenAI Chat Model", "@n8n/n8n-nodes-langchain.lmChatOpenAi", 600.0),
            wf_node("1", "HDW Find Leads", "n8n-nodes-hdw.hdwLinkedin", 200.0),
            wf_node("n", "Sticky Note", "n8n-nodes-base.stickyNote", 0.0),
            wf_node("2", "Loop Over Items1", "n8n-nodes-base.splitInBatches", 400.0),
            wf_node("4", "Google Sheets2", "n8n-nodes-base.googleSheets", 400.0),
            wf_node("5", "Merge Results", "n8n-nodes-base.merge", 800.0),
        ]
    }

    #[test]
    fn test_orders_left_to_right_and_drops_notes() {
        let nodes = map_execution_to_nodes(&pipeline(), None);
        let ids: Vec<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "4", "3", "5"]);
    }

    #[test]
    fn test_ordering_is_idempotent() {
        let run_data: RunData = [("HDW Find Leads".to_string(), json!([{}]))].into();
        let first = map_execution_to_nodes(&pipeline(), Some(&run_data));
        let second = map_execution_to_nodes(&pipeline(), Some(&run_data));
        assert_eq!(first, second);
    }

    #[test]
    fn test_status_from_run_data() {
        let run_data: RunData = [
            ("HDW Find Leads".to_string(), json!([{"data": {}}])),
            ("Loop Over Items1".to_string(), json!([])),
            ("Google Sheets2".to_string(), json!({"inProgress": true})),
        ]
        .into();

        let nodes = map_execution_to_nodes(&pipeline(), Some(&run_data));
        let status: Vec<NodeStatus> = nodes.iter().map(|n| n.status).collect();
        assert_eq!(
            status,
            vec![
                NodeStatus::Completed,
                NodeStatus::Running,
                NodeStatus::Running,
                NodeStatus::Idle,
                NodeStatus::Idle,
            ]
        );

        assert_eq!(nodes[0].processed_count, 100);
        assert_eq!(nodes[0].progress, None);
        assert_eq!(nodes[1].processed_count, 50);
        assert_eq!(nodes[1].progress, Some(50));
        assert_eq!(nodes[3].processed_count, 0);
        assert!(nodes.iter().all(|n| n.total_count == 100));
    }

    #[test]
    fn test_no_run_data_is_idle() {
        assert_eq!(node_status("Find Leads", None), NodeStatus::Idle);
        assert_eq!(node_status("Find Leads", Some(&RunData::new())), NodeStatus::Idle);
    }

    #[test]
    fn test_null_entry_is_idle() {
        let run_data: RunData = [("Find Leads".to_string(), Value::Null)].into();
        assert_eq!(node_status("Find Leads", Some(&run_data)), NodeStatus::Idle);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(display_name("HDW Find Leads"), "Find Leads");
        assert_eq!(display_name("Google Sheets2"), "Save Data");
        assert_eq!(display_name("google sheets"), "Save Data");
        assert_eq!(display_name("Loop Over Items3"), "Process Batch");
        assert_eq!(
            display_name("Summarize Company Website Content"),
            "Summarize Company We"
        );
        assert_eq!(display_name("hdw lowercase stays"), "hdw lowercase stays");
    }

    #[test]
    fn test_descriptions() {
        let nodes = map_execution_to_nodes(&pipeline(), None);
        assert_eq!(nodes[0].description, "Search LinkedIn Sales Navigator for leads");
        assert_eq!(nodes[1].description, "Process items in batches");
        assert_eq!(nodes[2].description, "Read/write data to Google Sheets");
        assert_eq!(nodes[3].description, "AI analysis with GPT models");
        assert_eq!(nodes[4].description, "Execute Merge Results");
    }

    #[test]
    fn test_icon_lookup_prefers_name() {
        // Name keyword beats the type table.
        let node = wf_node("1", "Score Leads", "n8n-nodes-base.httpRequest", 0.0);
        assert_eq!(node_icon(&node), NodeIcon::BarChart3);

        let node = wf_node("2", "Fetch Profile", "n8n-nodes-base.httpRequest", 0.0);
        assert_eq!(node_icon(&node), NodeIcon::Globe);

        let node = wf_node("3", "Filter", "n8n-nodes-base.if", 0.0);
        assert_eq!(node_icon(&node), NodeIcon::GitBranch);

        let node = wf_node("4", "Wait", "n8n-nodes-base.wait", 0.0);
        assert_eq!(node_icon(&node), NodeIcon::Default);
        assert_eq!(NodeIcon::Default.as_str(), "Box");
    }
}
