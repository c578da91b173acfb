//! Pipeline view models.

use serde::{Deserialize, Serialize};

/// Display state of one pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Idle,
    Running,
    Completed,
    Error,
}

impl std::fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Running => write!(f, "running"),
            Self::Completed => write!(f, "completed"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Icon shown for a pipeline stage.
///
/// Serialized as the icon-set name the front end renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeIcon {
    Brain,
    Search,
    FileSpreadsheet,
    Layers,
    Merge,
    GitBranch,
    Globe,
    StickyNote,
    Building2,
    FileText,
    Building,
    Newspaper,
    BarChart3,
    Send,
    /// Fallback when neither the node name nor its type is recognised.
    #[serde(rename = "Box")]
    Default,
}

impl NodeIcon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Brain => "Brain",
            Self::Search => "Search",
            Self::FileSpreadsheet => "FileSpreadsheet",
            Self::Layers => "Layers",
            Self::Merge => "Merge",
            Self::GitBranch => "GitBranch",
            Self::Globe => "Globe",
            Self::StickyNote => "StickyNote",
            Self::Building2 => "Building2",
            Self::FileText => "FileText",
            Self::Building => "Building",
            Self::Newspaper => "Newspaper",
            Self::BarChart3 => "BarChart3",
            Self::Send => "Send",
            Self::Default => "Box",
        }
    }
}

/// One pipeline stage as the dashboard shows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowNode {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: NodeStatus,
    pub icon: NodeIcon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    pub processed_count: u32,
    pub total_count: u32,
}
