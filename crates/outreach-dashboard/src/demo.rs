//! Bundled demo dataset.
//!
//! Served on every read path while the dashboard is disconnected from n8n.

use chrono::{DateTime, TimeZone, Utc};
use n8n_client::SearchParams;

use crate::models::{
    Activity, ActivityKind, Lead, LeadStatus, Message, MessageStatus, NodeIcon, NodeStatus,
    SearchHistory, WorkflowNode,
};

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn lead(
    id: &str,
    name: &str,
    slug: &str,
    person_id: &str,
    headline: &str,
    location: &str,
    is_premium: bool,
    company: (&str, &str, &str),
    industry: &str,
    position: &str,
    score: u8,
    status: LeadStatus,
    created_at: &str,
) -> Lead {
    let (company_name, company_urn, company_url) = company;
    Lead {
        id: id.to_string(),
        name: name.to_string(),
        urn: format!("urn:li:person:{person_id}"),
        profile_url: format!("https://linkedin.com/in/{slug}"),
        image_url: crate::transform::avatar_url(name),
        headline: headline.to_string(),
        location: location.to_string(),
        is_premium,
        company_name: company_name.to_string(),
        company_urn: company_urn.to_string(),
        company_url: company_url.to_string(),
        industry: industry.to_string(),
        position: position.to_string(),
        score,
        status,
        created_at: created_at.to_string(),
        posts_summary: None,
        company_posts_summary: None,
        company_news_summary: None,
    }
}

/// Demo leads.
pub fn leads() -> Vec<Lead> {
    let mut sarah = lead(
        "1",
        "Sarah Chen",
        "sarah-chen",
        "ABC123",
        "VP of Engineering at TechCorp | Building AI-first Products",
        "San Francisco Bay Area",
        true,
        ("TechCorp", "urn:li:company:12345", "https://techcorp.com"),
        "Technology",
        "VP of Engineering",
        92,
        LeadStatus::New,
        "2026-01-27T10:00:00Z",
    );
    sarah.posts_summary =
        Some("Actively posts about AI, machine learning, and tech leadership...".to_string());
    sarah.company_news_summary =
        Some("Recently raised Series C funding, expanding engineering team...".to_string());

    let mut michael = lead(
        "2",
        "Michael Rodriguez",
        "michael-rodriguez",
        "DEF456",
        "CTO at DataFlow | Data Infrastructure Expert",
        "New York City",
        true,
        ("DataFlow", "urn:li:company:23456", "https://dataflow.io"),
        "Software",
        "CTO",
        87,
        LeadStatus::Contacted,
        "2026-01-26T15:30:00Z",
    );
    michael.posts_summary =
        Some("Shares insights on data engineering and scalability...".to_string());
    michael.company_posts_summary =
        Some("Company posts about product launches and culture...".to_string());

    vec![
        sarah,
        michael,
        lead(
            "3",
            "Emily Watson",
            "emily-watson",
            "GHI789",
            "Head of Growth at ScaleUp | SaaS Marketing Strategy",
            "Austin, Texas",
            false,
            ("ScaleUp", "urn:li:company:34567", "https://scaleup.com"),
            "Marketing & Advertising",
            "Head of Growth",
            78,
            LeadStatus::Responded,
            "2026-01-25T09:15:00Z",
        ),
        lead(
            "4",
            "James Park",
            "james-park",
            "JKL012",
            "Director of Operations at CloudScale",
            "Seattle, WA",
            true,
            ("CloudScale", "urn:li:company:45678", "https://cloudscale.io"),
            "Cloud Computing",
            "Director of Operations",
            65,
            LeadStatus::New,
            "2026-01-27T08:00:00Z",
        ),
        lead(
            "5",
            "Lisa Thompson",
            "lisa-thompson",
            "MNO345",
            "CEO & Founder at HealthTech Solutions",
            "Boston, MA",
            true,
            ("HealthTech Solutions", "urn:li:company:56789", "https://healthtech.com"),
            "Healthcare",
            "CEO",
            95,
            LeadStatus::New,
            "2026-01-27T11:30:00Z",
        ),
    ]
}

fn activity(id: &str, kind: ActivityKind, title: &str, description: &str, timestamp: DateTime<Utc>) -> Activity {
    Activity {
        id: id.to_string(),
        kind,
        title: title.to_string(),
        description: description.to_string(),
        timestamp,
        metadata: None,
    }
}

/// Demo activity feed, newest first.
pub fn activities() -> Vec<Activity> {
    vec![
        activity(
            "1",
            ActivityKind::LeadFound,
            "New Lead Found",
            "Lisa Thompson - CEO at HealthTech Solutions",
            at(2026, 1, 27, 11, 30),
        ),
        activity(
            "2",
            ActivityKind::ScoreUpdated,
            "Lead Score Updated",
            "Sarah Chen score increased to 92",
            at(2026, 1, 27, 10, 45),
        ),
        activity(
            "3",
            ActivityKind::MessageSent,
            "Message Sent",
            "Outreach message sent to Michael Rodriguez",
            at(2026, 1, 27, 10, 0),
        ),
        activity(
            "4",
            ActivityKind::ResponseReceived,
            "Response Received",
            "Emily Watson replied to your message",
            at(2026, 1, 26, 16, 30),
        ),
        activity(
            "5",
            ActivityKind::SearchCompleted,
            "Search Completed",
            "Found 25 new leads matching your criteria",
            at(2026, 1, 26, 14, 0),
        ),
    ]
}

fn node(
    id: &str,
    name: &str,
    description: &str,
    status: NodeStatus,
    icon: NodeIcon,
    processed: u32,
) -> WorkflowNode {
    let total = 50;
    WorkflowNode {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        status,
        icon,
        progress: (status == NodeStatus::Running).then(|| (processed * 100 / total) as u8),
        processed_count: processed,
        total_count: total,
    }
}

/// Demo pipeline, mid-run.
pub fn workflow_nodes() -> Vec<WorkflowNode> {
    use NodeStatus::{Completed, Idle, Running};

    vec![
        node("1", "Find Leads", "Search LinkedIn Sales Navigator for matching profiles", Completed, NodeIcon::Search, 50),
        node("2", "Get Company Info", "Fetch company details from LinkedIn", Completed, NodeIcon::Building2, 50),
        node("3", "Research Website", "AI analyzes company website for business info", Running, NodeIcon::Globe, 32),
        node("4", "Analyze Posts", "Summarize lead LinkedIn activity", Idle, NodeIcon::FileText, 0),
        node("5", "Company Posts", "Analyze company LinkedIn content", Idle, NodeIcon::Building, 0),
        node("6", "Company News", "Search Google for recent company news", Idle, NodeIcon::Newspaper, 0),
        node("7", "Score Leads", "AI scoring based on all collected data", Idle, NodeIcon::BarChart3, 0),
        node("8", "Send Messages", "Send personalized outreach messages", Idle, NodeIcon::Send, 0),
    ]
}

/// Demo message log, newest first.
pub fn messages() -> Vec<Message> {
    vec![
        Message {
            id: "1".to_string(),
            lead_id: "2".to_string(),
            lead_name: "Michael Rodriguez".to_string(),
            subject: None,
            content: "Hi Michael, I noticed your work on data infrastructure at DataFlow is impressive. Would love to connect and discuss how we might help with your scaling challenges.".to_string(),
            sent_at: at(2026, 1, 27, 10, 0),
            status: MessageStatus::Delivered,
        },
        Message {
            id: "2".to_string(),
            lead_id: "3".to_string(),
            lead_name: "Emily Watson".to_string(),
            subject: None,
            content: "Hey Emily! Your growth strategies at ScaleUp are fascinating. Id love to share some insights on how we can help accelerate your SaaS metrics.".to_string(),
            sent_at: at(2026, 1, 26, 14, 0),
            status: MessageStatus::Replied,
        },
    ]
}

/// Demo search history, newest first.
pub fn search_history() -> Vec<SearchHistory> {
    let sizes = |s: &[&str]| -> Option<Vec<String>> { Some(s.iter().map(|v| v.to_string()).collect()) };

    vec![
        SearchHistory {
            id: "1".to_string(),
            params: SearchParams {
                current_titles: Some("VP Engineering, CTO".to_string()),
                industry: Some("Technology".to_string()),
                location: Some("United States".to_string()),
                company_sizes: sizes(&["201-500", "501-1,000"]),
                count: 50,
                ..Default::default()
            },
            leads_found: 47,
            executed_at: at(2026, 1, 27, 9, 0),
            name: Some("Tech Leaders Q1".to_string()),
        },
        SearchHistory {
            id: "2".to_string(),
            params: SearchParams {
                current_titles: Some("Head of Growth, Marketing Director".to_string()),
                industry: Some("SaaS".to_string()),
                location: Some("North America".to_string()),
                company_sizes: sizes(&["51-200", "201-500"]),
                count: 30,
                ..Default::default()
            },
            leads_found: 28,
            executed_at: at(2026, 1, 25, 11, 0),
            name: Some("Growth Marketers".to_string()),
        },
    ]
}
