//! Lead rows from the results sheet.

use chrono::{SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer};

use crate::models::{Lead, LeadStatus};

const BASE_SCORE: i32 = 50;

static PROFILE_SLUG: Lazy<Regex> = Lazy::new(|| Regex::new(r"/in/([^/?]+)").expect("valid regex"));

/// One row of the leads sheet, keyed by the sheet's column headers.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LeadRow {
    #[serde(rename = "Name", default, deserialize_with = "lenient_string")]
    pub name: String,

    #[serde(rename = "Profile URL", default, deserialize_with = "lenient_string")]
    pub profile_url: String,

    #[serde(rename = "Headline", default, deserialize_with = "lenient_string")]
    pub headline: String,

    #[serde(rename = "Location", default, deserialize_with = "lenient_string")]
    pub location: String,

    #[serde(rename = "Is Premium", default, deserialize_with = "lenient_string")]
    pub is_premium: String,

    #[serde(rename = "Company Name", default, deserialize_with = "lenient_string")]
    pub company_name: String,

    #[serde(rename = "Company Linkedin URN", default, deserialize_with = "lenient_string")]
    pub company_linkedin_urn: String,

    #[serde(rename = "Company Linkedin URL", default, deserialize_with = "lenient_string")]
    pub company_linkedin_url: String,

    #[serde(rename = "Company URL", default, deserialize_with = "lenient_string")]
    pub company_url: String,

    #[serde(rename = "Industry", default, deserialize_with = "lenient_string")]
    pub industry: String,

    #[serde(rename = "Position", default, deserialize_with = "lenient_string")]
    pub position: String,

    #[serde(rename = "Company Description", default, deserialize_with = "lenient_string")]
    pub company_description: String,

    #[serde(rename = "Joined At", default, deserialize_with = "lenient_string")]
    pub joined_at: String,

    #[serde(rename = "Status", default, deserialize_with = "lenient_string")]
    pub status: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub row_number: String,
}

/// Per-company research, joined to leads on the company URN.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EnrichmentRow {
    #[serde(rename = "Company URN", default, deserialize_with = "lenient_string")]
    pub company_urn: String,

    #[serde(rename = "Lead Posts Summary", default, deserialize_with = "lenient_string")]
    pub lead_posts_summary: String,

    #[serde(rename = "Company Posts Summary", default, deserialize_with = "lenient_string")]
    pub company_posts_summary: String,

    #[serde(rename = "Company News Summary", default, deserialize_with = "lenient_string")]
    pub company_news_summary: String,

    #[serde(rename = "Key Topics", default, deserialize_with = "lenient_string")]
    pub key_topics: String,

    #[serde(rename = "Pain Signals", default, deserialize_with = "lenient_string")]
    pub pain_signals: String,

    #[serde(rename = "Buying Signals", default, deserialize_with = "lenient_string")]
    pub buying_signals: String,

    #[serde(rename = "Last Researched At", default, deserialize_with = "lenient_string")]
    pub last_researched_at: String,
}

/// Sheet exports carry booleans and numbers as either JSON scalars or text.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Cell {
        Text(String),
        Flag(bool),
        Int(i64),
        Float(f64),
    }

    Ok(match Option::<Cell>::deserialize(deserializer)? {
        Some(Cell::Text(s)) => s,
        Some(Cell::Flag(b)) => b.to_string(),
        Some(Cell::Int(n)) => n.to_string(),
        Some(Cell::Float(n)) => n.to_string(),
        None => String::new(),
    })
}

fn present(value: &str) -> bool {
    !value.is_empty()
}

fn non_empty(value: &str) -> Option<String> {
    present(value).then(|| value.to_string())
}

fn is_premium(row: &LeadRow) -> bool {
    row.is_premium.eq_ignore_ascii_case("true")
}

/// Outreach priority of a row, always within `0..=100`.
pub fn calculate_lead_score(row: &LeadRow, enrichment: Option<&EnrichmentRow>) -> u8 {
    let mut score = BASE_SCORE;

    if is_premium(row) {
        score += 15;
    }
    if present(&row.company_url) && row.company_url != "NA" {
        score += 10;
    }

    if let Some(content) = enrichment {
        let bonuses = [
            (&content.lead_posts_summary, 8),
            (&content.company_posts_summary, 5),
            (&content.company_news_summary, 5),
            (&content.buying_signals, 12),
            (&content.pain_signals, 10),
        ];
        score += bonuses
            .iter()
            .filter(|(field, _)| present(field))
            .map(|(_, bonus)| bonus)
            .sum::<i32>();
    }

    if present(&row.headline) {
        score += 3;
    }
    if present(&row.location) {
        score += 2;
    }

    score.clamp(0, 100) as u8
}

/// Placeholder avatar for a contact without a photo.
pub fn avatar_url(name: &str) -> String {
    let name = if name.is_empty() { "User" } else { name };
    format!(
        "https://ui-avatars.com/api/?name={}&background=0066e6&color=fff&size=100",
        urlencoding::encode(name)
    )
}

fn person_urn(profile_url: &str) -> String {
    PROFILE_SLUG
        .captures(profile_url)
        .and_then(|caps| caps.get(1))
        .map(|slug| format!("urn:li:person:{}", slug.as_str()))
        .unwrap_or_default()
}

fn map_status(status: &str) -> LeadStatus {
    status.parse().unwrap_or_default()
}

/// Build a scored lead from a sheet row and its optional company research.
pub fn map_row_to_lead(row: &LeadRow, enrichment: Option<&EnrichmentRow>) -> Lead {
    let created_at = non_empty(&row.joined_at)
        .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));

    Lead {
        id: row.row_number.clone(),
        name: non_empty(&row.name).unwrap_or_else(|| "Unknown".to_string()),
        urn: person_urn(&row.profile_url),
        profile_url: row.profile_url.clone(),
        image_url: avatar_url(&row.name),
        headline: row.headline.clone(),
        location: row.location.clone(),
        is_premium: is_premium(row),
        company_name: row.company_name.clone(),
        company_urn: row.company_linkedin_urn.clone(),
        company_url: row.company_url.clone(),
        industry: row.industry.clone(),
        position: row.position.clone(),
        score: calculate_lead_score(row, enrichment),
        status: map_status(&row.status),
        created_at,
        posts_summary: enrichment.and_then(|e| non_empty(&e.lead_posts_summary)),
        company_posts_summary: enrichment.and_then(|e| non_empty(&e.company_posts_summary)),
        company_news_summary: enrichment.and_then(|e| non_empty(&e.company_news_summary)),
    }
}
