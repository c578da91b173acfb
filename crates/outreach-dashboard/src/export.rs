//! CSV export of the lead list.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};

use crate::error::Result;
use crate::models::Lead;

const HEADER: [&str; 7] = [
    "Name", "Company", "Position", "Industry", "Location", "Score", "Status",
];

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Render leads as CSV: header row, then one quoted row per lead.
pub fn leads_to_csv<'a, I>(leads: I) -> String
where
    I: IntoIterator<Item = &'a Lead>,
{
    let mut lines = vec![HEADER.join(",")];
    lines.extend(leads.into_iter().map(|lead| {
        [
            quote(&lead.name),
            quote(&lead.company_name),
            quote(&lead.position),
            quote(&lead.industry),
            quote(&lead.location),
            quote(&lead.score.to_string()),
            quote(lead.status.as_str()),
        ]
        .join(",")
    }));
    lines.join("\n")
}

/// `leads-export-YYYY-MM-DD.csv`
pub fn export_filename(date: NaiveDate) -> String {
    format!("leads-export-{}.csv", date.format("%Y-%m-%d"))
}

/// Today's date in UTC, used to stamp export files.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Write the export into `dir`, returning the file path.
pub fn write_csv<'a, I>(dir: &Path, date: NaiveDate, leads: I) -> Result<PathBuf>
where
    I: IntoIterator<Item = &'a Lead>,
{
    fs::create_dir_all(dir)?;
    let path = dir.join(export_filename(date));
    fs::write(&path, leads_to_csv(leads))?;
    tracing::info!(path = %path.display(), "Leads exported");
    Ok(path)
}
