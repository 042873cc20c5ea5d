//! Text summary builder for CLI output.
//!
//! Formats the status catalog as plain lines for text mode.

use crate::model::{ProjectReference, StatusRecord};
use crate::registry::StatusRegistry;
use anyhow::{Context, Result};
use time::macros::format_description;
use time::OffsetDateTime;

/// Pre-formatted lines for text output.
pub(crate) struct TextSummary {
    pub lines: Vec<String>,
}

/// Calendar date of a retirement, or `-` for active records.
pub(crate) fn format_retired_at(retired_at: Option<OffsetDateTime>) -> Result<String> {
    match retired_at {
        Some(ts) => ts
            .format(format_description!("[year]-[month]-[day]"))
            .context("format retirement date"),
        None => Ok("-".to_string()),
    }
}

fn status_line(record: &StatusRecord) -> Result<String> {
    Ok(format!(
        "{:<8} {:<20} {}",
        record.code,
        record.name,
        format_retired_at(record.retired_at)?
    ))
}

fn project_line(project: &ProjectReference, registry: &StatusRegistry) -> String {
    let status = registry
        .get(&project.status_code)
        .map(|r| r.name.as_str())
        .unwrap_or("?");
    format!(
        "{:<4} {:<20} {} ({})",
        project.id, project.name, project.status_code, status
    )
}

/// Build a text summary of every status (retired included) and every project.
pub(crate) fn build_text_summary(registry: &StatusRegistry) -> Result<TextSummary> {
    let mut lines = Vec::new();

    lines.push(format!(
        "Statuses: {} active / {} total",
        registry.active_count(),
        registry.records().len()
    ));
    lines.push(format!("{:<8} {:<20} {}", "Code", "Name", "Retired"));
    for record in registry.records() {
        lines.push(status_line(record)?);
    }

    lines.push(String::new());
    lines.push(format!("Projects: {}", registry.projects().len()));
    for project in registry.projects() {
        lines.push(project_line(project, registry));
    }

    Ok(TextSummary { lines })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::model::StatusCode;
    use time::macros::datetime;

    #[test]
    fn summary_lists_statuses_and_projects() {
        let mut registry =
            StatusRegistry::seeded(Box::new(FixedClock(datetime!(2024-05-10 09:00 UTC))));
        registry.retire(&StatusCode::from("EST004")).unwrap();

        let summary = build_text_summary(&registry).unwrap();
        assert_eq!(summary.lines[0], "Statuses: 4 active / 5 total");
        assert!(summary
            .lines
            .iter()
            .any(|l| l.starts_with("EST004") && l.ends_with("2024-05-10")));
        assert!(summary
            .lines
            .iter()
            .any(|l| l.starts_with("EST001") && l.ends_with('-')));
        assert!(summary
            .lines
            .iter()
            .any(|l| l.contains("Proyecto Alpha") && l.ends_with("EST001 (Creado)")));
    }
}
