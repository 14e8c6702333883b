// src/report/mod.rs

pub mod html;

use chrono::NaiveDate;

use crate::model::AlertEvent;

pub use html::html_body;

/// Shown wherever a record has no value for an optional column. Rendered
/// text, never an empty cell.
pub const MISSING_FIELD_PLACEHOLDER: &str = "N/A";

/// Presentation-ready form of one run's alerts: display strings only, in
/// the exact order the scan emitted them. Transports render this; nothing
/// here knows about markup or delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTable {
    pub title: String,
    pub intro: String,
    pub rows: Vec<ReportRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub id: String,
    pub description: String,
    pub action: String,
    pub field: String,
    /// DD/MM/YYYY, independent of locale.
    pub date: String,
    /// Signed integer text; negative means overdue.
    pub days_remaining: String,
    pub responsible: String,
}

/// Fixed display format for all dates in reports.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn render(title: &str, intro: &str, events: &[AlertEvent]) -> ReportTable {
    ReportTable {
        title: title.to_string(),
        intro: intro.to_string(),
        rows: events.iter().map(row_for).collect(),
    }
}

fn row_for(event: &AlertEvent) -> ReportRow {
    ReportRow {
        id: display(&event.id),
        description: display(&event.description),
        action: display(&event.action),
        field: event.field_name.clone(),
        date: format_date(event.resolved_date),
        days_remaining: event.days_remaining.to_string(),
        responsible: display(&event.responsible),
    }
}

fn display(value: &Option<String>) -> String {
    match value {
        Some(s) if !s.is_empty() => s.clone(),
        _ => MISSING_FIELD_PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(days: i64) -> AlertEvent {
        AlertEvent {
            id: Some("NC-001".into()),
            description: Some("loose guard rail".into()),
            action: None,
            responsible: Some("alice".into()),
            field_name: "Prazo".into(),
            resolved_date: NaiveDate::from_ymd_opt(2024, 1, 16).unwrap(),
            days_remaining: days,
        }
    }

    #[test]
    fn dates_render_day_first_zero_padded() {
        assert_eq!(
            format_date(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()),
            "05/03/2024"
        );
    }

    #[test]
    fn missing_fields_render_placeholder_not_empty() {
        let table = render("t", "i", &[event(15)]);
        assert_eq!(table.rows[0].action, "N/A");
        assert_eq!(table.rows[0].id, "NC-001");
    }

    #[test]
    fn negative_offsets_keep_their_sign() {
        let table = render("t", "i", &[event(-4)]);
        assert_eq!(table.rows[0].days_remaining, "-4");
    }

    #[test]
    fn rows_preserve_event_order() {
        let mut late = event(30);
        late.id = Some("NC-002".into());
        let table = render("t", "i", &[event(15), late]);
        let ids: Vec<&str> = table.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["NC-001", "NC-002"]);
    }
}
