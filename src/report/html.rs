use super::ReportTable;

const TABLE_HEADERS: &[&str] = &[
    "Item",
    "Description",
    "Action",
    "Field",
    "Due date",
    "Days left",
    "Responsible",
];

/// Render the table as a self-contained HTML document suitable for an email
/// body. All cell values pass through `escape`; the structure is fixed, so
/// nothing user-controlled reaches the markup unescaped.
pub fn html_body(table: &ReportTable) -> String {
    let mut body = String::with_capacity(1024 + table.rows.len() * 256);

    body.push_str(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n<style>\n\
         body { font-family: Arial, sans-serif; margin: 20px; background-color: #f4f4f9; }\n\
         table { width: 100%; border-collapse: collapse; margin-top: 20px; }\n\
         table, th, td { border: 1px solid #ccc; }\n\
         th, td { padding: 10px; text-align: center; }\n\
         th { background-color: #005860; color: white; }\n\
         tr:nth-child(even) { background-color: #f2f2f2; }\n\
         </style>\n</head>\n<body>\n",
    );

    body.push_str(&format!("<h1>{}</h1>\n", escape(&table.title)));
    body.push_str(&format!("<p>{}</p>\n", escape(&table.intro)));

    body.push_str("<table>\n<thead>\n<tr>");
    for header in TABLE_HEADERS {
        body.push_str(&format!("<th>{}</th>", header));
    }
    body.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in &table.rows {
        let cells = [
            &row.id,
            &row.description,
            &row.action,
            &row.field,
            &row.date,
            &row.days_remaining,
            &row.responsible,
        ];
        body.push_str("<tr>");
        for cell in cells {
            body.push_str(&format!("<td>{}</td>", escape(cell)));
        }
        body.push_str("</tr>\n");
    }

    body.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    body
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::super::{render, ReportTable};
    use super::*;
    use crate::model::AlertEvent;
    use chrono::NaiveDate;

    fn table() -> ReportTable {
        let event = AlertEvent {
            id: Some("NC-001".into()),
            description: Some("cover < 5mm & rusty".into()),
            action: None,
            responsible: Some("alice".into()),
            field_name: "Prazo".into(),
            resolved_date: NaiveDate::from_ymd_opt(2024, 1, 16).unwrap(),
            days_remaining: 15,
        };
        render("Alerts", "Items due in 15 or 30 days:", &[event])
    }

    #[test]
    fn body_contains_rows_and_heading() {
        let html = html_body(&table());
        assert!(html.contains("<h1>Alerts</h1>"));
        assert!(html.contains("<td>NC-001</td>"));
        assert!(html.contains("<td>16/01/2024</td>"));
        assert!(html.contains("<td>15</td>"));
        assert!(html.contains("<td>N/A</td>"));
    }

    #[test]
    fn cell_values_are_escaped() {
        let html = html_body(&table());
        assert!(html.contains("cover &lt; 5mm &amp; rusty"));
        assert!(!html.contains("cover < 5mm"));
    }

    #[test]
    fn empty_run_renders_table_with_no_rows() {
        let empty = render("Alerts", "intro", &[]);
        let html = html_body(&empty);
        assert!(html.contains("<tbody>\n</tbody>"));
    }
}
