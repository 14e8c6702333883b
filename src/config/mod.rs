// src/config/mod.rs

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

use crate::scan::thresholds::AlertDaysSet;

/// One monitored sheet, as written in the YAML config file. The three
/// sheets this grew from were copy-pasted blocks differing only in data, so
/// the whole variation lives here and none of it in code.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    /// Exact name of the sheet to monitor.
    pub sheet: String,
    /// First data row, 1-based against the source; rows above are headers.
    pub start_row: usize,
    /// Lead times in days, e.g. [15, 30].
    pub alert_days: Vec<i64>,
    pub email: EmailConfig,
    #[serde(default)]
    pub columns: IdentityColumns,
    pub date_fields: Vec<DateFieldConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    pub subject: String,
    /// Heading shown inside the message body.
    pub title: String,
    pub to: Vec<String>,
    #[serde(default)]
    pub bcc: Vec<String>,
    /// Webhook URL the rendered message is posted to. Absent means dry run.
    #[serde(default)]
    pub endpoint: Option<String>,
}

/// 0-based column positions of the identity fields. Any of them may be
/// absent for a sheet that simply does not carry that column.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdentityColumns {
    pub id: Option<usize>,
    pub description: Option<usize>,
    pub action: Option<usize>,
    pub responsible: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DateFieldConfig {
    /// Label shown in the report, e.g. "Prazo ação".
    pub name: String,
    /// 0-based column holding the date.
    pub column: usize,
    #[serde(default)]
    pub completed: Option<CompletedConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletedConfig {
    /// 0-based column holding the completion marker.
    pub column: usize,
    /// Sentinel meaning "done"; compared trimmed and case-insensitively.
    pub value: String,
}

impl MonitorConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_yaml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn alert_days_set(&self) -> Result<AlertDaysSet> {
        AlertDaysSet::new(self.alert_days.iter().copied())
    }

    /// Engine-facing shape of the monitored records.
    pub fn shape(&self) -> RecordShapeSpec {
        RecordShapeSpec {
            id_column: self.columns.id,
            description_column: self.columns.description,
            action_column: self.columns.action,
            responsible_column: self.columns.responsible,
            date_fields: self
                .date_fields
                .iter()
                .map(|f| FieldMonitorSpec {
                    name: f.name.clone(),
                    source_column: f.column,
                    completion_check: f.completed.as_ref().map(|c| CompletionCheck {
                        marker_column: c.column,
                        marker_value: c.value.clone(),
                    }),
                })
                .collect(),
            start_row: self.start_row,
        }
    }
}

/// Declarative description of one date field to watch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMonitorSpec {
    pub name: String,
    pub source_column: usize,
    pub completion_check: Option<CompletionCheck>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionCheck {
    pub marker_column: usize,
    pub marker_value: String,
}

/// Which columns of a record mean what, plus the fields to monitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordShapeSpec {
    pub id_column: Option<usize>,
    pub description_column: Option<usize>,
    pub action_column: Option<usize>,
    pub responsible_column: Option<usize>,
    pub date_fields: Vec<FieldMonitorSpec>,
    /// First data row, 1-based and inclusive.
    pub start_row: usize,
}

impl RecordShapeSpec {
    /// Check the shape against the source's actual width before scanning.
    /// A column pointing outside the sheet would silently read as empty on
    /// every row, which is exactly the kind of wrong-but-quiet run this
    /// refuses to start.
    pub fn validate(&self, column_count: usize) -> Result<()> {
        if self.start_row == 0 {
            bail!("start_row is 1-based; 0 is not a valid first data row");
        }
        if self.date_fields.is_empty() {
            bail!("no date fields configured; nothing to monitor");
        }

        let identity = [
            ("id", self.id_column),
            ("description", self.description_column),
            ("action", self.action_column),
            ("responsible", self.responsible_column),
        ];
        for (label, column) in identity {
            if let Some(c) = column {
                check_bounds(label, c, column_count)?;
            }
        }

        for field in &self.date_fields {
            check_bounds(&field.name, field.source_column, column_count)?;
            if let Some(check) = &field.completion_check {
                check_bounds(&field.name, check.marker_column, column_count)?;
                if check.marker_value.trim().is_empty() {
                    bail!(
                        "date field '{}' has a blank completion marker value; \
                         it would suppress on every empty cell",
                        field.name
                    );
                }
            }
        }
        Ok(())
    }
}

fn check_bounds(label: &str, column: usize, column_count: usize) -> Result<()> {
    if column >= column_count {
        bail!(
            "column {} for '{}' is outside the source (widest row has {} columns)",
            column,
            label,
            column_count
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
sheet: "AE - Não Conformidades"
start_row: 5
alert_days: [15, 30]
email:
  subject: "Itens vencendo em 30 ou 15 dias"
  title: "Alerta de Não Conformidades"
  to: ["qualidade@exemplo.com"]
columns:
  id: 0
  description: 1
  action: 10
  responsible: 13
date_fields:
  - name: "Prazo ação"
    column: 11
  - name: "Abrangência"
    column: 14
    completed:
      column: 15
      value: "X"
"#;

    fn sample() -> MonitorConfig {
        serde_yaml::from_str(SAMPLE).unwrap()
    }

    #[test]
    fn yaml_round_trips_into_shape() {
        let config = sample();
        assert_eq!(config.sheet, "AE - Não Conformidades");
        assert_eq!(config.email.bcc, Vec::<String>::new());
        assert!(config.email.endpoint.is_none());

        let shape = config.shape();
        assert_eq!(shape.start_row, 5);
        assert_eq!(shape.id_column, Some(0));
        assert_eq!(shape.date_fields.len(), 2);
        assert_eq!(shape.date_fields[0].completion_check, None);
        assert_eq!(
            shape.date_fields[1].completion_check,
            Some(CompletionCheck {
                marker_column: 15,
                marker_value: "X".into(),
            })
        );
    }

    #[test]
    fn wide_enough_source_validates() {
        assert!(sample().shape().validate(16).is_ok());
    }

    #[test]
    fn out_of_bounds_column_fails_fast() {
        let err = sample().shape().validate(14).unwrap_err().to_string();
        assert!(err.contains("Abrangência"), "got: {err}");
    }

    #[test]
    fn blank_marker_value_fails_fast() {
        let mut config = sample();
        config.date_fields[1].completed = Some(CompletedConfig {
            column: 15,
            value: "  ".into(),
        });
        assert!(config.shape().validate(16).is_err());
    }

    #[test]
    fn zero_start_row_fails_fast() {
        let mut config = sample();
        config.start_row = 0;
        assert!(config.shape().validate(16).is_err());
    }

    #[test]
    fn no_date_fields_fails_fast() {
        let mut config = sample();
        config.date_fields.clear();
        assert!(config.shape().validate(16).is_err());
    }

    #[test]
    fn negative_alert_day_fails_fast() {
        let mut config = sample();
        config.alert_days.push(-7);
        assert!(config.alert_days_set().is_err());
    }
}
