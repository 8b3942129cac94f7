//! Schema-structural validation of rows against the derived column set.
//!
//! Generic over whatever the submodel schema declared; emptiness is not a
//! structural concern (that is the business rule's job in [`crate::rules`]).

use chrono::NaiveDateTime;
use tracing::debug;

use aspect_model::{ColumnSet, DataKind, Row, URN_FIELD};
use aspect_table::{RowStore, URN_PREFIX};

use crate::report::{Issue, Severity, ValidationReport};

/// Structural validator for one derived column set.
pub struct SchemaValidator<'a> {
    columns: &'a ColumnSet,
}

impl<'a> SchemaValidator<'a> {
    pub fn new(columns: &'a ColumnSet) -> Self {
        Self { columns }
    }

    /// Validate a set of rows; one issue per offending cell.
    pub fn validate<R: std::borrow::Borrow<Row>>(&self, rows: &[R]) -> ValidationReport {
        let mut report = ValidationReport::default();
        for row in rows {
            self.check_row(row.borrow(), &mut report);
        }
        debug!(
            errors = report.error_count(),
            warnings = report.warning_count(),
            "schema validation finished"
        );
        report
    }

    fn check_row(&self, row: &Row, report: &mut ValidationReport) {
        for (field, value) in row.fields() {
            let Some(column) = self.columns.column(field) else {
                // the identifier field exists on every row whether or not the
                // schema lists it
                if field == URN_FIELD {
                    self.check_urn(row, value, report);
                    continue;
                }
                report.issues.push(Issue {
                    severity: Severity::Error,
                    row: Some(row.id()),
                    field: Some(field.to_string()),
                    message: format!("field {field} is not part of the submodel schema"),
                });
                continue;
            };
            if value.is_empty() {
                continue;
            }
            match column.kind {
                DataKind::SingleSelect => {
                    if !column.options.iter().any(|option| option == value) {
                        report.issues.push(Issue {
                            severity: Severity::Error,
                            row: Some(row.id()),
                            field: Some(field.to_string()),
                            message: format!(
                                "value {value:?} is not one of the allowed options for {field}"
                            ),
                        });
                    }
                }
                DataKind::DateTime => {
                    if !is_valid_date_time(value) {
                        report.issues.push(Issue {
                            severity: Severity::Error,
                            row: Some(row.id()),
                            field: Some(field.to_string()),
                            message: format!("value {value:?} of {field} is not a date-time"),
                        });
                    }
                }
                DataKind::Text => {}
            }
            if field == URN_FIELD {
                self.check_urn(row, value, report);
            }
        }
    }

    fn check_urn(&self, row: &Row, value: &str, report: &mut ValidationReport) {
        if !value.is_empty() && !value.starts_with(URN_PREFIX) {
            report.issues.push(Issue {
                severity: Severity::Warning,
                row: Some(row.id()),
                field: Some(URN_FIELD.to_string()),
                message: format!("identifier {value:?} is not URN-formatted"),
            });
        }
    }
}

/// `date-time` cells accept RFC 3339 or a bare `YYYY-MM-DDTHH:MM:SS`.
fn is_valid_date_time(value: &str) -> bool {
    chrono::DateTime::parse_from_rfc3339(value).is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").is_ok()
}

/// Structural check of the rows currently selected in the store.
pub fn validate_selected(store: &RowStore) -> ValidationReport {
    let selected = store.selected_rows();
    SchemaValidator::new(store.columns()).validate(&selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_time_formats() {
        assert!(is_valid_date_time("2022-02-04T14:48:54"));
        assert!(is_valid_date_time("2022-02-04T14:48:54Z"));
        assert!(is_valid_date_time("2022-02-04T14:48:54+01:00"));
        assert!(!is_valid_date_time("2022-02-04"));
        assert!(!is_valid_date_time("04.02.2022"));
        assert!(!is_valid_date_time("not a date"));
    }
}
