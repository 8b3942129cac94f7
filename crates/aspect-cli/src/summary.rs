use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};

use aspect_validate::{Severity, ValidationReport};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

/// Print a schema-structural validation report.
pub fn print_report(report: &ValidationReport) {
    if report.issues.is_empty() {
        println!("schema check: no issues");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec!["Severity", "Row", "Field", "Message"]);
    apply_table_style(&mut table);
    for issue in &report.issues {
        table.add_row(vec![
            match issue.severity {
                Severity::Error => "error".to_string(),
                Severity::Warning => "warning".to_string(),
            },
            issue.row.map(|id| id.to_string()).unwrap_or_default(),
            issue.field.clone().unwrap_or_default(),
            issue.message.clone(),
        ]);
    }
    println!("{table}");
    println!(
        "schema check: {} error(s), {} warning(s)",
        report.error_count(),
        report.warning_count()
    );
}
