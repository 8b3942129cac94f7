use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, warn};

use aspect_client::{PortalClient, SubmitError};
use aspect_model::{ColumnSet, Row, SubmodelDescription, derive_columns};
use aspect_table::RowStore;
use aspect_validate::{SchemaValidator, ValidationReport, invalid_rows};

use crate::cli::{AddRowsArgs, ColumnsArgs, SubmitArgs, SubmodelsArgs, ValidateArgs};
use crate::summary::{apply_table_style, print_report};

fn load_description(path: &Path) -> Result<SubmodelDescription> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read submodel description {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("parse submodel description {}", path.display()))
}

fn load_columns(path: &Path) -> Result<ColumnSet> {
    let description = load_description(path)?;
    derive_columns(&description).context("derive columns")
}

fn load_rows(path: &Path) -> Result<Vec<Row>> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("read rows file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse rows file {}", path.display()))
}

fn write_rows(path: &Path, rows: &[Row]) -> Result<()> {
    let json = serde_json::to_string_pretty(rows).context("serialize rows")?;
    fs::write(path, json).with_context(|| format!("write rows file {}", path.display()))
}

pub fn run_columns(args: &ColumnsArgs) -> Result<()> {
    let columns = load_columns(&args.submodel)?;

    let mut table = Table::new();
    table.set_header(vec!["Field", "Header", "Kind", "Options"]);
    apply_table_style(&mut table);
    for column in columns.columns() {
        table.add_row(vec![
            column.field.clone(),
            column.header_name.clone(),
            column.kind.to_string(),
            column.options.join(", "),
        ]);
    }
    println!("{table}");
    Ok(())
}

/// Run both validators over a rows file. Returns whether submission would be
/// allowed (the business rule; the structural report is informational).
pub fn run_validate(args: &ValidateArgs) -> Result<bool> {
    let columns = load_columns(&args.submodel)?;
    let rows = load_rows(&args.rows)?;
    let store = RowStore::from_rows(columns, rows)?;

    let report: ValidationReport = SchemaValidator::new(store.columns()).validate(store.rows());
    print_report(&report);

    let invalid = invalid_rows(store.rows());
    if invalid.is_empty() {
        println!("{} row(s) pass the submission rule", store.rows().len());
        Ok(true)
    } else {
        let ids: Vec<String> = invalid.iter().map(ToString::to_string).collect();
        println!("submission would be blocked: invalid row(s) {}", ids.join(", "));
        Ok(false)
    }
}

pub fn run_add_rows(args: &AddRowsArgs) -> Result<()> {
    let columns = load_columns(&args.submodel)?;
    let rows = if args.rows.exists() {
        load_rows(&args.rows)?
    } else {
        Vec::new()
    };

    let mut store = RowStore::from_rows(columns, rows)?;
    let added: Vec<String> = store
        .add_rows(args.count)?
        .iter()
        .map(|row| row.id().to_string())
        .collect();
    write_rows(&args.rows, store.rows())?;

    info!(count = args.count, "rows appended");
    println!("added row(s) {} to {}", added.join(", "), args.rows.display());
    Ok(())
}

pub fn run_submit(args: &SubmitArgs) -> Result<bool> {
    let columns = load_columns(&args.submodel)?;
    let rows = load_rows(&args.rows)?;
    let store = RowStore::from_rows(columns, rows)?;

    if args.dry_run {
        let invalid = invalid_rows(store.rows());
        if invalid.is_empty() {
            println!("dry run: {} row(s) would be submitted", store.rows().len());
            return Ok(true);
        }
        let ids: Vec<String> = invalid.iter().map(ToString::to_string).collect();
        println!("dry run: submission blocked by row(s) {}", ids.join(", "));
        return Ok(false);
    }

    let client = PortalClient::new(args.base_url.clone())?;
    match client.submit(store.rows(), &args.path) {
        Ok(receipt) => {
            println!(
                "submitted {} row(s); backend answered {}",
                receipt.submitted, receipt.status
            );
            Ok(true)
        }
        Err(err) => {
            warn!(error = %err, "submission failed");
            eprintln!("{}", err.user_message());
            if err.is_retryable() {
                eprintln!("(the request may succeed on retry)");
            }
            if let SubmitError::InvalidRows { invalid } = &err {
                if !invalid.is_empty() {
                    let ids: Vec<String> = invalid.iter().map(ToString::to_string).collect();
                    eprintln!("invalid row(s): {}", ids.join(", "));
                }
            }
            Ok(false)
        }
    }
}

pub fn run_submodels(args: &SubmodelsArgs) -> Result<()> {
    let client = PortalClient::new(args.base_url.clone())?;
    let submodels = client.list_submodels().context("list submodels")?;

    let mut table = Table::new();
    table.set_header(vec!["Id", "Name"]);
    apply_table_style(&mut table);
    for submodel in submodels {
        table.add_row(vec![submodel.id, submodel.name]);
    }
    println!("{table}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::AddRowsArgs;
    use std::path::PathBuf;

    const SCHEMA: &str = r#"{
        "items": {
            "properties": {
                "part_instance_id": {"title": "Part Instance ID"},
                "manufacturing_date": {"title": "Manufacturing Date", "format": "date-time"}
            }
        }
    }"#;

    fn write_schema(dir: &Path) -> PathBuf {
        let path = dir.join("submodel.json");
        fs::write(&path, SCHEMA).unwrap();
        path
    }

    #[test]
    fn add_rows_creates_and_extends_a_rows_file() {
        let dir = tempfile::tempdir().unwrap();
        let submodel = write_schema(dir.path());
        let rows_path = dir.path().join("rows.json");

        let args = AddRowsArgs {
            submodel: submodel.clone(),
            rows: rows_path.clone(),
            count: 2,
        };
        run_add_rows(&args).unwrap();

        let rows = load_rows(&rows_path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].id().to_string(), "2");

        // a second run resumes the id counter from the file contents
        run_add_rows(&AddRowsArgs {
            submodel,
            rows: rows_path.clone(),
            count: 1,
        })
        .unwrap();
        let rows = load_rows(&rows_path).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].id().to_string(), "3");
    }

    #[test]
    fn validate_reports_the_submission_decision() {
        let dir = tempfile::tempdir().unwrap();
        let submodel = write_schema(dir.path());
        let rows_path = dir.path().join("rows.json");
        fs::write(
            &rows_path,
            r#"[{"id": 1, "part_instance_id": "", "manufacturing_date": "", "uuid": ""}]"#,
        )
        .unwrap();

        let allowed = run_validate(&ValidateArgs {
            submodel,
            rows: rows_path,
        })
        .unwrap();
        assert!(!allowed);
    }

    #[test]
    fn missing_schema_surfaces_as_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let submodel = dir.path().join("submodel.json");
        fs::write(&submodel, r#"{"items": {}}"#).unwrap();

        let err = run_columns(&ColumnsArgs { submodel }).unwrap_err();
        assert!(err.to_string().contains("derive columns"));
    }
}
