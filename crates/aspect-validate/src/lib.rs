//! Row validation for the dynamic table.
//!
//! Two independent validators coexist on purpose: a cheap fixed business rule
//! that gates submission ([`rules`]) and a generic schema-structural check
//! used elsewhere in the table UI ([`schema`]). They serve different call
//! sites and are never merged.

pub mod report;
pub mod rules;
pub mod schema;

pub use report::{Issue, Severity, ValidationReport};
pub use rules::{INVALID_DATA_MESSAGE, MANDATORY_FIELDS, invalid_rows, validate_row};
pub use schema::{SchemaValidator, validate_selected};
