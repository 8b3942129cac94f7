//! The row store of one table-editing session.
//!
//! Owned by the session and passed by reference to the front end; there is no
//! ambient counter. The store is re-created (or `reset`) whenever the active
//! submodel changes.

use std::collections::BTreeSet;

use tracing::debug;

use aspect_model::{ColumnSet, Row, RowId, URN_FIELD};

use crate::error::{Result, TableError};
use crate::normalize::normalize_cell;
use crate::urn::new_urn;

/// Working set of table rows with an identity counter and a selection set.
#[derive(Debug, Clone)]
pub struct RowStore {
    columns: ColumnSet,
    rows: Vec<Row>,
    next_id: u64,
    selection: BTreeSet<RowId>,
}

impl RowStore {
    /// Start an empty session over a derived column set.
    pub fn new(columns: ColumnSet) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            next_id: 0,
            selection: BTreeSet::new(),
        }
    }

    /// Start a session over pre-existing rows, e.g. a rows file. The id
    /// counter resumes above the highest loaded id so ids are never reused.
    ///
    /// # Errors
    ///
    /// `TableError::DuplicateRowId` when two rows share an id.
    pub fn from_rows(columns: ColumnSet, rows: Vec<Row>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        let mut next_id = 0;
        for row in &rows {
            if !seen.insert(row.id()) {
                return Err(TableError::DuplicateRowId(row.id()));
            }
            next_id = next_id.max(row.id().as_u64());
        }
        Ok(Self {
            columns,
            rows,
            next_id,
            selection: BTreeSet::new(),
        })
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn selection(&self) -> &BTreeSet<RowId> {
        &self.selection
    }

    fn row_mut(&mut self, id: RowId) -> Result<&mut Row> {
        self.rows
            .iter_mut()
            .find(|row| row.id() == id)
            .ok_or(TableError::RowNotFound(id))
    }

    /// Append `count` empty rows seeded from the template, ids
    /// `next_id+1 ..= next_id+count`.
    ///
    /// # Errors
    ///
    /// `TableError::InvalidRowCount` for `count == 0`; no mutation occurs.
    pub fn add_rows(&mut self, count: u64) -> Result<&[Row]> {
        if count < 1 {
            return Err(TableError::InvalidRowCount);
        }
        let template = self.columns.template_row().clone();
        let first = self.rows.len();
        for offset in 1..=count {
            let id = RowId::new(self.next_id + offset);
            self.rows.push(Row::from_template(id, &template));
        }
        self.next_id += count;
        debug!(count, next_id = self.next_id, "added rows");
        Ok(&self.rows[first..])
    }

    /// Remove every row whose id is in the current selection, preserving the
    /// order of survivors. Selected ids that match no row are ignored; the
    /// matched ids are dropped from the selection.
    pub fn delete_selected(&mut self) {
        let matched: BTreeSet<RowId> = self
            .rows
            .iter()
            .map(Row::id)
            .filter(|id| self.selection.contains(id))
            .collect();
        self.rows.retain(|row| !matched.contains(&row.id()));
        self.selection.retain(|id| !matched.contains(id));
        debug!(removed = matched.len(), "deleted selected rows");
    }

    /// Normalize and store a single cell edit.
    ///
    /// # Errors
    ///
    /// `TableError::RowNotFound` for an unknown row id;
    /// `ModelError::UnknownField` (via `TableError::Model`) for a field
    /// outside the schema-derived set.
    pub fn set_cell(&mut self, id: RowId, field: &str, value: &str) -> Result<()> {
        let normalized = normalize_cell(field, value);
        let row = self.row_mut(id)?;
        row.set(field, normalized)?;
        Ok(())
    }

    /// Replace the selection wholesale. Ids without a matching row are
    /// tolerated and simply match nothing later.
    pub fn set_selection(&mut self, ids: impl IntoIterator<Item = RowId>) {
        self.selection = ids.into_iter().collect();
    }

    /// Assign a freshly generated URN into the row's identifier field.
    ///
    /// # Errors
    ///
    /// `TableError::RowNotFound` for an unknown row id.
    pub fn generate_identifier_for(&mut self, id: RowId) -> Result<&str> {
        let urn = new_urn();
        let row = self.row_mut(id)?;
        row.set(URN_FIELD, urn)?;
        Ok(row.urn())
    }

    /// Rows filtered to the current selection, in row order.
    pub fn selected_rows(&self) -> Vec<&Row> {
        self.rows
            .iter()
            .filter(|row| self.selection.contains(&row.id()))
            .collect()
    }

    /// Drop all rows and the selection and restart the id counter; used when
    /// the active submodel changes.
    pub fn reset(&mut self, columns: ColumnSet) {
        self.columns = columns;
        self.rows.clear();
        self.selection.clear();
        self.next_id = 0;
        debug!("row store reset");
    }
}
