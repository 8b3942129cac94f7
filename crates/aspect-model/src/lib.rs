pub mod column;
pub mod error;
pub mod row;
pub mod submodel;

pub use column::{ColumnDescriptor, ColumnSet, DataKind, derive_columns};
pub use error::{ModelError, Result};
pub use row::{Row, RowId, URN_FIELD};
pub use submodel::{OrderedProperties, PropertySpec, SchemaItems, SubmodelDescription, SubmodelSummary};
