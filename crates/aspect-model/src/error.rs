use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// The submodel description was fetched but carries no `items.properties`.
    #[error("submodel description has no items.properties; columns cannot be derived")]
    MissingSchema,
    /// A reflected field access named a field outside the schema-derived set.
    #[error("unknown field: {0}")]
    UnknownField(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
