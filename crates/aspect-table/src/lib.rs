pub mod error;
pub mod normalize;
pub mod store;
pub mod urn;

pub use error::{Result, TableError};
pub use normalize::normalize_cell;
pub use store::RowStore;
pub use urn::{URN_PREFIX, new_urn};
