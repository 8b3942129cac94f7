pub mod client;
pub mod error;

pub use client::{DEFAULT_SUBMIT_PATH, PortalClient, SubmissionReceipt};
pub use error::{Result, SubmitError};
