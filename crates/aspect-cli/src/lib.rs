//! CLI library components for the submodel table editor.

pub mod logging;
