//! Document parsing and data structures module
//!
//! This module provides functionality for parsing Word (.docx) packages
//! and converting them into a structured representation.

pub(crate) mod io;
pub(crate) mod loader;
pub mod models;
pub(crate) mod parsing;
pub mod styles;

pub use io::DocumentError;
pub use loader::load_document;
pub use models::*;
pub use styles::{StyleCatalog, StyleDefinition};
