//! Integration tests for xlcolumns.
//!
//! This module provides the test infrastructure for the loaders, the header
//! builder and the code generator. It includes:
//!
//! - `fixtures`: Builders for creating valid XLSX files in memory
//! - `common`: Assertion helpers and header-building utilities
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use crate::fixtures::{SheetBuilder, XlsxBuilder};
//! use crate::common::{header, parse_xlsx, titles};
//!
//! fn test_contact_group() {
//!     let xlsx = XlsxBuilder::new()
//!         .sheet(
//!             SheetBuilder::new("Sheet1")
//!                 .cell("A1", "Contact")
//!                 .row("A2", &["Phone", "Email"])
//!                 .merge("A1:B1"),
//!         )
//!         .build();
//!
//!     let workbook = parse_xlsx(&xlsx);
//!     let tree = header(&workbook, "Sheet1", "A1:B2");
//!     assert_eq!(titles(tree.roots()), ["Contact"]);
//! }
//! ```
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

pub mod fixtures;

// Re-export commonly used items at the top level
pub use common::{
    assert_cell_text, assert_identities_unique, assert_merge_exists, assert_renderers_match,
    assert_span_partition, header, header_with, identities, leaf_titles, parse_xlsx, titles,
};
pub use fixtures::{CellValue, SheetBuilder, XlsxBuilder};
