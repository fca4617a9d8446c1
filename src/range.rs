//! Resolution of a start/end address pair into an inclusive rectangle.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cell_ref::{decode_address, encode_address};
use crate::error::{Result, XlcolumnsError};

/// Inclusive rectangle of cells, 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressRange {
    pub start_col: u32,
    pub start_row: u32,
    pub end_col: u32,
    pub end_row: u32,
}

impl AddressRange {
    /// Parse the `"A1:C3"` form.
    ///
    /// # Errors
    /// Same as [`resolve_range`]; a missing `:` is an `InvalidAddress`.
    pub fn parse(range: &str) -> Result<Self> {
        let (start, end) = range
            .split_once(':')
            .ok_or_else(|| XlcolumnsError::InvalidAddress(range.to_string()))?;
        resolve_range(start, end)
    }

    /// Number of columns in the range. A reversed range built by hand counts
    /// as one column.
    pub fn width(&self) -> u32 {
        self.end_col.saturating_sub(self.start_col).saturating_add(1)
    }
}

impl fmt::Display for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            encode_address(self.start_row, self.start_col),
            encode_address(self.end_row, self.end_col)
        )
    }
}

/// Decode both endpoints and return the inclusive bound.
///
/// The range is not checked against the sheet's populated extent; cells
/// outside it simply read as blank.
///
/// # Errors
/// [`XlcolumnsError::InvalidAddress`] if either endpoint fails to decode,
/// [`XlcolumnsError::InvalidRange`] if the end precedes the start on either axis.
pub fn resolve_range(start: &str, end: &str) -> Result<AddressRange> {
    let (start_row, start_col) = decode_address(start)?;
    let (end_row, end_col) = decode_address(end)?;

    if end_row < start_row || end_col < start_col {
        return Err(XlcolumnsError::InvalidRange {
            start: start.trim().to_string(),
            end: end.trim().to_string(),
        });
    }

    Ok(AddressRange {
        start_col,
        start_row,
        end_col,
        end_row,
    })
}
