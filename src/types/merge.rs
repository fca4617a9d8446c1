use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cell_ref::encode_address;

/// A rectangular block of merged cells, all bounds inclusive and 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeRange {
    pub start_row: u32,
    pub start_col: u32,
    pub end_row: u32,
    pub end_col: u32,
}

impl MergeRange {
    pub fn new(start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> Self {
        Self {
            start_row,
            start_col,
            end_row,
            end_col,
        }
    }

    /// Whether `(row, col)` lies inside the block.
    pub fn contains(&self, row: u32, col: u32) -> bool {
        (self.start_row..=self.end_row).contains(&row)
            && (self.start_col..=self.end_col).contains(&col)
    }

    /// Whether the block spans more than one column.
    pub fn spans_columns(&self) -> bool {
        self.end_col > self.start_col
    }

    pub fn is_well_formed(&self) -> bool {
        self.start_row <= self.end_row && self.start_col <= self.end_col
    }
}

impl fmt::Display for MergeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            encode_address(self.start_row, self.start_col),
            encode_address(self.end_row, self.end_col)
        )
    }
}
