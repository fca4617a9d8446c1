use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{CellData, CellValue, MergeRange};
use crate::cell_ref::{decode_address, parse_cell_range};
use crate::error::{Result, XlcolumnsError};

/// A loaded workbook: an ordered list of sheets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    /// Look up a sheet by its tab name.
    ///
    /// # Errors
    /// Returns [`XlcolumnsError::SheetNotFound`] when no sheet has that name.
    pub fn sheet(&self, name: &str) -> Result<&Sheet> {
        self.sheets
            .iter()
            .find(|sheet| sheet.name == name)
            .ok_or_else(|| XlcolumnsError::SheetNotFound(name.to_string()))
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|sheet| sheet.name.as_str()).collect()
    }
}

/// A single worksheet: sparse cells plus merge regions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sheet {
    pub name: String,
    /// Sparse representation: Vec of (row, col, value)
    pub cells: Vec<CellData>,
    /// Row index for fast cell lookup (not serialized). Each row's indices
    /// are kept sorted by column.
    #[serde(skip)]
    pub(crate) cells_by_row: BTreeMap<u32, Vec<usize>>,
    pub merges: Vec<MergeRange>,
    /// One past the last populated row.
    pub max_row: u32,
    /// One past the last populated column.
    pub max_col: u32,
}

impl Sheet {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Build a sheet from already collected cells and merges.
    pub fn from_parts(name: &str, cells: Vec<CellData>, merges: Vec<MergeRange>) -> Self {
        let mut sheet = Self {
            name: name.to_string(),
            cells,
            merges,
            ..Self::default()
        };
        for cell in &sheet.cells {
            sheet.max_row = sheet.max_row.max(cell.r.saturating_add(1));
            sheet.max_col = sheet.max_col.max(cell.c.saturating_add(1));
        }
        sheet.rebuild_cell_index();
        sheet
    }

    /// Set (or replace) the value at `(row, col)`.
    pub fn set_cell(&mut self, row: u32, col: u32, value: impl Into<CellValue>) {
        let value = value.into();
        if let Some(idx) = self.cell_index_at(row, col) {
            if let Some(cell) = self.cells.get_mut(idx) {
                cell.v = value;
            }
            return;
        }

        // a deserialized sheet has cells but no index yet
        let stale = self.cells_by_row.is_empty() && !self.cells.is_empty();
        let idx = self.cells.len();
        self.cells.push(CellData {
            r: row,
            c: col,
            v: value,
        });
        self.max_row = self.max_row.max(row.saturating_add(1));
        self.max_col = self.max_col.max(col.saturating_add(1));
        if stale {
            self.rebuild_cell_index();
        } else {
            self.index_cell(idx);
        }
    }

    /// Set a value by address ("B2").
    ///
    /// # Errors
    /// Returns [`XlcolumnsError::InvalidAddress`] for a malformed address.
    pub fn set(&mut self, address: &str, value: impl Into<CellValue>) -> Result<()> {
        let (row, col) = decode_address(address)?;
        self.set_cell(row, col, value);
        Ok(())
    }

    pub fn add_merge(&mut self, merge: MergeRange) {
        self.merges.push(merge);
    }

    /// Add a merge by range reference ("A1:B1").
    ///
    /// # Errors
    /// Returns [`XlcolumnsError::InvalidAddress`] when the reference does not parse.
    pub fn merge(&mut self, range: &str) -> Result<()> {
        let (start_row, start_col, end_row, end_col) = parse_cell_range(range)
            .ok_or_else(|| XlcolumnsError::InvalidAddress(range.to_string()))?;
        self.add_merge(MergeRange::new(start_row, start_col, end_row, end_col));
        Ok(())
    }

    /// Value at `(row, col)`, if the cell is populated.
    pub fn cell_at(&self, row: u32, col: u32) -> Option<&CellValue> {
        let idx = self.cell_index_at(row, col)?;
        self.cells.get(idx).map(|cell| &cell.v)
    }

    pub(crate) fn rebuild_cell_index(&mut self) {
        self.cells_by_row = BTreeMap::new();
        for idx in 0..self.cells.len() {
            self.index_cell(idx);
        }
    }

    fn index_cell(&mut self, idx: usize) {
        let Some(cell) = self.cells.get(idx) else {
            return;
        };
        let col = cell.c;
        let cells = &self.cells;
        let row_cells = self.cells_by_row.entry(cell.r).or_default();
        let pos = row_cells.partition_point(|&i| cells.get(i).is_some_and(|c| c.c < col));
        row_cells.insert(pos, idx);
    }

    fn cell_index_at(&self, row: u32, col: u32) -> Option<usize> {
        if self.cells_by_row.is_empty() {
            return self.cells.iter().position(|c| c.r == row && c.c == col);
        }
        let row_cells = self.cells_by_row.get(&row)?;
        let pos = row_cells
            .partition_point(|&i| self.cells.get(i).map(|cell| cell.c < col).unwrap_or(false));
        let idx = row_cells.get(pos).copied()?;
        self.cells
            .get(idx)
            .is_some_and(|cell| cell.c == col)
            .then_some(idx)
    }
}
