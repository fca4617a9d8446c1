//! Data rows below a header block, keyed by leaf column identity.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::config::TableConfig;
use crate::error::Result;
use crate::header::{build_header, HeaderOptions};
use crate::range::AddressRange;
use crate::types::{CellValue, HeaderTree, Sheet, Workbook};

/// One record of table data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataRow {
    /// 1-based sheet row number the record was read from.
    pub key: String,
    /// Cell values by leaf identity. Blank cells are absent.
    pub values: BTreeMap<String, CellValue>,
}

/// A header tree together with the data read beneath it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTable {
    pub sheet_name: String,
    pub columns: HeaderTree,
    pub data: Vec<DataRow>,
}

impl ParsedTable {
    /// Resolve `config` against `workbook`, build its header and read the rows.
    ///
    /// # Errors
    /// `InvalidAddress`/`InvalidRange` from the corners, `SheetNotFound`,
    /// or `MalformedMergeRegion` from the build.
    pub fn build(workbook: &Workbook, config: &TableConfig, options: &HeaderOptions) -> Result<Self> {
        let range = config.range()?;
        let sheet = workbook.sheet(&config.sheet)?;
        let columns = build_header(sheet, &range, options)?;
        let data = extract_rows(sheet, &columns, &range);
        debug!(
            sheet = %sheet.name,
            range = %range,
            columns = columns.node_count(),
            rows = data.len(),
            "parsed table"
        );
        Ok(Self {
            sheet_name: sheet.name.clone(),
            columns,
            data,
        })
    }
}

/// Read the rows between the bottom of the header block and `range.end_row`.
///
/// Each leaf reads the cell in the first column of its span. Rows where no
/// leaf finds a value are skipped.
pub fn extract_rows(sheet: &Sheet, tree: &HeaderTree, range: &AddressRange) -> Vec<DataRow> {
    let Some(first_row) = tree.last_header_row().and_then(|row| row.checked_add(1)) else {
        return Vec::new();
    };
    let leaves = tree.leaves();

    let mut rows = Vec::new();
    for row in first_row..=range.end_row {
        let values: BTreeMap<String, CellValue> = leaves
            .iter()
            .filter_map(|leaf| {
                let value = sheet.cell_at(row, leaf.span.start_col)?;
                (!value.is_empty_text()).then(|| (leaf.identity.clone(), value.clone()))
            })
            .collect();
        if values.is_empty() {
            continue;
        }
        rows.push(DataRow {
            key: (u64::from(row) + 1).to_string(),
            values,
        });
    }
    rows
}
