//! XLSX loader
//!
//! Reads the parts of an XLSX package that header parsing needs: the sheet
//! list, shared strings, cell values and merge regions. Styling, drawings
//! and everything else in the package is ignored.

mod relationships;
mod worksheet;

use std::io::Cursor;
use tracing::{debug, warn};
use zip::ZipArchive;

use crate::error::{Result, XlcolumnsError};
use crate::types::Workbook;

use relationships::{get_sheet_info, parse_shared_strings, parse_workbook_relationships};
use worksheet::parse_sheet;

/// Parse an XLSX file from bytes.
///
/// # Errors
/// [`XlcolumnsError::Zip`] when the bytes are not a ZIP archive,
/// [`XlcolumnsError::Parse`] when the package has no workbook part,
/// [`XlcolumnsError::Xml`] for malformed sheet XML.
pub fn parse(data: &[u8]) -> Result<Workbook> {
    let mut archive = ZipArchive::new(Cursor::new(data))?;

    // Relationships first, so parts are found at their actual paths
    let relationships = parse_workbook_relationships(&mut archive);
    let shared_strings =
        parse_shared_strings(&mut archive, relationships.shared_strings.as_deref());
    let sheet_info = get_sheet_info(&mut archive, &relationships.worksheets)?;

    let mut sheets = Vec::with_capacity(sheet_info.len());
    for info in &sheet_info {
        match parse_sheet(&mut archive, info, &shared_strings) {
            Ok(sheet) => sheets.push(sheet),
            // A sheet listed in workbook.xml whose part is absent is skipped;
            // the remaining tabs are still usable.
            Err(XlcolumnsError::Zip(zip::result::ZipError::FileNotFound)) => {
                warn!(sheet = %info.name, path = %info.path, "worksheet part missing");
            }
            Err(e) => return Err(e),
        }
    }

    debug!(
        sheets = sheets.len(),
        shared_strings = shared_strings.len(),
        "loaded workbook"
    );
    Ok(Workbook::new(sheets))
}
