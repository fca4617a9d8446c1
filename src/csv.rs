//! Minimal CSV/TSV loader that produces a [`Workbook`] with a single sheet.
//!
//! Delimited text has no merge regions, so headers read from it are always
//! flat.

use serde::{Deserialize, Serialize};

use crate::error::{Result, XlcolumnsError};
use crate::types::{CellData, CellValue, Sheet, Workbook};

/// Field separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    fn as_char(self) -> char {
        match self {
            Self::Comma => ',',
            Self::Tab => '\t',
        }
    }

    /// Name given to the single sheet of a delimited workbook.
    pub fn sheet_name(self) -> &'static str {
        match self {
            Self::Comma => "CSV",
            Self::Tab => "TSV",
        }
    }

    /// Pick the delimiter for a file extension (`csv`, `tsv`, `tab`).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Comma),
            "tsv" | "tab" => Some(Self::Tab),
            _ => None,
        }
    }
}

/// Parse CSV/TSV bytes into a [`Workbook`] with one sheet.
///
/// Fields that parse as numbers become [`CellValue::Number`]; empty fields
/// are left blank.
///
/// # Errors
/// [`XlcolumnsError::Parse`] when the input has more rows or columns than a
/// sheet can address.
pub fn parse_delimited(data: &[u8], delim: Delimiter) -> Result<Workbook> {
    let text = String::from_utf8_lossy(data);
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

    let mut cells: Vec<CellData> = Vec::new();

    for (row_idx, line) in text.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        let row = u32::try_from(row_idx)
            .map_err(|_| XlcolumnsError::Parse(format!("row {row_idx} out of range")))?;
        for (col_idx, field) in split_csv_line(line, delim.as_char()).into_iter().enumerate() {
            let value = field.trim();
            if value.is_empty() {
                continue;
            }
            let col = u32::try_from(col_idx)
                .map_err(|_| XlcolumnsError::Parse(format!("column {col_idx} out of range")))?;

            // Try to detect numbers
            let v = match value.parse::<f64>() {
                Ok(n) if n.is_finite() => CellValue::Number(n),
                _ => CellValue::Text(value.to_string()),
            };
            cells.push(CellData { r: row, c: col, v });
        }
    }

    let sheet = Sheet::from_parts(delim.sheet_name(), cells, Vec::new());
    Ok(Workbook::new(vec![sheet]))
}

/// Split a CSV line respecting quoted fields.
fn split_csv_line(line: &str, sep: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    // Escaped quote
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
        } else if ch == '"' {
            in_quotes = true;
        } else if ch == sep {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp
)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_basic() {
        let data = b"Name,Age,City\nAlice,30,NYC\nBob,25,LA";
        let wb = parse_delimited(data, Delimiter::Comma).unwrap();
        assert_eq!(wb.sheet_names(), ["CSV"]);
        let sheet = &wb.sheets[0];
        assert_eq!(sheet.max_row, 3);
        assert_eq!(sheet.max_col, 3);
        assert_eq!(
            sheet.cell_at(1, 0),
            Some(&CellValue::Text("Alice".to_string()))
        );
        assert_eq!(sheet.cell_at(1, 1), Some(&CellValue::Number(30.0)));
    }

    #[test]
    fn test_parse_tsv() {
        let data = b"A\tB\n1\t2";
        let wb = parse_delimited(data, Delimiter::Tab).unwrap();
        assert_eq!(wb.sheets[0].name, "TSV");
        assert_eq!(wb.sheets[0].cells.len(), 4);
    }

    #[test]
    fn test_quoted_csv() {
        let data = b"\"Hello, World\",42\n\"She said \"\"hi\"\"\",0";
        let wb = parse_delimited(data, Delimiter::Comma).unwrap();
        let sheet = &wb.sheets[0];
        assert_eq!(
            sheet.cell_at(0, 0),
            Some(&CellValue::Text("Hello, World".to_string()))
        );
        assert_eq!(
            sheet.cell_at(1, 0),
            Some(&CellValue::Text("She said \"hi\"".to_string()))
        );
    }

    #[test]
    fn test_blank_fields_and_bom() {
        let data = "\u{feff}Name,,City".as_bytes();
        let wb = parse_delimited(data, Delimiter::Comma).unwrap();
        let sheet = &wb.sheets[0];
        assert_eq!(
            sheet.cell_at(0, 0),
            Some(&CellValue::Text("Name".to_string()))
        );
        assert_eq!(sheet.cell_at(0, 1), None);
        assert_eq!(sheet.cells.len(), 2);
    }

    #[test]
    fn test_empty_csv() {
        let wb = parse_delimited(b"", Delimiter::Comma).unwrap();
        assert_eq!(wb.sheets[0].cells.len(), 0);
    }

    #[test]
    fn test_delimiter_from_extension() {
        assert_eq!(Delimiter::from_extension("CSV"), Some(Delimiter::Comma));
        assert_eq!(Delimiter::from_extension("tsv"), Some(Delimiter::Tab));
        assert_eq!(Delimiter::from_extension("xlsx"), None);
    }
}
