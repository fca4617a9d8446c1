//! Utilities for converting between Excel-style cell addresses and
//! zero-based `(row, col)` positions.
//!
//! Every function in this module returns positions as `(row, col)`.

use crate::error::{Result, XlcolumnsError};

/// Rows on a worksheet.
pub const MAX_ROWS: u32 = 1_048_576;
/// Columns on a worksheet (A..XFD).
pub const MAX_COLS: u32 = 16_384;

/// Decode a column letter run ("A", "AB", "xfd") into a 0-indexed column.
///
/// Letters are a bijective base-26 numeral: A=0, Z=25, AA=26.
/// Returns `None` for an empty run, a non-letter, or overflow.
pub fn decode_col(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }
    let mut col: u32 = 0;
    for b in letters.bytes() {
        if !b.is_ascii_alphabetic() {
            return None;
        }
        let digit = u32::from(b.to_ascii_uppercase() - b'A') + 1;
        col = col.checked_mul(26)?.checked_add(digit)?;
    }
    Some(col - 1)
}

/// Encode a 0-indexed column as letters (0 -> "A", 26 -> "AA").
pub fn encode_col(col: u32) -> String {
    let mut letters = Vec::new();
    let mut n = u64::from(col) + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        // rem < 26, always fits a letter
        #[allow(clippy::cast_possible_truncation)]
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Decode an address like "M5" or "$B$12" into `(row, col)`.
///
/// The address must be a letter run followed by a digit run (each optionally
/// prefixed by `$`); the row number is 1-based in the address.
///
/// # Errors
/// Returns [`XlcolumnsError::InvalidAddress`] if the text does not match that
/// pattern, names row 0, or falls outside the sheet.
pub fn decode_address(address: &str) -> Result<(u32, u32)> {
    let invalid = || XlcolumnsError::InvalidAddress(address.to_string());
    let trimmed = address.trim();

    let rest = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let letters_end = rest
        .find(|ch: char| !ch.is_ascii_alphabetic())
        .unwrap_or(rest.len());
    let (letters, rest) = rest.split_at(letters_end);
    let digits = rest.strip_prefix('$').unwrap_or(rest);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let col = decode_col(letters).ok_or_else(invalid)?;
    let row_number: u32 = digits.parse().map_err(|_| invalid())?;
    let row = row_number.checked_sub(1).ok_or_else(invalid)?;
    if row >= MAX_ROWS || col >= MAX_COLS {
        return Err(invalid());
    }

    Ok((row, col))
}

/// Encode a zero-based `(row, col)` pair as an address like "M5".
pub fn encode_address(row: u32, col: u32) -> String {
    format!("{}{}", encode_col(col), u64::from(row) + 1)
}

/// Leniently parse a cell reference from raw XML attribute bytes into
/// `(row, col)`.
///
/// `$` markers are skipped and letters/digits are accumulated wherever they
/// appear, matching how spreadsheet writers are tolerated in the wild.
/// References past [`MAX_ROWS`] or [`MAX_COLS`] are rejected.
pub fn parse_cell_ref_bytes(ref_bytes: &[u8]) -> Option<(u32, u32)> {
    let mut col: u32 = 0;
    let mut row: u32 = 0;
    let mut saw_col = false;
    let mut saw_row = false;

    for &b in ref_bytes {
        if b == b'$' {
            continue;
        }
        if b.is_ascii_alphabetic() {
            let upper = b.to_ascii_uppercase();
            col = col
                .checked_mul(26)?
                .checked_add(u32::from(upper - b'A') + 1)?;
            saw_col = true;
        } else if b.is_ascii_digit() {
            row = row.checked_mul(10)?.checked_add(u32::from(b - b'0'))?;
            saw_row = true;
        }
    }

    if !saw_col || !saw_row || row > MAX_ROWS || col > MAX_COLS {
        return None;
    }

    Some((row.saturating_sub(1), col.saturating_sub(1)))
}

/// Parse a cell range like "A1:B10" or "A1" into
/// `(start_row, start_col, end_row, end_col)`.
pub fn parse_cell_range(range: &str) -> Option<(u32, u32, u32, u32)> {
    if let Some((start, end)) = range.split_once(':') {
        let (start_row, start_col) = parse_cell_ref_bytes(start.trim().as_bytes())?;
        let (end_row, end_col) = parse_cell_ref_bytes(end.trim().as_bytes())?;
        Some((start_row, start_col, end_row, end_col))
    } else {
        let (row, col) = parse_cell_ref_bytes(range.trim().as_bytes())?;
        Some((row, col, row, col))
    }
}
