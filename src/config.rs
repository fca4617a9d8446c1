//! Table and generator configuration, read from JSON.

use serde::{Deserialize, Serialize};

use crate::codegen::ModuleOptions;
use crate::error::{Result, XlcolumnsError};
use crate::header::{HeaderOptions, TitleMode};
use crate::range::{resolve_range, AddressRange};
use crate::style::PaletteMode;

/// One header region to parse: a sheet and the corners of its header block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    pub sheet: String,
    pub start_cell: String,
    pub end_cell: String,
}

impl TableConfig {
    pub fn new(sheet: impl Into<String>, start_cell: &str, end_cell: &str) -> Self {
        Self {
            sheet: sheet.into(),
            start_cell: start_cell.to_string(),
            end_cell: end_cell.to_string(),
        }
    }

    /// Parse the `Sheet!A1:C2` shorthand. The sheet name may itself contain
    /// `!`; only the last one separates it from the range.
    ///
    /// # Errors
    /// [`XlcolumnsError::Parse`] when the `!` or `:` separator is missing.
    pub fn parse_shorthand(shorthand: &str) -> Result<Self> {
        let (sheet, range) = shorthand
            .rsplit_once('!')
            .ok_or_else(|| XlcolumnsError::Parse(format!("expected Sheet!A1:B2, got {shorthand:?}")))?;
        let (start, end) = range
            .split_once(':')
            .ok_or_else(|| XlcolumnsError::Parse(format!("expected Sheet!A1:B2, got {shorthand:?}")))?;
        let sheet = sheet.trim().trim_matches('\'');
        if sheet.is_empty() {
            return Err(XlcolumnsError::Parse(format!("missing sheet name in {shorthand:?}")));
        }
        Ok(Self::new(sheet, start.trim(), end.trim()))
    }

    /// Resolve the two corners into a range.
    ///
    /// # Errors
    /// Same as [`resolve_range`].
    pub fn range(&self) -> Result<AddressRange> {
        resolve_range(&self.start_cell, &self.end_cell)
    }
}

/// Everything a generation run needs besides the workbook itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    pub tables: Vec<TableConfig>,
    pub titles: TitleMode,
    pub palette: PaletteMode,
    pub indent: usize,
    pub hook_name: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            tables: Vec::new(),
            titles: TitleMode::Literal,
            palette: PaletteMode::None,
            indent: 2,
            hook_name: "useColumns".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Parse a JSON config. A bare array is accepted as the table list.
    ///
    /// # Errors
    /// [`XlcolumnsError::Json`] for malformed JSON or unknown enum values.
    pub fn from_json(json: &str) -> Result<Self> {
        let trimmed = json.trim_start();
        if trimmed.starts_with('[') {
            let tables: Vec<TableConfig> = serde_json::from_str(trimmed)?;
            return Ok(Self {
                tables,
                ..Self::default()
            });
        }
        Ok(serde_json::from_str(trimmed)?)
    }

    pub fn header_options(&self) -> HeaderOptions {
        HeaderOptions {
            titles: self.titles,
            palette: self.palette,
        }
    }

    pub fn module_options(&self) -> ModuleOptions {
        ModuleOptions {
            hook_name: self.hook_name.clone(),
            indent: self.indent,
        }
    }
}
