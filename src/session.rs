//! A loaded workbook plus the tables most recently parsed from it.
//!
//! This is the state behind an interactive editor: load a file, parse one
//! or more header ranges, recolor columns, and regenerate code after every
//! change.

use tracing::{debug, warn};

use crate::codegen::{render_module, serialize_with, CodegenOptions};
use crate::config::{GeneratorConfig, TableConfig};
use crate::csv::{parse_delimited, Delimiter};
use crate::data::ParsedTable;
use crate::error::{Result, XlcolumnsError};
use crate::parser;
use crate::style::picker_class;
use crate::types::Workbook;

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

#[derive(Debug, Default)]
pub struct Session {
    workbook: Option<Workbook>,
    tables: Vec<ParsedTable>,
    config: GeneratorConfig,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: GeneratorConfig) {
        self.config = config;
    }

    /// Load an XLSX file, replacing any previous workbook and tables.
    ///
    /// # Errors
    /// Any error from [`parser::parse`]; the previous state is kept on failure.
    pub fn load_xlsx(&mut self, data: &[u8]) -> Result<()> {
        let workbook = parser::parse(data)?;
        self.load_workbook(workbook);
        Ok(())
    }

    /// Load CSV/TSV text as a one-sheet workbook.
    ///
    /// # Errors
    /// Any error from [`parse_delimited`].
    pub fn load_csv(&mut self, data: &[u8], delimiter: Delimiter) -> Result<()> {
        let workbook = parse_delimited(data, delimiter)?;
        self.load_workbook(workbook);
        Ok(())
    }

    /// Load bytes of unknown type: ZIP archives are read as XLSX, anything
    /// else as delimited text (tab-separated when the first line has tabs
    /// but no commas).
    ///
    /// # Errors
    /// Same as [`Session::load_xlsx`] or [`Session::load_csv`].
    pub fn load_bytes(&mut self, data: &[u8]) -> Result<()> {
        if data.starts_with(ZIP_MAGIC) {
            return self.load_xlsx(data);
        }
        let first_line = data.split(|&b| b == b'\n').next().unwrap_or_default();
        let delimiter = if first_line.contains(&b'\t') && !first_line.contains(&b',') {
            Delimiter::Tab
        } else {
            Delimiter::Comma
        };
        self.load_csv(data, delimiter)
    }

    pub fn load_workbook(&mut self, workbook: Workbook) {
        debug!(sheets = workbook.sheets.len(), "session workbook loaded");
        self.workbook = Some(workbook);
        self.tables.clear();
    }

    pub fn workbook(&self) -> Option<&Workbook> {
        self.workbook.as_ref()
    }

    /// # Errors
    /// [`XlcolumnsError::MissingWorkbook`] before anything is loaded.
    pub fn sheet_names(&self) -> Result<Vec<&str>> {
        Ok(self.loaded()?.sheet_names())
    }

    /// Parse each configured table independently.
    ///
    /// Returns one outcome per config, in order. Successful tables replace
    /// the session's current tables; a failure never affects its siblings.
    ///
    /// # Errors
    /// [`XlcolumnsError::MissingWorkbook`] before anything is loaded.
    pub fn process(&mut self, configs: &[TableConfig]) -> Result<Vec<Result<ParsedTable>>> {
        let workbook = self.loaded()?;
        let options = self.config.header_options();

        let outcomes: Vec<Result<ParsedTable>> = configs
            .iter()
            .map(|config| {
                let outcome = ParsedTable::build(workbook, config, &options);
                if let Err(e) = &outcome {
                    warn!(
                        sheet = %config.sheet,
                        start = %config.start_cell,
                        end = %config.end_cell,
                        error = %e,
                        "table failed"
                    );
                }
                outcome
            })
            .collect();

        self.tables = outcomes
            .iter()
            .filter_map(|outcome| outcome.as_ref().ok().cloned())
            .collect();
        Ok(outcomes)
    }

    /// Parse the tables listed in the session config.
    ///
    /// # Errors
    /// Same as [`Session::process`].
    pub fn process_configured(&mut self) -> Result<Vec<Result<ParsedTable>>> {
        let configs = self.config.tables.clone();
        self.process(&configs)
    }

    pub fn tables(&self) -> &[ParsedTable] {
        &self.tables
    }

    /// Set the style class of a column and everything beneath it, in every
    /// current table that has a column with that identity.
    ///
    /// `style_class` is either a class name or a picker label such as
    /// `"Light Blue"`.
    ///
    /// Returns the number of nodes updated.
    ///
    /// # Errors
    /// [`XlcolumnsError::MissingWorkbook`] before anything is loaded,
    /// [`XlcolumnsError::ColumnNotFound`] when no table has the identity.
    pub fn apply_style(&mut self, identity: &str, style_class: &str) -> Result<usize> {
        self.loaded()?;
        let style_class = picker_class(style_class).unwrap_or(style_class);
        let mut updated = 0;
        let mut found = false;
        for table in &mut self.tables {
            match table.columns.apply_style(identity, style_class) {
                Ok(count) => {
                    found = true;
                    updated += count;
                }
                Err(XlcolumnsError::ColumnNotFound(_)) => {}
                Err(e) => return Err(e),
            }
        }
        if !found {
            return Err(XlcolumnsError::ColumnNotFound(identity.to_string()));
        }
        debug!(identity, style_class, updated, "restyled columns");
        Ok(updated)
    }

    /// Column array for the first parsed table.
    pub fn code(&self) -> Option<String> {
        let table = self.tables.first()?;
        Some(serialize_with(
            &table.columns,
            &CodegenOptions {
                indent: self.config.indent,
                base_level: 0,
            },
        ))
    }

    /// Complete hook module for the first parsed table.
    pub fn module(&self) -> Option<String> {
        let table = self.tables.first()?;
        Some(render_module(&table.columns, &self.config.module_options()))
    }

    fn loaded(&self) -> Result<&Workbook> {
        self.workbook.as_ref().ok_or(XlcolumnsError::MissingWorkbook)
    }
}
