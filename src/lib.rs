//! xlcolumns - table column definitions from spreadsheet headers
//!
//! Reads a header block out of an XLSX or CSV sheet, follows its merged
//! cells to build a column tree, and generates the matching column array
//! (or a complete hook module) for a React table:
//! - Multi-level headers from horizontal merges
//! - Stable, position-derived column keys
//! - Optional translation keys and default column colors
//! - Data rows below the header keyed by leaf column
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { ColumnStudio } from 'xlcolumns';
//! await init();
//! const studio = new ColumnStudio();
//! studio.load(bytes);
//! studio.process([{ sheet: 'Sheet1', startCell: 'A1', endCell: 'M3' }]);
//! studio.applyStyle('col_0', 'td_red');
//! const source = studio.module();
//! ```

pub mod cell_ref;
pub mod codegen;
pub mod config;
pub mod csv;
pub mod data;
pub mod error;
pub mod header;
pub mod merge_index;
pub mod parser;
pub mod range;
pub mod session;
pub mod style;
pub mod types;
pub mod xml_helpers;

use wasm_bindgen::prelude::*;

pub use codegen::{render_module, serialize};
pub use config::{GeneratorConfig, TableConfig};
pub use data::{DataRow, ParsedTable};
pub use error::XlcolumnsError;
pub use header::{build_header, HeaderOptions, TitleMode};
pub use range::{resolve_range, AddressRange};
pub use session::Session;
pub use style::PaletteMode;
pub use types::*;

/// Parse `data` (XLSX or CSV) and generate the hook module for the first
/// table that builds successfully.
///
/// # Errors
/// Load and config errors, or the first table's error when none succeed.
pub fn generate_module(data: &[u8], config: &GeneratorConfig) -> error::Result<String> {
    let mut session = Session::with_config(config.clone());
    session.load_bytes(data)?;
    let outcomes = session.process_configured()?;
    if let Some(module) = session.module() {
        return Ok(module);
    }
    match outcomes.into_iter().find_map(std::result::Result::err) {
        Some(e) => Err(e),
        // No tables configured: an empty column list is still a valid module.
        None => Ok(render_module(&HeaderTree::default(), &config.module_options())),
    }
}

/// Parse `data` and return one outcome per configured table.
///
/// # Errors
/// Load errors only; per-table failures are inside the returned list.
pub fn parse_tables(
    data: &[u8],
    config: &GeneratorConfig,
) -> error::Result<Vec<error::Result<ParsedTable>>> {
    let mut session = Session::with_config(config.clone());
    session.load_bytes(data)?;
    session.process_configured()
}

/// Generate the hook module for a spreadsheet.
///
/// `config_json` is a [`GeneratorConfig`] or a bare array of tables.
///
/// # Errors
/// Returns an error string if the file or config is invalid or no table
/// could be built.
#[wasm_bindgen(js_name = "generateColumns")]
pub fn generate_columns(data: &[u8], config_json: &str) -> Result<String, JsValue> {
    let config =
        GeneratorConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    generate_module(data, &config).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Parse every configured table and return them as JS objects.
///
/// Failed tables appear as `{ error: "..." }` in their slot.
///
/// # Errors
/// Returns an error if the file or config is invalid.
#[wasm_bindgen(js_name = "parseTablesToJs")]
pub fn parse_tables_to_js(data: &[u8], config_json: &str) -> Result<JsValue, JsValue> {
    let config =
        GeneratorConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let outcomes = parse_tables(data, &config).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&outcomes_json(&outcomes))
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// Table outcomes as JSON values, errors as `{ "error": message }`.
pub fn outcomes_json(outcomes: &[error::Result<ParsedTable>]) -> Vec<serde_json::Value> {
    outcomes
        .iter()
        .map(|outcome| match outcome {
            Ok(table) => serde_json::to_value(table)
                .unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() })),
            Err(e) => serde_json::json!({ "error": e.to_string() }),
        })
        .collect()
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Browser-side editing session: load once, then parse, restyle and
/// regenerate as often as needed.
#[wasm_bindgen]
pub struct ColumnStudio {
    session: Session,
}

#[wasm_bindgen]
impl ColumnStudio {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ColumnStudio {
        console_error_panic_hook::set_once();
        ColumnStudio {
            session: Session::new(),
        }
    }

    /// Replace the generator config (titles, palette, indent, hook name).
    ///
    /// # Errors
    /// Returns an error string for invalid JSON.
    #[wasm_bindgen(js_name = "setConfig")]
    pub fn set_config(&mut self, config_json: &str) -> Result<(), JsValue> {
        let config = GeneratorConfig::from_json(config_json)?;
        self.session.set_config(config);
        Ok(())
    }

    /// Load XLSX or CSV bytes.
    ///
    /// # Errors
    /// Returns an error string if the file cannot be read.
    pub fn load(&mut self, data: &[u8]) -> Result<(), JsValue> {
        self.session.load_bytes(data)?;
        Ok(())
    }

    /// Sheet names of the loaded workbook.
    ///
    /// # Errors
    /// Returns an error if nothing is loaded.
    #[wasm_bindgen(js_name = "sheetNames")]
    pub fn sheet_names(&self) -> Result<Vec<String>, JsValue> {
        let names = self.session.sheet_names()?;
        Ok(names.into_iter().map(str::to_string).collect())
    }

    /// Parse an array of `{ sheet, startCell, endCell }` tables.
    ///
    /// # Errors
    /// Returns an error if nothing is loaded or the argument is not a table list.
    pub fn process(&mut self, tables: JsValue) -> Result<JsValue, JsValue> {
        let configs: Vec<TableConfig> = serde_wasm_bindgen::from_value(tables)?;
        let outcomes = self.session.process(&configs)?;
        serde_wasm_bindgen::to_value(&outcomes_json(&outcomes))
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Recolor a column and its descendants; returns the nodes updated.
    ///
    /// # Errors
    /// Returns an error for an unknown identity or when nothing is loaded.
    #[wasm_bindgen(js_name = "applyStyle")]
    pub fn apply_style(&mut self, identity: &str, style_class: &str) -> Result<usize, JsValue> {
        Ok(self.session.apply_style(identity, style_class)?)
    }

    /// Column array of the first parsed table.
    pub fn code(&self) -> Option<String> {
        self.session.code()
    }

    /// Hook module of the first parsed table.
    pub fn module(&self) -> Option<String> {
        self.session.module()
    }
}

impl Default for ColumnStudio {
    fn default() -> Self {
        Self::new()
    }
}
