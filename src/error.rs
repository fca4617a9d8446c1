//! Structured error types for xlcolumns.
//!
//! Every failure is local to the one (sheet, range) build being attempted;
//! callers batching several ranges get one `Result` per range.

/// All errors that can occur while loading sheets, building header trees
/// and generating column code.
#[derive(Debug, thiserror::Error)]
pub enum XlcolumnsError {
    /// An address string is not a letter run followed by a digit run.
    #[error("Invalid cell address: {0:?}")]
    InvalidAddress(String),

    /// The resolved end position precedes the start position.
    #[error("Invalid range {start}:{end}: end precedes start")]
    InvalidRange { start: String, end: String },

    /// A sheet named by a table configuration does not exist.
    #[error("Sheet {0:?} not found")]
    SheetNotFound(String),

    /// A merge region whose bounds cannot be traversed.
    #[error("Malformed merge region {0}")]
    MalformedMergeRegion(String),

    /// A build or style update was requested before any workbook was loaded.
    #[error("No workbook loaded")]
    MissingWorkbook,

    /// A style assignment named an identity that no parsed column carries.
    #[error("No column with identity {0:?}")]
    ColumnNotFound(String),

    /// XML parsing error from quick-xml.
    #[error("XML parsing: {0}")]
    Xml(#[from] quick_xml::Error),

    /// ZIP archive error.
    #[error("ZIP archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Configuration or output (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// General loader error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, XlcolumnsError>;

impl From<XlcolumnsError> for wasm_bindgen::JsValue {
    fn from(e: XlcolumnsError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
