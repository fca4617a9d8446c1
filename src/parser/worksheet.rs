//! Worksheet parsing - reads cell values and merge regions from one sheet part.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{BufReader, Read, Seek};
use tracing::{trace, warn};
use zip::ZipArchive;

use crate::cell_ref::{parse_cell_range, parse_cell_ref_bytes};
use crate::error::Result;
use crate::types::{CellData, CellValue, MergeRange, Sheet};
use crate::xml_helpers::{attr_string, text_string};

/// Sheet metadata from workbook.xml
pub(super) struct SheetInfo {
    pub name: String,
    pub path: String,
}

/// Cell type tag from the `t` attribute of a `<c>` element.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(super) enum CellTypeTag {
    Shared,
    Inline,
    Str,
    Bool,
    Error,
    Default,
}

pub(super) fn parse_cell_type_tag(value: &[u8]) -> CellTypeTag {
    match value {
        b"s" => CellTypeTag::Shared,
        b"b" => CellTypeTag::Bool,
        b"e" => CellTypeTag::Error,
        b"str" => CellTypeTag::Str,
        b"inlineStr" => CellTypeTag::Inline,
        _ => CellTypeTag::Default,
    }
}

/// Turn the raw `<v>`/`<t>` text of a cell into a value.
pub(super) fn resolve_cell_value(
    raw: &str,
    cell_type: CellTypeTag,
    shared_strings: &[String],
) -> Option<CellValue> {
    match cell_type {
        CellTypeTag::Shared => {
            let idx: usize = raw.trim().parse().ok()?;
            shared_strings.get(idx).cloned().map(CellValue::Text)
        }
        CellTypeTag::Inline | CellTypeTag::Str | CellTypeTag::Error => {
            Some(CellValue::Text(raw.to_string()))
        }
        CellTypeTag::Bool => Some(CellValue::Bool(matches!(raw.trim(), "1" | "true"))),
        CellTypeTag::Default => Some(match raw.trim().parse::<f64>() {
            Ok(n) => CellValue::Number(n),
            Err(_) => CellValue::Text(raw.to_string()),
        }),
    }
}

/// Parse a single worksheet
pub(super) fn parse_sheet<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    info: &SheetInfo,
    shared_strings: &[String],
) -> Result<Sheet> {
    let file = archive.by_name(&info.path)?;

    let mut xml = Reader::from_reader(BufReader::new(file));
    xml.trim_text(false);

    let mut cells = Vec::new();
    let mut merges = Vec::new();

    let mut buf = Vec::new();
    let mut cell_buf = Vec::new();
    let mut text_buf = Vec::new();

    loop {
        match xml.read_event_into(&mut buf) {
            Ok(ref event @ (Event::Start(_) | Event::Empty(_))) => {
                let (Event::Start(ref e) | Event::Empty(ref e)) = event else {
                    continue;
                };
                let is_start_event = matches!(event, Event::Start(_));

                match e.local_name().as_ref() {
                    b"c" => {
                        let mut position = None;
                        let mut cell_type = CellTypeTag::Default;

                        for attr in e.attributes().flatten() {
                            match attr.key.as_ref() {
                                b"r" => position = parse_cell_ref_bytes(&attr.value),
                                b"t" => cell_type = parse_cell_type_tag(&attr.value),
                                _ => {}
                            }
                        }

                        // Self-closing cells like <c r="A1" s="3"/> carry no value
                        let mut raw: Option<String> = None;
                        if is_start_event {
                            let mut in_inline = false;
                            let mut in_phonetic = false;
                            loop {
                                cell_buf.clear();
                                match xml.read_event_into(&mut cell_buf) {
                                    Ok(Event::Start(ref inner)) => match inner.local_name().as_ref() {
                                        b"is" => in_inline = true,
                                        b"rPh" => in_phonetic = true,
                                        b"v" | b"t" if !in_phonetic => {
                                            text_buf.clear();
                                            if let Ok(Event::Text(text)) =
                                                xml.read_event_into(&mut text_buf)
                                            {
                                                if let Some(text) = text_string(&text) {
                                                    // Inline rich text arrives as several <t> runs
                                                    match raw.as_mut() {
                                                        Some(existing) if in_inline => {
                                                            existing.push_str(&text);
                                                        }
                                                        _ => raw = Some(text),
                                                    }
                                                }
                                            }
                                        }
                                        _ => {}
                                    },
                                    Ok(Event::End(ref inner)) => match inner.local_name().as_ref() {
                                        b"c" => break,
                                        b"is" => in_inline = false,
                                        b"rPh" => in_phonetic = false,
                                        _ => {}
                                    },
                                    Ok(Event::Eof) => break,
                                    Err(e) => return Err(e.into()),
                                    _ => {}
                                }
                            }
                        }

                        match position {
                            Some((row, col)) => {
                                if let Some(value) = raw.as_deref().and_then(|raw| {
                                    resolve_cell_value(raw, cell_type, shared_strings)
                                }) {
                                    cells.push(CellData {
                                        r: row,
                                        c: col,
                                        v: value,
                                    });
                                }
                            }
                            None => warn!(
                                sheet = %info.name,
                                "skipping cell with a missing or out-of-range reference"
                            ),
                        }
                    }

                    b"mergeCell" => {
                        if let Some(reference) = attr_string(e, b"ref") {
                            match parse_cell_range(&reference) {
                                Some((start_row, start_col, end_row, end_col)) => {
                                    merges.push(MergeRange::new(
                                        start_row, start_col, end_row, end_col,
                                    ));
                                }
                                None => warn!(
                                    sheet = %info.name,
                                    reference = %reference,
                                    "skipping unreadable or out-of-range merge reference"
                                ),
                            }
                        }
                    }

                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
        buf.clear();
    }

    trace!(
        sheet = %info.name,
        cells = cells.len(),
        merges = merges.len(),
        "parsed worksheet"
    );
    Ok(Sheet::from_parts(&info.name, cells, merges))
}
