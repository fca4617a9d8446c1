//! Shared XML attribute and text helpers for the XLSX loader.

use quick_xml::events::{BytesStart, BytesText};

/// Extract a string attribute value by key.
///
/// Returns `None` if the attribute is missing or not valid UTF-8.
pub fn attr_string(e: &BytesStart, key: &[u8]) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == key {
            return std::str::from_utf8(&attr.value).ok().map(|s| s.to_string());
        }
    }
    None
}

/// Extract a string attribute by local name (ignoring namespace prefix).
pub fn attr_string_local(e: &BytesStart, key: &[u8]) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == key {
            return std::str::from_utf8(&attr.value).ok().map(|s| s.to_string());
        }
    }
    None
}

/// Decode a text node, unescaping entities only when one is present.
pub fn text_string(text: &BytesText) -> Option<String> {
    let raw = text.as_ref();
    if raw.contains(&b'&') {
        text.unescape().ok().map(|s| s.into_owned())
    } else {
        std::str::from_utf8(raw).ok().map(ToString::to_string)
    }
}
