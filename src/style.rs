//! Column style classes: the default rotation assigned to top-level columns
//! and the named classes offered to users for recoloring.

use serde::{Deserialize, Serialize};

/// Class rotation applied to top-level columns by offset from the range start.
pub const DEFAULT_COLOR_ORDER: [&str; 10] = [
    "td_green",
    "td_green",
    "td_blue",
    "td_blue2",
    "td_default",
    "td_fiolet",
    "td_green2",
    "td_yellow",
    "td_brown",
    "td_red",
];

/// Named classes a user can pick when recoloring a column.
pub const PICKER_COLORS: [(&str, &str); 9] = [
    ("Green", "td_green"),
    ("Light Green", "td_green2"),
    ("Blue", "td_blue"),
    ("Light Blue", "td_blue2"),
    ("Default Gray", "td_default"),
    ("Violet", "td_fiolet"),
    ("Yellow", "td_yellow"),
    ("Brown", "td_brown"),
    ("Red", "td_red"),
];

/// Look up a picker class by its display name (case-insensitive).
pub fn picker_class(name: &str) -> Option<&'static str> {
    PICKER_COLORS
        .iter()
        .find(|(label, _)| label.eq_ignore_ascii_case(name))
        .map(|(_, class)| *class)
}

/// Whether automatic style classes are assigned while building a header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaletteMode {
    /// Columns carry no class until a user assigns one.
    #[default]
    None,
    /// Top-level columns rotate through [`DEFAULT_COLOR_ORDER`].
    Default,
}

impl PaletteMode {
    /// Class for a top-level column `offset` columns right of the range start.
    pub fn class_for(self, offset: u32) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Default => {
                let slot = offset as usize % DEFAULT_COLOR_ORDER.len();
                DEFAULT_COLOR_ORDER.get(slot).copied()
            }
        }
    }
}
