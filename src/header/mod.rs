//! Merge-aware header parsing.
//!
//! Walks one header row across a column span and turns the cells and merge
//! regions it meets into a tree of [`ColumnNode`]s. A merge that spans more
//! than one column becomes a branch whose children are read from the row
//! below the merge's top edge; everything else is a leaf.

pub mod identity;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::Result;
use crate::merge_index::{MergeIndex, ProcessedMerges};
use crate::range::AddressRange;
use crate::style::PaletteMode;
use crate::types::{Align, CellValue, ColumnNode, ColumnSpan, ColumnTitle, HeaderTree, Sheet};

/// How header text is turned into titles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TitleMode {
    /// Titles are emitted as string literals.
    #[default]
    Literal,
    /// Non-empty titles become translation keys.
    Localized,
}

impl TitleMode {
    pub fn title(self, text: String) -> ColumnTitle {
        match self {
            Self::Localized if !text.is_empty() => ColumnTitle::LocalizationRef(text),
            _ => ColumnTitle::Literal(text),
        }
    }
}

/// Options applied to every node of a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderOptions {
    pub titles: TitleMode,
    pub palette: PaletteMode,
}

/// Build the header tree for `range`, starting at its first row.
///
/// Only `range.start_row` and the column bounds drive the walk; rows below
/// are reached through merges.
///
/// # Errors
/// Returns [`crate::XlcolumnsError::MalformedMergeRegion`] if the sheet
/// holds a merge region whose end precedes its start.
#[tracing::instrument(level = "debug", skip_all, fields(sheet = %sheet.name, range = %range))]
pub fn build_header(
    sheet: &Sheet,
    range: &AddressRange,
    options: &HeaderOptions,
) -> Result<HeaderTree> {
    let index = MergeIndex::new(&sheet.merges)?;
    let mut processed = ProcessedMerges::new();
    let roots = build_header_row(
        sheet,
        index,
        range.start_row,
        range.start_col,
        range.end_col,
        &mut processed,
        options,
    )?;
    let tree = HeaderTree::new(roots);
    debug!(
        roots = tree.roots().len(),
        nodes = tree.node_count(),
        merges_used = processed.len(),
        "built header"
    );
    Ok(tree)
}

/// Walk `row` from `start_col` to `end_col` (inclusive) and return the
/// root-level columns found there.
///
/// `processed` must be fresh for each independent build.
///
/// # Errors
/// Currently infallible once the [`MergeIndex`] exists; kept fallible so
/// callers handle every build uniformly.
pub fn build_header_row(
    sheet: &Sheet,
    index: MergeIndex<'_>,
    row: u32,
    start_col: u32,
    end_col: u32,
    processed: &mut ProcessedMerges,
    options: &HeaderOptions,
) -> Result<Vec<ColumnNode>> {
    let mut walker = HeaderWalker {
        sheet,
        index,
        options,
        processed,
    };
    walker.walk(row, start_col, end_col, None, 0)
}

/// What a child inherits from the node it is read under.
#[derive(Clone, Copy)]
struct Parent<'n> {
    identity: &'n str,
    style_class: Option<&'n str>,
}

struct HeaderWalker<'a, 'p> {
    sheet: &'a Sheet,
    index: MergeIndex<'a>,
    options: &'a HeaderOptions,
    processed: &'p mut ProcessedMerges,
}

impl HeaderWalker<'_, '_> {
    fn walk(
        &mut self,
        row: u32,
        start_col: u32,
        end_col: u32,
        parent: Option<Parent<'_>>,
        depth: usize,
    ) -> Result<Vec<ColumnNode>> {
        let mut columns = Vec::new();
        let mut col = start_col;

        while col <= end_col {
            let cell = self.sheet.cell_at(row, col);
            let merge = self.index.find_covering(row, col);

            if let Some(region) = merge {
                if self.processed.is_processed(region) {
                    trace!(row, col, depth, merge = %region, "merge already expanded");
                    match region.end_col.checked_add(1) {
                        Some(next) => col = next,
                        None => break,
                    }
                    continue;
                }
            }

            if cell.is_none() && merge.is_none() {
                match col.checked_add(1) {
                    Some(next) => col = next,
                    None => break,
                }
                continue;
            }

            let text = cell.map(CellValue::to_text).unwrap_or_default();
            let style_class = match parent {
                Some(parent) => parent.style_class.map(str::to_string),
                None => self
                    .options
                    .palette
                    .class_for(col - start_col)
                    .map(str::to_string),
            };
            let mut node = ColumnNode {
                title: self.options.titles.title(text),
                align: Some(Align::Center),
                identity: identity::assign(parent.map(|p| p.identity), columns.len()),
                style_class,
                children: Vec::new(),
                span: ColumnSpan {
                    row,
                    start_col: col,
                    end_row: row,
                    end_col: col,
                },
            };

            let mut last_col = col;
            if let Some(region) = merge {
                self.processed.mark_processed(region);
                node.span.end_row = region.end_row.max(row);
                node.span.end_col = region.end_col;

                if region.spans_columns() {
                    if let Some(child_row) = region.start_row.checked_add(1) {
                        let children = self.walk(
                            child_row,
                            region.start_col,
                            region.end_col,
                            Some(Parent {
                                identity: &node.identity,
                                style_class: node.style_class.as_deref(),
                            }),
                            depth + 1,
                        )?;
                        node.children = children;
                    }
                }
                last_col = region.end_col;
            }

            trace!(row, col, depth, identity = %node.identity, leaf = node.is_leaf(), "column");
            columns.push(node);

            match last_col.checked_add(1) {
                Some(next) => col = next,
                None => break,
            }
        }

        Ok(columns)
    }
}
