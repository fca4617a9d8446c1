use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Result, XlcolumnsError};

/// Header text of a column.
///
/// Titles are tagged rather than encoded into the string, so the code
/// generator never has to sniff for a translation wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "camelCase")]
pub enum ColumnTitle {
    /// Display text emitted verbatim as a string literal.
    Literal(String),
    /// Translation key emitted as a `t("key")` call.
    LocalizationRef(String),
}

impl ColumnTitle {
    pub fn text(&self) -> &str {
        match self {
            Self::Literal(text) | Self::LocalizationRef(text) => text,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text().is_empty()
    }
}

impl Default for ColumnTitle {
    fn default() -> Self {
        Self::Literal(String::new())
    }
}

/// Horizontal alignment of a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

impl Align {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// The sheet region a column node was read from (0-indexed, inclusive).
///
/// For a merged header this is the merge block; otherwise the single cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpan {
    pub row: u32,
    pub start_col: u32,
    pub end_row: u32,
    pub end_col: u32,
}

/// One column definition of a header tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnNode {
    pub title: ColumnTitle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    /// Position-derived key, used as both `dataIndex` and `key`.
    pub identity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_class: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub children: Vec<ColumnNode>,
    pub span: ColumnSpan,
}

impl ColumnNode {
    /// Leaves are bound to data; branches only group other columns.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Depth-first, pre-order walk over this node and its descendants.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a ColumnNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

/// Position of a node in the tree plus every identity below it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct IndexEntry {
    path: Vec<usize>,
    descendants: Vec<String>,
}

/// Ordered root columns of one header, with a flat identity index computed
/// once at construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HeaderTree {
    roots: Vec<ColumnNode>,
    #[serde(skip)]
    index: BTreeMap<String, IndexEntry>,
}

impl HeaderTree {
    pub fn new(roots: Vec<ColumnNode>) -> Self {
        let mut index = BTreeMap::new();
        index_nodes(&roots, &[], &mut index);
        Self { roots, index }
    }

    pub fn roots(&self) -> &[ColumnNode] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Number of nodes in the whole tree.
    pub fn node_count(&self) -> usize {
        self.index.len()
    }

    pub fn node(&self, identity: &str) -> Option<&ColumnNode> {
        let entry = self.index.get(identity)?;
        node_at(&self.roots, &entry.path)
    }

    /// Identities of every node below `identity`, in pre-order.
    pub fn descendants(&self, identity: &str) -> Option<&[String]> {
        self.index
            .get(identity)
            .map(|entry| entry.descendants.as_slice())
    }

    /// All nodes in pre-order.
    pub fn nodes(&self) -> Vec<&ColumnNode> {
        let mut out = Vec::with_capacity(self.index.len());
        for root in &self.roots {
            root.walk(&mut |node| out.push(node));
        }
        out
    }

    /// Leaf nodes in left-to-right order.
    pub fn leaves(&self) -> Vec<&ColumnNode> {
        self.nodes().into_iter().filter(|n| n.is_leaf()).collect()
    }

    /// Lowest sheet row reached by any header cell.
    pub fn last_header_row(&self) -> Option<u32> {
        self.nodes().iter().map(|node| node.span.end_row).max()
    }

    /// Set the style class of `identity` and all of its descendants.
    ///
    /// An empty class clears the style. Returns the number of nodes updated.
    ///
    /// # Errors
    /// Returns [`XlcolumnsError::ColumnNotFound`] if no node carries `identity`.
    pub fn apply_style(&mut self, identity: &str, style_class: &str) -> Result<usize> {
        let entry = self
            .index
            .get(identity)
            .ok_or_else(|| XlcolumnsError::ColumnNotFound(identity.to_string()))?;
        let class = (!style_class.is_empty()).then(|| style_class.to_string());

        let mut paths = Vec::with_capacity(entry.descendants.len() + 1);
        paths.push(entry.path.clone());
        for descendant in &entry.descendants {
            if let Some(desc) = self.index.get(descendant) {
                paths.push(desc.path.clone());
            }
        }

        let mut updated = 0;
        for path in &paths {
            if let Some(node) = node_at_mut(&mut self.roots, path) {
                node.style_class.clone_from(&class);
                updated += 1;
            }
        }
        Ok(updated)
    }
}

/// Records every node of `nodes` and returns the identities found, in pre-order.
fn index_nodes(
    nodes: &[ColumnNode],
    prefix: &[usize],
    index: &mut BTreeMap<String, IndexEntry>,
) -> Vec<String> {
    let mut seen = Vec::new();
    for (i, node) in nodes.iter().enumerate() {
        let mut path = prefix.to_vec();
        path.push(i);
        let descendants = index_nodes(&node.children, &path, index);
        seen.push(node.identity.clone());
        seen.extend(descendants.iter().cloned());
        index.insert(node.identity.clone(), IndexEntry { path, descendants });
    }
    seen
}

fn node_at<'a>(roots: &'a [ColumnNode], path: &[usize]) -> Option<&'a ColumnNode> {
    let (first, rest) = path.split_first()?;
    let mut node = roots.get(*first)?;
    for &i in rest {
        node = node.children.get(i)?;
    }
    Some(node)
}

fn node_at_mut<'a>(roots: &'a mut [ColumnNode], path: &[usize]) -> Option<&'a mut ColumnNode> {
    let (first, rest) = path.split_first()?;
    let mut node = roots.get_mut(*first)?;
    for &i in rest {
        node = node.children.get_mut(i)?;
    }
    Some(node)
}
