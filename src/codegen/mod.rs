//! Source generation for table column definitions.
//!
//! [`serialize`] turns a [`HeaderTree`] into an array literal of column
//! objects; [`render_module`] wraps that array in a complete hook module.
//! Output is a pure function of the tree and options, so identical trees
//! always produce byte-identical text.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::types::{ColumnNode, ColumnTitle, HeaderTree};

/// Renderer emitted on every leaf column.
pub const LEAF_RENDERER: &str = "(value, record, index) => value";

/// Layout of the generated array literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CodegenOptions {
    /// Spaces per nesting level.
    pub indent: usize,
    /// Nesting level of the line holding the opening bracket.
    pub base_level: usize,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            base_level: 0,
        }
    }
}

/// Options for [`render_module`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModuleOptions {
    pub hook_name: String,
    pub indent: usize,
}

impl Default for ModuleOptions {
    fn default() -> Self {
        Self {
            hook_name: "useColumns".to_string(),
            indent: 2,
        }
    }
}

/// Serialize `tree` with the default two-space layout.
pub fn serialize(tree: &HeaderTree) -> String {
    serialize_with(tree, &CodegenOptions::default())
}

/// Serialize `tree` as an array literal.
///
/// The opening bracket is not indented, so the result can follow an
/// assignment on the same line; every later line is indented relative to
/// `options.base_level`.
pub fn serialize_with(tree: &HeaderTree, options: &CodegenOptions) -> String {
    let mut out = String::new();
    Emitter {
        out: &mut out,
        indent: options.indent,
    }
    .array(tree.roots(), options.base_level);
    out
}

/// Render a complete module exporting a hook that returns the columns.
///
/// The translation import and hook call are only emitted when some title is
/// a localization reference.
pub fn render_module(tree: &HeaderTree, options: &ModuleOptions) -> String {
    let pad = " ".repeat(options.indent);
    let localized = tree
        .nodes()
        .iter()
        .any(|node| matches!(node.title, ColumnTitle::LocalizationRef(_)));
    let columns = serialize_with(
        tree,
        &CodegenOptions {
            indent: options.indent,
            base_level: 1,
        },
    );
    let hook = options.hook_name.as_str();

    let mut out = String::new();
    out.push_str("import React from 'react';\n");
    out.push_str("import { ColumnsType } from 'antd/es/table';\n");
    if localized {
        out.push_str("import { useTranslation } from 'react-i18next';\n");
    }
    out.push('\n');
    let _ = writeln!(out, "const {hook} = () => {{");
    if localized {
        let _ = writeln!(out, "{pad}const {{ t }} = useTranslation();");
    }
    let _ = writeln!(out, "{pad}const columns: ColumnsType<any> = {columns};");
    let _ = writeln!(out, "{pad}return columns;");
    out.push_str("}\n\n");
    let _ = writeln!(out, "export default {hook};");
    out
}

/// Expression for a title: a string literal or a translation call.
pub fn title_expr(title: &ColumnTitle) -> String {
    match title {
        ColumnTitle::Literal(text) => string_literal(text),
        ColumnTitle::LocalizationRef(key) => format!("t({})", string_literal(key)),
    }
}

/// Double-quoted literal using JSON escaping, which is valid JS/TS syntax.
fn string_literal(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| String::from("\"\""))
}

struct Emitter<'o> {
    out: &'o mut String,
    indent: usize,
}

impl Emitter<'_> {
    fn pad(&mut self, level: usize) {
        for _ in 0..level * self.indent {
            self.out.push(' ');
        }
    }

    /// Writes `[ ... ]`; the caller has already positioned the opening bracket.
    fn array(&mut self, nodes: &[ColumnNode], level: usize) {
        if nodes.is_empty() {
            self.out.push_str("[]");
            return;
        }
        self.out.push_str("[\n");
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                self.out.push_str(",\n");
            }
            self.object(node, level + 1);
        }
        self.out.push('\n');
        self.pad(level);
        self.out.push(']');
    }

    fn object(&mut self, node: &ColumnNode, level: usize) {
        let mut fields: Vec<(&str, Field<'_>)> = Vec::with_capacity(6);
        fields.push(("title", Field::Text(title_expr(&node.title))));
        if let Some(align) = node.align {
            fields.push(("align", Field::Text(string_literal(align.as_str()))));
        }
        if !node.identity.is_empty() {
            fields.push(("dataIndex", Field::Text(string_literal(&node.identity))));
            fields.push(("key", Field::Text(string_literal(&node.identity))));
        }
        if let Some(class) = node.style_class.as_deref().filter(|c| !c.is_empty()) {
            fields.push(("className", Field::Text(string_literal(class))));
        }
        if node.is_leaf() {
            fields.push(("render", Field::Text(LEAF_RENDERER.to_string())));
        } else {
            fields.push(("children", Field::Children(&node.children)));
        }

        self.pad(level);
        self.out.push_str("{\n");
        let last = fields.len().saturating_sub(1);
        for (i, (name, field)) in fields.into_iter().enumerate() {
            self.pad(level + 1);
            self.out.push_str(name);
            self.out.push_str(": ");
            match field {
                Field::Text(text) => self.out.push_str(&text),
                Field::Children(children) => self.array(children, level + 1),
            }
            if i < last {
                self.out.push(',');
            }
            self.out.push('\n');
        }
        self.pad(level);
        self.out.push('}');
    }
}

enum Field<'n> {
    Text(String),
    Children(&'n [ColumnNode]),
}
