//! Position-derived column identities.
//!
//! Header text repeats and goes blank, so identities come from a node's
//! path in the tree: roots are `col_<i>`, children `<parent>_child_<i>`,
//! where `i` is the node's index among its emitted siblings.

const ROOT_PREFIX: &str = "col_";
const CHILD_SEPARATOR: &str = "_child_";

/// Identity of the `index`-th node emitted under `parent` (or at the root).
pub fn assign(parent: Option<&str>, index: usize) -> String {
    match parent {
        Some(parent) => format!("{parent}{CHILD_SEPARATOR}{index}"),
        None => format!("{ROOT_PREFIX}{index}"),
    }
}

/// Whether `identity` names a node strictly below `ancestor`.
pub fn is_descendant_of(identity: &str, ancestor: &str) -> bool {
    identity
        .strip_prefix(ancestor)
        .is_some_and(|rest| rest.starts_with(CHILD_SEPARATOR))
}
