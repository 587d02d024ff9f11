//! Error types.
//!
//! Two families live here:
//!
//! - [`HeadwordError`]: raised while walking a tree. `RuleTableMiss` and
//!   `NoCategoryMatch` are recoverable; the descent engine turns them into
//!   "no headword" for the current question. `StructuralViolation` means the
//!   tree broke its contract and is always surfaced to the caller.
//! - [`TreeError`]: raised while building or reading a tree.

/// Failures of the head-rule engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeadwordError {
    /// The node's category has no entry in the rule table.
    #[error("category not covered by the rule table: {category}")]
    RuleTableMiss { category: String },

    /// None of the category's priority-list entries matched any child.
    #[error("no priority-list category of {category} present among children [{}]", children.join(", "))]
    NoCategoryMatch { category: String, children: Vec<String> },

    /// The tree does not satisfy the shape the engine relies on.
    #[error("structural violation: {reason}")]
    StructuralViolation { reason: String },
}

impl HeadwordError {
    pub(crate) fn structural(reason: impl Into<String>) -> Self {
        HeadwordError::StructuralViolation { reason: reason.into() }
    }

    /// True for failures that only abort the current question's search.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, HeadwordError::RuleTableMiss { .. } | HeadwordError::NoCategoryMatch { .. })
    }
}

/// Failures while building a [`crate::ParseTree`] or reading bracket notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("empty input")]
    EmptyInput,

    /// Parentheses do not balance; `offset` is the byte position where it was noticed.
    #[error("unbalanced parentheses at byte {offset}")]
    Unbalanced { offset: usize },

    #[error("unexpected `{found}` at byte {offset}")]
    UnexpectedToken { found: String, offset: usize },

    /// A constituent was closed without children.
    #[error("constituent `{category}` has no children")]
    EmptyConstituent { category: String },

    #[error("trailing input after the tree at byte {offset}")]
    TrailingInput { offset: usize },

    /// The builder finished while constituents were still open.
    #[error("{open} constituent(s) left open")]
    Unclosed { open: usize },

    /// Constituents nest deeper than the reader accepts.
    #[error("tree nests deeper than {limit} constituents at byte {offset}")]
    TooDeep { limit: usize, offset: usize },

    /// More than one top-level node was built.
    #[error("tree has more than one root")]
    MultipleRoots,
}

/// Top-level error for callers that read and analyze in one go.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Tree(#[from] TreeError),
    #[error(transparent)]
    Headword(#[from] HeadwordError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_match_lists_children() {
        let err = HeadwordError::NoCategoryMatch { category: "SQ".into(), children: vec!["VBZ".into(), ".".into()] };
        assert_eq!(err.to_string(), "no priority-list category of SQ present among children [VBZ, .]");
        assert!(err.is_recoverable());
    }

    #[test]
    fn structural_violation_is_not_recoverable() {
        let err = HeadwordError::structural("root is S");
        assert!(!err.is_recoverable());
        assert_eq!(err.to_string(), "structural violation: root is S");
    }
}
