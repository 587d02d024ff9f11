#[macro_use]
mod macros;
mod api;
mod engine;
mod error;
pub mod reader;
pub mod rules;
mod tree;

pub use api::{Options, QuestionAnalysis, analyze, annotate, compare_focus, find_headword, find_headword_with};
pub use engine::{
    Annotations, DescentMetrics, DescentStep, FocusCheck, HeadwordGenerator, HeadwordSink, Override, RunResult,
    Screening,
};
pub use error::{Error, HeadwordError, TreeError};
pub use rules::{HeadRule, RuleTable, SearchDirection, TypeWords};
pub use tree::{Constituent, ParseNode, ParseTree, Token, TreeBuilder};

// --- Shared types -----------------------------------------------------------

/// Index of a node inside its [`ParseTree`] arena.
///
/// Ids are only meaningful for the tree that handed them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Byte range covered by a node in the tree's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start byte index (inclusive).
    pub start: usize,
    /// End byte index (exclusive).
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn cover(self, other: Span) -> Span {
        Span { start: self.start.min(other.start), end: self.end.max(other.end) }
    }
}

/// Which stage of the pipeline produced a headword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadwordSource {
    /// Emitted by the eligibility filter (implicit wh-word or "how" question).
    Implicit,
    /// Reached by descending the tree with the head rules.
    Rules,
    /// Reached after a type-word headword was redirected to a prepositional phrase.
    PostFix,
}

/// The single token designated as a question's semantic core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Headword {
    /// The resolved token.
    pub token: NodeId,
    /// Span of the resolved token.
    pub span: Span,
    pub source: HeadwordSource,
}
