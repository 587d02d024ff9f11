//! Arena-held constituency parse trees.
//!
//! A [`ParseTree`] owns every node of one question in a flat vector; nodes
//! point at their children and at their parent through [`NodeId`] indexes, so
//! upward traversal (needed by the override and post-fix rules) works without
//! ownership cycles.
//!
//! ```text
//! ROOT(0)
//!  └─ SBARQ(1)
//!      ├─ WHNP(2) ── WDT(3) "Which", NN(4) "country"
//!      ├─ SQ(5) ...
//!      └─ .(12) "?"
//! ```
//!
//! Trees are built once with [`TreeBuilder`] (or read from bracket notation,
//! see [`crate::reader`]) and are read-only afterwards.

use crate::error::{HeadwordError, TreeError};
use crate::{NodeId, Span};
use std::fmt;

/// Inner node: a phrase category with at least one child.
#[derive(Debug, Clone)]
pub struct Constituent {
    /// Phrase category, e.g. `"NP"` or `"SBARQ"`.
    pub category: String,
    /// Syntactic-function tag, e.g. `"SBJ"` from `NP-SBJ`.
    pub function: Option<String>,
    pub children: Vec<NodeId>,
    pub span: Span,
    pub parent: Option<NodeId>,
}

/// Leaf node: one word.
#[derive(Debug, Clone)]
pub struct Token {
    /// Part-of-speech tag, e.g. `"NN"`.
    pub pos: String,
    pub lemma: String,
    pub span: Span,
    pub parent: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub enum ParseNode {
    Constituent(Constituent),
    Token(Token),
}

impl ParseNode {
    /// Category for constituents, POS tag for tokens.
    ///
    /// Head rules compare priority-list entries against this value.
    pub fn label(&self) -> &str {
        match self {
            ParseNode::Constituent(c) => &c.category,
            ParseNode::Token(t) => &t.pos,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            ParseNode::Constituent(c) => c.span,
            ParseNode::Token(t) => t.span,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        match self {
            ParseNode::Constituent(c) => c.parent,
            ParseNode::Token(t) => t.parent,
        }
    }

    /// Children in document order; always empty for tokens.
    pub fn children(&self) -> &[NodeId] {
        match self {
            ParseNode::Constituent(c) => &c.children,
            ParseNode::Token(_) => &[],
        }
    }

    pub fn as_constituent(&self) -> Option<&Constituent> {
        match self {
            ParseNode::Constituent(c) => Some(c),
            ParseNode::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            ParseNode::Token(t) => Some(t),
            ParseNode::Constituent(_) => None,
        }
    }

    pub fn is_token(&self) -> bool {
        matches!(self, ParseNode::Token(_))
    }
}

/// A question's constituency parse plus the text it covers.
#[derive(Debug, Clone)]
pub struct ParseTree {
    text: String,
    nodes: Vec<ParseNode>,
    root: NodeId,
}

impl ParseTree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Covered text of the whole question.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Node by id.
    ///
    /// Panics when `id` was not handed out by this tree; use [`ParseTree::get`]
    /// for ids of unknown origin.
    pub fn node(&self, id: NodeId) -> &ParseNode {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&ParseNode> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Text covered by node `id`.
    pub fn text_of(&self, id: NodeId) -> &str {
        let span = self.node(id).span();
        self.text.get(span.start..span.end).unwrap_or("")
    }

    /// Label of node `id` (category or POS).
    pub fn label(&self, id: NodeId) -> &str {
        self.node(id).label()
    }

    /// Leaves in document order.
    ///
    /// The builder appends nodes in pre-order, so arena order is document
    /// order for tokens.
    pub fn tokens(&self) -> Vec<NodeId> {
        self.nodes.iter().enumerate().filter(|(_, n)| n.is_token()).map(|(i, _)| NodeId(i)).collect()
    }

    /// Resolve `id` as a constituent, or report the contract breach.
    pub(crate) fn constituent(&self, id: NodeId) -> Result<&Constituent, HeadwordError> {
        match self.get(id) {
            Some(ParseNode::Constituent(c)) if c.children.is_empty() => Err(HeadwordError::structural(format!(
                "constituent {} at node {} has no children",
                c.category, id.0
            ))),
            Some(ParseNode::Constituent(c)) => Ok(c),
            Some(ParseNode::Token(t)) => Err(HeadwordError::structural(format!(
                "expected a constituent at node {}, found token {}",
                id.0, t.pos
            ))),
            None => Err(HeadwordError::structural(format!("node {} is not part of the tree", id.0))),
        }
    }

    fn write_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId) -> fmt::Result {
        enum Step {
            Node(NodeId, bool),
            Close,
        }

        let mut stack = vec![Step::Node(id, false)];
        while let Some(step) = stack.pop() {
            let (id, spaced) = match step {
                Step::Node(id, spaced) => (id, spaced),
                Step::Close => {
                    f.write_str(")")?;
                    continue;
                }
            };
            if spaced {
                f.write_str(" ")?;
            }
            match self.node(id) {
                ParseNode::Token(t) => write!(f, "({} {})", t.pos, self.text_of(id))?,
                ParseNode::Constituent(c) => {
                    match &c.function {
                        Some(function) => write!(f, "({}-{}", c.category, function)?,
                        None => write!(f, "({}", c.category)?,
                    }
                    stack.push(Step::Close);
                    stack.extend(c.children.iter().rev().map(|&child| Step::Node(child, true)));
                }
            }
        }
        Ok(())
    }
}

/// Writes the tree back out in bracket notation (lemmas are not printed).
impl fmt::Display for ParseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_node(f, self.root)
    }
}

/// Incremental, pre-order tree construction.
///
/// ```text
/// open("ROOT") open("NP") token("NN", "dogs") close() close() finish()
/// ```
///
/// The builder also assembles the question text: words are joined with one
/// space, except punctuation and clitics such as `'s`, which attach to the
/// preceding word. Spans point into that text.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    text: String,
    nodes: Vec<ParseNode>,
    open: Vec<NodeId>,
    roots: Vec<NodeId>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a constituent under the currently open one.
    pub fn open(&mut self, category: &str, function: Option<&str>) -> NodeId {
        let id = NodeId(self.nodes.len());
        let at = self.text.len();
        self.nodes.push(ParseNode::Constituent(Constituent {
            category: category.to_string(),
            function: function.map(str::to_string),
            children: Vec::new(),
            span: Span::new(at, at),
            parent: self.open.last().copied(),
        }));
        self.attach(id);
        self.open.push(id);
        id
    }

    /// Add a leaf under the currently open constituent.
    ///
    /// `lemma` defaults to the lower-cased word.
    pub fn token(&mut self, pos: &str, word: &str, lemma: Option<&str>) -> NodeId {
        if !self.text.is_empty() && !attaches_left(word) {
            self.text.push(' ');
        }
        let start = self.text.len();
        self.text.push_str(word);
        let id = NodeId(self.nodes.len());
        self.nodes.push(ParseNode::Token(Token {
            pos: pos.to_string(),
            lemma: lemma.map(str::to_string).unwrap_or_else(|| word.to_lowercase()),
            span: Span::new(start, self.text.len()),
            parent: self.open.last().copied(),
        }));
        self.attach(id);
        id
    }

    /// Close the innermost open constituent and fix up its span.
    ///
    /// A childless constituent is rejected and stays open.
    pub fn close(&mut self) -> Result<NodeId, TreeError> {
        let id = *self.open.last().ok_or(TreeError::Unbalanced { offset: self.text.len() })?;
        let (first, last) = match &self.nodes[id.0] {
            ParseNode::Constituent(c) => match (c.children.first(), c.children.last()) {
                (Some(&first), Some(&last)) => (first, last),
                _ => return Err(TreeError::EmptyConstituent { category: c.category.clone() }),
            },
            ParseNode::Token(_) => return Err(TreeError::Unbalanced { offset: self.text.len() }),
        };
        self.open.pop();
        let span = self.nodes[first.0].span().cover(self.nodes[last.0].span());
        if let ParseNode::Constituent(c) = &mut self.nodes[id.0] {
            c.span = span;
        }
        Ok(id)
    }

    /// Remove the innermost open constituent if it has no children.
    ///
    /// Returns `false`, leaving the constituent open, when it has children.
    pub fn discard(&mut self) -> bool {
        let Some(&id) = self.open.last() else {
            return false;
        };
        if !self.nodes[id.0].children().is_empty() {
            return false;
        }
        self.open.pop();
        // Childless, so nothing was appended after it.
        self.nodes.truncate(id.0);
        match self.open.last() {
            Some(parent) => {
                if let ParseNode::Constituent(c) = &mut self.nodes[parent.0] {
                    c.children.retain(|&child| child != id);
                }
            }
            None => self.roots.retain(|&root| root != id),
        }
        true
    }

    /// Depth of currently open constituents.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    pub fn finish(self) -> Result<ParseTree, TreeError> {
        if !self.open.is_empty() {
            return Err(TreeError::Unclosed { open: self.open.len() });
        }
        match self.roots.as_slice() {
            [] => Err(TreeError::EmptyInput),
            [root] => Ok(ParseTree { root: *root, text: self.text, nodes: self.nodes }),
            _ => Err(TreeError::MultipleRoots),
        }
    }

    fn attach(&mut self, id: NodeId) {
        match self.open.last() {
            Some(parent) => {
                if let ParseNode::Constituent(c) = &mut self.nodes[parent.0] {
                    c.children.push(id);
                }
            }
            None => self.roots.push(id),
        }
    }
}

fn attaches_left(word: &str) -> bool {
    word.starts_with('\'')
        || word.eq_ignore_ascii_case("n't")
        || word.chars().all(|c| matches!(c, '.' | ',' | '?' | '!' | ':' | ';' | '%' | ')'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dogs_bark() -> ParseTree {
        let mut b = TreeBuilder::new();
        b.open("ROOT", None);
        b.open("S", None);
        b.open("NP", Some("SBJ"));
        b.token("NNS", "Dogs", Some("dog"));
        b.close().unwrap();
        b.open("VP", None);
        b.token("VBP", "bark", None);
        b.close().unwrap();
        b.token(".", "!", None);
        b.close().unwrap();
        b.close().unwrap();
        b.finish().unwrap()
    }

    #[test]
    fn builder_assembles_text_and_spans() {
        let tree = dogs_bark();
        assert_eq!(tree.text(), "Dogs bark!");
        assert_eq!(tree.text_of(tree.root()), "Dogs bark!");

        let tokens = tree.tokens();
        let words: Vec<&str> = tokens.iter().map(|&t| tree.text_of(t)).collect();
        assert_eq!(words, ["Dogs", "bark", "!"]);

        let dogs = tree.node(tokens[0]).as_token().unwrap();
        assert_eq!(dogs.lemma, "dog");
        assert_eq!(tree.node(tokens[1]).as_token().unwrap().lemma, "bark");
    }

    #[test]
    fn parents_point_back_up() {
        let tree = dogs_bark();
        let dogs = tree.tokens()[0];
        let np = tree.node(dogs).parent().unwrap();
        assert_eq!(tree.label(np), "NP");
        assert_eq!(tree.node(np).as_constituent().unwrap().function.as_deref(), Some("SBJ"));
        let s = tree.node(np).parent().unwrap();
        assert_eq!(tree.label(s), "S");
        assert_eq!(tree.node(tree.root()).parent(), None);
    }

    #[test]
    fn display_writes_brackets() {
        assert_eq!(dogs_bark().to_string(), "(ROOT (S (NP-SBJ (NNS Dogs)) (VP (VBP bark)) (. !)))");
    }

    #[test]
    fn empty_constituent_is_rejected() {
        let mut b = TreeBuilder::new();
        b.open("ROOT", None);
        b.open("NP", None);
        assert_eq!(b.close(), Err(TreeError::EmptyConstituent { category: "NP".into() }));
        assert_eq!(b.depth(), 2);

        // Carrying on cannot sneak the childless NP into a finished tree.
        assert_eq!(b.close(), Err(TreeError::EmptyConstituent { category: "NP".into() }));
        assert_eq!(b.finish().unwrap_err(), TreeError::Unclosed { open: 2 });
    }

    #[test]
    fn discard_drops_a_childless_constituent() {
        let mut b = TreeBuilder::new();
        b.open("ROOT", None);
        b.open("S", None);
        b.open("NP", Some("SBJ"));
        assert!(b.discard());
        b.open("VP", None);
        b.token("VB", "Run", None);
        assert!(!b.discard());
        b.close().unwrap();
        b.close().unwrap();
        b.close().unwrap();
        let tree = b.finish().unwrap();

        assert_eq!(tree.to_string(), "(ROOT (S (VP (VB Run))))");
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn display_handles_deep_trees() {
        let depth = 10_000;
        let mut b = TreeBuilder::new();
        for _ in 0..depth {
            b.open("NP", None);
        }
        b.token("NN", "x", None);
        for _ in 0..depth {
            b.close().unwrap();
        }
        let tree = b.finish().unwrap();

        let brackets = tree.to_string();
        assert!(brackets.starts_with("(NP (NP "));
        assert!(brackets.ends_with("(NN x)))"));
        assert_eq!(brackets.matches('(').count(), depth + 1);
    }

    #[test]
    fn finish_requires_everything_closed() {
        let mut b = TreeBuilder::new();
        b.open("ROOT", None);
        b.token("NN", "dog", None);
        assert_eq!(b.finish().unwrap_err(), TreeError::Unclosed { open: 1 });
    }

    #[test]
    fn two_top_level_nodes_are_rejected() {
        let mut b = TreeBuilder::new();
        b.token("NN", "dog", None);
        b.token("NN", "cat", None);
        assert_eq!(b.finish().unwrap_err(), TreeError::MultipleRoots);
    }
}
