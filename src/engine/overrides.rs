//! Non-trivial rule overrides.
//!
//! Two structural corrections for cases where the generic tables pick the
//! wrong branch. They are consulted before the generic rules on every step.
//!
//! ```text
//! SbarqWhPhrase       "Which [country] are Godiva chocolates from?"
//!   (SBARQ (WHNP (WDT Which) (NN country)) (SQ ...))
//!   SBARQ would otherwise descend into SQ and end on "chocolates".
//!
//! PossessiveRedirect  "What [country]'s capital is Tirana?"
//!   (WHNP (WHNP (WDT What) (NN country) (POS 's)) (NN capital))
//!   The outer WHNP would otherwise end on "capital".
//! ```

use crate::error::HeadwordError;
use crate::{NodeId, ParseNode, ParseTree};

/// Which override redirected the descent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Override {
    /// SBARQ with a WH*P child of at least two children: take the WH phrase.
    SbarqWhPhrase,
    /// WH phrase containing a possessive marker: take the marker's parent.
    PossessiveRedirect,
}

/// Returns the adjusted node, or `None` when no override applies (including
/// when an override would land on `id` itself).
pub(crate) fn apply_non_trivial_rules(
    tree: &ParseTree,
    id: NodeId,
) -> Result<Option<(Override, NodeId)>, HeadwordError> {
    let node = tree.constituent(id)?;

    if node.category == "SBARQ" {
        let wh_phrase = node.children.iter().copied().find(|&child| match tree.node(child) {
            ParseNode::Constituent(c) => {
                c.category.starts_with("WH") && c.category.ends_with('P') && c.children.len() >= 2
            }
            ParseNode::Token(_) => false,
        });
        if let Some(wh_phrase) = wh_phrase {
            return Ok(Some((Override::SbarqWhPhrase, wh_phrase)));
        }
    }

    if node.category.starts_with("WH") {
        if let Some(found) = possessive_parent(tree, id).filter(|&found| found != id) {
            return Ok(Some((Override::PossessiveRedirect, found)));
        }
    }

    Ok(None)
}

/// Parent of the first `POS`-tagged token below `id`, in document order.
fn possessive_parent(tree: &ParseTree, id: NodeId) -> Option<NodeId> {
    let mut stack = vec![id];
    while let Some(node) = stack.pop() {
        match tree.node(node) {
            ParseNode::Token(t) if t.pos == "POS" => return t.parent,
            ParseNode::Token(_) => {}
            ParseNode::Constituent(c) => stack.extend(c.children.iter().rev()),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_tree;

    fn find_label(tree: &ParseTree, label: &str, nth: usize) -> NodeId {
        (0..tree.len()).map(crate::NodeId).filter(|&id| tree.label(id) == label).nth(nth).unwrap()
    }

    #[test]
    fn sbarq_takes_a_wh_phrase_with_two_children() {
        let tree = read_tree(
            "(ROOT (SBARQ (WHNP (WDT Which) (NN country)) (SQ (VBP are) (NP (NNP Godiva) (NNS chocolates)) (ADVP (IN from))) (. ?)))",
        )
        .unwrap();
        let sbarq = find_label(&tree, "SBARQ", 0);
        let whnp = find_label(&tree, "WHNP", 0);
        assert_eq!(apply_non_trivial_rules(&tree, sbarq).unwrap(), Some((Override::SbarqWhPhrase, whnp)));
    }

    #[test]
    fn sbarq_ignores_a_single_child_wh_phrase() {
        let tree =
            read_tree("(ROOT (SBARQ (WHNP (WP What)) (SQ (VBZ is) (NP (DT the) (NN capital))) (. ?)))").unwrap();
        let sbarq = find_label(&tree, "SBARQ", 0);
        assert_eq!(apply_non_trivial_rules(&tree, sbarq).unwrap(), None);
    }

    #[test]
    fn wh_phrase_must_end_in_p() {
        let tree = read_tree("(ROOT (SBARQ (WHX (WDT Which) (NN one)) (SQ (VBZ is) (NP (PRP it))) (. ?)))").unwrap();
        let sbarq = find_label(&tree, "SBARQ", 0);
        assert_eq!(apply_non_trivial_rules(&tree, sbarq).unwrap(), None);
    }

    #[test]
    fn possessive_marker_redirects_to_its_parent() {
        let tree = read_tree(
            "(ROOT (SBARQ (WHNP (WHNP (WDT What) (NN country) (POS 's)) (NN capital)) (SQ (VBZ is) (NP (NNP Tirana))) (. ?)))",
        )
        .unwrap();
        let outer = find_label(&tree, "WHNP", 0);
        let inner = find_label(&tree, "WHNP", 1);
        assert_eq!(apply_non_trivial_rules(&tree, outer).unwrap(), Some((Override::PossessiveRedirect, inner)));
        // The inner phrase holds the marker itself, which is no adjustment.
        assert_eq!(apply_non_trivial_rules(&tree, inner).unwrap(), None);
    }

    #[test]
    fn possessive_search_only_runs_under_wh_phrases() {
        let tree = read_tree("(ROOT (S (NP (NP (NNP Peru) (POS 's)) (NN capital)) (VP (VBZ is) (NP (NNP Lima)))))").unwrap();
        let np = find_label(&tree, "NP", 0);
        assert_eq!(apply_non_trivial_rules(&tree, np).unwrap(), None);
    }

    #[test]
    fn possessive_search_reaches_deeply_nested_markers() {
        let depth = 10_000;
        let mut b = crate::TreeBuilder::new();
        let outer = b.open("WHNP", None);
        for _ in 0..depth {
            b.open("WHNP", None);
        }
        b.token("NN", "country", None);
        b.token("POS", "'s", None);
        for _ in 0..=depth {
            b.close().unwrap();
        }
        let tree = b.finish().unwrap();

        let (rule, found) = apply_non_trivial_rules(&tree, outer).unwrap().unwrap();
        assert_eq!(rule, Override::PossessiveRedirect);
        assert_eq!(tree.text_of(found), "country's");
        assert_eq!(found.index(), depth);
    }
}
