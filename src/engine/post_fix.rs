//! Post-operation fix for type words.
//!
//! "What *kind* of animal is Babar?" resolves to "kind" through the head
//! rules, but the prepositional phrase "of animal" names what is asked for.
//! When the headword's lemma is a type word, look for a `PP` child on the
//! token's nearest ancestors and continue the descent from there.
//!
//! ```text
//! (WHNP (WHNP (WDT What) (NN kind)) (PP (IN of) (NP (NN animal))))
//!        ^ level 1: no PP            ^ level 2: PP found
//! ```

use crate::error::HeadwordError;
use crate::{NodeId, ParseTree};

/// Scan up to `levels` ancestors of `token` (starting with its parent) for a
/// direct child labelled `PP`. Stops early at `ROOT`.
pub(crate) fn post_operation_fix(
    tree: &ParseTree,
    token: NodeId,
    levels: usize,
) -> Result<Option<NodeId>, HeadwordError> {
    let mut ancestor = tree
        .node(token)
        .parent()
        .ok_or_else(|| HeadwordError::structural(format!("token at node {} has no parent", token.index())))?;

    for level in 1..=levels {
        let node = tree.constituent(ancestor)?;
        if let Some(&pp) = node.children.iter().find(|&&child| tree.label(child) == "PP") {
            return Ok(Some(pp));
        }
        if node.category == "ROOT" || level == levels {
            break;
        }
        ancestor = node.parent.ok_or_else(|| {
            HeadwordError::structural(format!("{} at node {} has no parent", node.category, ancestor.index()))
        })?;
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_tree;

    fn token_with_text(tree: &ParseTree, text: &str) -> NodeId {
        tree.tokens().into_iter().find(|&t| tree.text_of(t) == text).unwrap()
    }

    #[test]
    fn finds_pp_two_levels_up() {
        let tree = read_tree(
            "(ROOT (SBARQ (WHNP (WHNP (WDT What) (NN kind)) (PP (IN of) (NP (NN animal)))) (SQ (VBZ is) (NP (NNP Babar))) (. ?)))",
        )
        .unwrap();
        let kind = token_with_text(&tree, "kind");
        let pp = post_operation_fix(&tree, kind, 2).unwrap().unwrap();
        assert_eq!(tree.label(pp), "PP");
        assert_eq!(tree.text_of(pp), "of animal");

        // One level is not enough here.
        assert_eq!(post_operation_fix(&tree, kind, 1).unwrap(), None);
    }

    #[test]
    fn gives_up_beyond_the_bound() {
        let tree = read_tree(
            "(ROOT (S (NP (NP (NP (DT the) (NN name))) (PP (IN of) (NP (DT the) (NN ship)))) (VP (VBD was) (NP (NNP Titanic)))))",
        )
        .unwrap();
        let name = token_with_text(&tree, "name");
        assert_eq!(post_operation_fix(&tree, name, 2).unwrap(), None);
        assert!(post_operation_fix(&tree, name, 3).unwrap().is_some());
    }

    #[test]
    fn stops_at_root() {
        let tree = read_tree("(ROOT (NN type))").unwrap();
        let word = token_with_text(&tree, "type");
        assert_eq!(post_operation_fix(&tree, word, 5).unwrap(), None);
    }
}
