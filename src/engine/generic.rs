//! Generic (table-driven) rule application.
//!
//! One step of the descent: pick the head child of a constituent using the
//! category's priority list and search direction.
//!
//! ```text
//! NP  RightByPosition  [NP, NN, NNP, NNPS, NNS, NX]
//! children: DT  NP  PP
//!                   ^ scanning right to left, PP matches nothing, NP matches
//! ```
//!
//! A child matches a candidate when its label (category for constituents, POS
//! tag for tokens) equals the candidate string.

use crate::error::HeadwordError;
use crate::rules::{RuleTable, SearchDirection};
use crate::{NodeId, ParseTree};

pub(crate) fn apply_rules(tree: &ParseTree, rules: &RuleTable, id: NodeId) -> Result<NodeId, HeadwordError> {
    let node = tree.constituent(id)?;
    if let [only] = node.children.as_slice() {
        return Ok(*only);
    }

    let rule =
        rules.get(&node.category).ok_or_else(|| HeadwordError::RuleTableMiss { category: node.category.clone() })?;
    let children = node.children.iter().copied();

    let found = match rule.direction {
        SearchDirection::LeftByCategory => by_category(tree, &rule.priority, children),
        SearchDirection::RightByCategory => by_category(tree, &rule.priority, children.rev()),
        SearchDirection::LeftByPosition => by_position(tree, &rule.priority, children),
        SearchDirection::RightByPosition => by_position(tree, &rule.priority, children.rev()),
    };

    found.ok_or_else(|| HeadwordError::NoCategoryMatch {
        category: node.category.clone(),
        children: node.children.iter().map(|&c| tree.label(c).to_string()).collect(),
    })
}

/// Priority-major: the first candidate present anywhere wins.
fn by_category(
    tree: &ParseTree,
    priority: &[String],
    children: impl Iterator<Item = NodeId> + Clone,
) -> Option<NodeId> {
    priority.iter().find_map(|candidate| children.clone().find(|&child| tree.label(child) == candidate))
}

/// Position-major: the first child matching any candidate wins.
fn by_position(tree: &ParseTree, priority: &[String], mut children: impl Iterator<Item = NodeId>) -> Option<NodeId> {
    children.find(|&child| priority.iter().any(|candidate| tree.label(child) == candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TreeBuilder;

    /// `(ROOT (X (A a) (B b) (A c) (C d)))` with `X` as the node under test.
    fn abac() -> (ParseTree, NodeId) {
        let mut b = TreeBuilder::new();
        b.open("ROOT", None);
        let x = b.open("X", None);
        b.token("A", "a", None);
        b.token("B", "b", None);
        b.token("A", "c", None);
        b.token("C", "d", None);
        b.close().unwrap();
        b.close().unwrap();
        (b.finish().unwrap(), x)
    }

    fn pick(direction: SearchDirection, priority: &[&str]) -> Result<String, HeadwordError> {
        let (tree, x) = abac();
        let mut rules = RuleTable::empty();
        rules.insert("X", direction, priority);
        apply_rules(&tree, &rules, x).map(|id| tree.text_of(id).to_string())
    }

    #[test]
    fn by_category_prefers_priority_then_scan_order() {
        assert_eq!(pick(SearchDirection::LeftByCategory, &["A", "C"]).unwrap(), "a");
        assert_eq!(pick(SearchDirection::RightByCategory, &["A", "C"]).unwrap(), "c");
        assert_eq!(pick(SearchDirection::LeftByCategory, &["C", "A"]).unwrap(), "d");
        assert_eq!(pick(SearchDirection::RightByCategory, &["Z", "B", "A"]).unwrap(), "b");
    }

    #[test]
    fn by_position_prefers_scan_order_then_priority() {
        assert_eq!(pick(SearchDirection::LeftByPosition, &["C", "B"]).unwrap(), "b");
        assert_eq!(pick(SearchDirection::RightByPosition, &["A", "B"]).unwrap(), "c");
        assert_eq!(pick(SearchDirection::RightByPosition, &["B", "C"]).unwrap(), "d");
        assert_eq!(pick(SearchDirection::LeftByPosition, &["Z", "C"]).unwrap(), "d");
    }

    #[test]
    fn no_candidate_present_is_a_no_match() {
        let err = pick(SearchDirection::LeftByCategory, &["NP", "VP"]).unwrap_err();
        assert_eq!(
            err,
            HeadwordError::NoCategoryMatch {
                category: "X".into(),
                children: vec!["A".into(), "B".into(), "A".into(), "C".into()],
            }
        );
    }

    #[test]
    fn uncovered_category_is_a_table_miss() {
        let (tree, x) = abac();
        let err = apply_rules(&tree, &RuleTable::default_table(), x).unwrap_err();
        assert_eq!(err, HeadwordError::RuleTableMiss { category: "X".into() });
    }

    #[test]
    fn single_child_is_taken_without_a_lookup() {
        let mut b = TreeBuilder::new();
        b.open("ROOT", None);
        let odd = b.open("UCP", None);
        b.token("FW", "etc", None);
        b.close().unwrap();
        b.close().unwrap();
        let tree = b.finish().unwrap();

        let head = apply_rules(&tree, &RuleTable::empty(), odd).unwrap();
        assert_eq!(tree.text_of(head), "etc");
    }

    #[test]
    fn noun_phrase_scans_right_to_left_by_position() {
        // (NP (DT the) (NP (NN capital)) (PP (IN of) (NP (NNP Peru))))
        let mut b = TreeBuilder::new();
        b.open("ROOT", None);
        let np = b.open("NP", None);
        b.token("DT", "the", None);
        let inner = b.open("NP", None);
        b.token("NN", "capital", None);
        b.close().unwrap();
        b.open("PP", None);
        b.token("IN", "of", None);
        b.open("NP", None);
        b.token("NNP", "Peru", None);
        b.close().unwrap();
        b.close().unwrap();
        b.close().unwrap();
        b.close().unwrap();
        let tree = b.finish().unwrap();

        assert_eq!(apply_rules(&tree, &RuleTable::default_table(), np).unwrap(), inner);
    }
}
