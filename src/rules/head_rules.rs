use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Order in which a node's children are scanned against a priority list.
///
/// ```text
/// *ByCategory  for candidate in priority { for child in children { .. } }
/// *ByPosition  for child in children { for candidate in priority { .. } }
/// Left*        children scanned left to right
/// Right*       children scanned right to left
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchDirection {
    LeftByCategory,
    RightByCategory,
    LeftByPosition,
    RightByPosition,
}

/// Priority list and search direction for one phrase category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadRule {
    pub priority: Vec<String>,
    pub direction: SearchDirection,
}

/// Category → [`HeadRule`] lookup.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: HashMap<String, HeadRule>,
}

/// Head rules for English questions (Silva 2009 / Loni 2011, with local
/// adjustments).
pub static DEFAULT_RULES: Lazy<RuleTable> = Lazy::new(RuleTable::default_table);

impl RuleTable {
    /// A table with no entries; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn default_table() -> Self {
        head_rules! {
            "S"      => LeftByCategory  ["VP", "S", "FRAG", "SBAR", "ADJP"],
            "SBARQ"  => LeftByCategory  ["SQ", "S", "SINV", "SBARQ", "FRAG"],
            "SQ"     => LeftByCategory  ["NP", "VP", "SQ"],
            "NP"     => RightByPosition ["NP", "NN", "NNP", "NNPS", "NNS", "NX"],
            "PP"     => LeftByCategory  ["WHNP", "NP", "WHADVP", "SBAR"],
            "WHNP"   => LeftByCategory  ["NP", "NN", "NNP", "NNPS", "NNS", "NX", "WHNP"],
            "WHADVP" => LeftByCategory  ["NP", "NN", "NNP", "NNPS", "NNS", "NX", "WHNP"],
            "WHADJP" => LeftByCategory  ["NP", "NN", "NNP", "NNPS", "NNS", "NX", "WHNP"],
            "WHPP"   => RightByCategory ["WHNP", "WHADVP", "NP", "SBAR"],
            "ROOT"   => LeftByCategory  ["S", "SBARQ"],
            "VP"     => RightByCategory ["NP", "NN", "NNP", "NNPS", "NNS", "NX", "SQ", "PP"],
            "SINV"   => LeftByCategory  ["NP"],
            "NX"     => LeftByCategory  ["NP", "NN", "NNP", "NNPS", "NNS", "NX", "S"],
        }
    }

    /// Add or replace the rule for `category`.
    pub fn insert(&mut self, category: &str, direction: SearchDirection, priority: &[&str]) {
        let priority = priority.iter().map(|p| p.to_string()).collect();
        self.rules.insert(category.to_string(), HeadRule { priority, direction });
    }

    pub fn get(&self, category: &str) -> Option<&HeadRule> {
        self.rules.get(category)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Covered categories, sorted.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        categories.sort_unstable();
        categories
    }
}
