//! Head rules: the static configuration consulted by the engine.
//!
//! - `head_rules.rs`: category → (priority list, search direction) table used
//!   by generic rule application.
//! - `type_words.rs`: vague head nouns ("kind", "type", ...) that trigger the
//!   post-operation fix.
//!
//! Both are immutable once built. The default instances are memoized in
//! statics and shared across questions; custom tables can be assembled with
//! [`RuleTable::insert`] or the [`head_rules!`](crate::head_rules) macro.

#[path = "rules/head_rules.rs"]
mod head_rules;
#[path = "rules/type_words.rs"]
mod type_words;


pub use head_rules::{DEFAULT_RULES, HeadRule, RuleTable, SearchDirection};
pub use type_words::{DEFAULT_TYPE_WORDS, TypeWords};
