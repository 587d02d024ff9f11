use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Lemmas of vague head nouns. A headword with one of these lemmas is
/// redirected toward an attached prepositional phrase ("What *kind* of
/// animal ...").
#[derive(Debug, Clone, Default)]
pub struct TypeWords {
    lemmas: HashSet<String>,
}

pub static DEFAULT_TYPE_WORDS: Lazy<TypeWords> = Lazy::new(TypeWords::default_set);

impl TypeWords {
    pub fn default_set() -> Self {
        Self::from_lemmas(&["kind", "name", "type", "part", "genre", "group"])
    }

    pub fn from_lemmas(lemmas: &[&str]) -> Self {
        TypeWords { lemmas: lemmas.iter().map(|l| l.to_string()).collect() }
    }

    /// Exact, case-sensitive lemma lookup.
    pub fn contains(&self, lemma: &str) -> bool {
        self.lemmas.contains(lemma)
    }
}
