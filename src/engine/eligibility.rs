//! Eligibility filter.
//!
//! Some questions carry their headword implicitly in the question word, so
//! walking the tree would only find a misleading noun:
//!
//! ```text
//! when        -> time, date
//! where       -> location, organization
//! who / whom  -> person
//! why         -> reason
//! how         -> description, unless followed by an adjective or adverb
//!                ("how [tall]", "how [often]"), which becomes the headword
//! 1-2 tokens  -> definition questions, no headword
//! ```
//!
//! The scan is a single left-to-right pass over the tokens in document order
//! and stops at the first decisive word.

use crate::{NodeId, ParseTree};

/// Outcome of the eligibility scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screening {
    /// Walk the tree with the head rules.
    ApplyRules,
    /// The headword is the given token; no tree walk needed.
    Implicit(NodeId),
    /// The question is too short to have a headword.
    TooShort,
}

pub(crate) fn screen(tree: &ParseTree, tokens: &[NodeId]) -> Screening {
    let mut how: Option<NodeId> = None;

    for &id in tokens {
        if let Some(how) = how {
            let pos = tree.node(id).as_token().map(|t| t.pos.to_lowercase()).unwrap_or_default();
            let headword = if pos == "jj" || pos == "rb" { id } else { how };
            tracing::debug!(word = tree.text_of(headword), "headword of a how-question");
            return Screening::Implicit(headword);
        }

        let word = tree.text_of(id).to_lowercase();
        if word.starts_with("wh") {
            match word.as_str() {
                "when" | "where" | "who" | "whom" | "why" => {
                    tracing::debug!(word = tree.text_of(id), "implicit headword");
                    return Screening::Implicit(id);
                }
                // Question Pattern matching would refine these; the head
                // rules are the fallback until it exists.
                "what" | "which" => return Screening::ApplyRules,
                _ => {}
            }
        } else if word == "how" {
            how = Some(id);
        }
    }

    if tokens.len() <= 2 {
        tracing::debug!(question = tree.text(), "no headword, question has at most two tokens");
        return Screening::TooShort;
    }
    Screening::ApplyRules
}
