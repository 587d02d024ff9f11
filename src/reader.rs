//! Penn Treebank bracket reader.
//!
//! Reads trees such as
//!
//! ```text
//! (ROOT (SBARQ (WHNP (WDT Which) (NN country)) (SQ ...) (. ?)))
//! ( (S (NP-SBJ (PRP I)) (VP (VBP know))))      unlabelled outer bracket = ROOT
//! (NNS chocolates chocolate)                   leaf with an explicit lemma
//! ```
//!
//! Constituent labels carrying a function tag (`NP-SBJ`, `PP-LOC-2`) are split
//! into category and function; labels starting with `-` are kept whole. Leaf
//! lemmas default to the lower-cased word.
//!
//! Empty elements (`(-NONE- *T*-1)`) are dropped, together with any
//! constituent left without children once they are gone:
//!
//! ```text
//! ( (S (NP-SBJ (-NONE- *)) (VP (VB Define) (NP (NN entropy)))))
//!   -> (ROOT (S (VP (VB Define) (NP (NN entropy)))))   "Define entropy"
//! ```

use crate::error::TreeError;
use crate::{ParseTree, TreeBuilder};

/// Deepest constituent nesting [`read_tree`] accepts.
pub const MAX_DEPTH: usize = 256;

const EMPTY_ELEMENT: &str = "-NONE-";

#[derive(Debug, Clone, Copy)]
struct Lexeme<'a> {
    text: &'a str,
    offset: usize,
}

impl Lexeme<'_> {
    fn is_open(&self) -> bool {
        self.text == "("
    }

    fn is_close(&self) -> bool {
        self.text == ")"
    }

    fn is_word(&self) -> bool {
        !self.is_open() && !self.is_close()
    }
}

struct Cursor<'a> {
    lexemes: Vec<Lexeme<'a>>,
    pos: usize,
    end: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<Lexeme<'a>> {
        self.lexemes.get(self.pos).copied()
    }

    fn next(&mut self) -> Result<Lexeme<'a>, TreeError> {
        let lexeme = self.peek().ok_or(TreeError::Unbalanced { offset: self.end })?;
        self.pos += 1;
        Ok(lexeme)
    }

    fn expect_close(&mut self) -> Result<(), TreeError> {
        let lexeme = self.next()?;
        if lexeme.is_close() { Ok(()) } else { Err(unexpected(lexeme)) }
    }
}

/// Read a single bracketed tree.
pub fn read_tree(input: &str) -> Result<ParseTree, TreeError> {
    let lexemes: Vec<Lexeme> =
        regex!(r"[()]|[^\s()]+").find_iter(input).map(|m| Lexeme { text: m.as_str(), offset: m.start() }).collect();
    if lexemes.is_empty() {
        return Err(TreeError::EmptyInput);
    }

    let mut cursor = Cursor { lexemes, pos: 0, end: input.len() };
    let mut builder = TreeBuilder::new();
    read_node(&mut cursor, &mut builder, true)?;

    if let Some(extra) = cursor.peek() {
        return Err(TreeError::TrailingInput { offset: extra.offset });
    }
    builder.finish()
}

/// Returns whether anything was added to the tree; empty elements and
/// constituents holding only empty elements add nothing.
fn read_node(cursor: &mut Cursor<'_>, builder: &mut TreeBuilder, top: bool) -> Result<bool, TreeError> {
    let open = cursor.next()?;
    if !open.is_open() {
        return Err(unexpected(open));
    }

    let label = match cursor.peek() {
        Some(next) if next.is_open() && top => "ROOT",
        Some(next) if next.is_word() => {
            cursor.next()?;
            next.text
        }
        Some(next) if next.is_close() => return Err(TreeError::EmptyConstituent { category: String::new() }),
        Some(next) => return Err(unexpected(next)),
        None => return Err(TreeError::Unbalanced { offset: cursor.end }),
    };

    // Leaf: (POS word) or (POS word lemma)
    if let Some(word) = cursor.peek().filter(Lexeme::is_word) {
        cursor.next()?;
        let lemma = match cursor.peek().filter(Lexeme::is_word) {
            Some(lemma) => {
                cursor.next()?;
                Some(lemma.text)
            }
            None => None,
        };
        cursor.expect_close()?;
        if label == EMPTY_ELEMENT {
            return Ok(false);
        }
        builder.token(label, word.text, lemma);
        return Ok(true);
    }

    if builder.depth() >= MAX_DEPTH {
        return Err(TreeError::TooDeep { limit: MAX_DEPTH, offset: open.offset });
    }

    let (category, function) = split_label(label);
    builder.open(category, function);
    let mut read_any = false;
    let mut kept = false;
    while cursor.peek().is_some_and(|l| l.is_open()) {
        read_any = true;
        kept |= read_node(cursor, builder, false)?;
    }
    cursor.expect_close()?;

    if read_any && !kept {
        builder.discard();
        return Ok(false);
    }
    builder.close()?;
    Ok(true)
}

fn split_label(label: &str) -> (&str, Option<&str>) {
    if label.starts_with('-') {
        return (label, None);
    }
    match label.split_once('-') {
        Some((category, function)) if !function.is_empty() => (category, Some(function)),
        _ => (label, None),
    }
}

fn unexpected(lexeme: Lexeme<'_>) -> TreeError {
    TreeError::UnexpectedToken { found: lexeme.text.to_string(), offset: lexeme.offset }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_a_question() {
        let tree = read_tree(
            "(ROOT
               (SBARQ
                 (WHNP (WDT What) (NN country) (POS 's))
                 (SQ (VBZ is) (NP (NNP Tirana)))
                 (. ?)))",
        )
        .unwrap();
        assert_eq!(tree.text(), "What country's is Tirana?");
        assert_eq!(tree.label(tree.root()), "ROOT");
        assert_eq!(tree.tokens().len(), 6);
        assert_eq!(tree.to_string(), "(ROOT (SBARQ (WHNP (WDT What) (NN country) (POS 's)) (SQ (VBZ is) (NP (NNP Tirana))) (. ?)))");
    }

    #[test]
    fn unlabelled_outer_bracket_is_root() {
        let tree = read_tree("( (S (NP-SBJ (PRP I)) (VP (VBP know))))").unwrap();
        assert_eq!(tree.to_string(), "(ROOT (S (NP-SBJ (PRP I)) (VP (VBP know))))");

        let np = tree.node(tree.tokens()[0]).parent().unwrap();
        let np = tree.node(np).as_constituent().unwrap();
        assert_eq!(np.category, "NP");
        assert_eq!(np.function.as_deref(), Some("SBJ"));
    }

    #[test]
    fn explicit_lemmas_and_dash_labels() {
        let tree = read_tree("(ROOT (NP (-LRB- -LRB-) (NNS Chocolates chocolate) (-RRB- -RRB-)))").unwrap();
        let tokens = tree.tokens();
        assert_eq!(tree.label(tokens[0]), "-LRB-");
        assert_eq!(tree.node(tokens[1]).as_token().unwrap().lemma, "chocolate");
        assert_eq!(tree.node(tokens[2]).as_token().unwrap().lemma, "-rrb-");
    }

    #[test]
    fn empty_elements_are_dropped() {
        let tree = read_tree("( (S (NP-SBJ (-NONE- *)) (VP (VB Define) (NP (NN entropy)))))").unwrap();
        assert_eq!(tree.text(), "Define entropy");
        assert_eq!(tree.tokens().len(), 2);
        assert_eq!(tree.to_string(), "(ROOT (S (VP (VB Define) (NP (NN entropy)))))");

        let tree = read_tree("(ROOT (SBARQ (WHNP-1 (WP What)) (SQ (VBZ is) (NP-PRD (-NONE- *T*-1))) (. ?)))").unwrap();
        assert_eq!(tree.text(), "What is?");
        assert_eq!(tree.to_string(), "(ROOT (SBARQ (WHNP-1 (WP What)) (SQ (VBZ is)) (. ?)))");

        assert_eq!(read_tree("( (S (-NONE- *)))").unwrap_err(), TreeError::EmptyInput);
    }

    #[test]
    fn nesting_depth_is_capped() {
        let nested = |depth: usize| format!("(ROOT {}(NN x){})", "(NP ".repeat(depth), ")".repeat(depth + 1));

        let tree = read_tree(&nested(MAX_DEPTH - 1)).unwrap();
        assert_eq!(tree.text(), "x");

        let input = nested(5000);
        let offset = 6 + 4 * (MAX_DEPTH - 1);
        assert_eq!(read_tree(&input).unwrap_err(), TreeError::TooDeep { limit: MAX_DEPTH, offset });
    }

    #[test]
    fn malformed_input() {
        assert_eq!(read_tree("   ").unwrap_err(), TreeError::EmptyInput);
        assert_eq!(read_tree("(ROOT (NN dog)").unwrap_err(), TreeError::Unbalanced { offset: 14 });
        assert_eq!(
            read_tree("(ROOT (NN dog)))").unwrap_err(),
            TreeError::TrailingInput { offset: 15 }
        );
        assert_eq!(
            read_tree("ROOT (NN dog)").unwrap_err(),
            TreeError::UnexpectedToken { found: "ROOT".into(), offset: 0 }
        );
        assert_eq!(read_tree("(ROOT (NP))").unwrap_err(), TreeError::EmptyConstituent { category: "NP".into() });
        assert_eq!(read_tree("(ROOT ())").unwrap_err(), TreeError::EmptyConstituent { category: String::new() });
    }
}
