use crate::engine::{self, Annotations, DescentStep, FocusCheck, HeadwordGenerator, HeadwordSink, Screening};
use crate::error::{Error, HeadwordError};
use crate::reader::read_tree;
use crate::{Headword, ParseTree};
use std::time::Duration;

/// Options that affect headword resolution.
#[derive(Debug, Clone)]
pub struct Options {
    /// How many ancestors of a type-word headword the post-operation fix
    /// inspects for a prepositional phrase.
    pub post_fix_levels: usize,
    /// Collect a [`DescentStep`] trace (see [`QuestionAnalysis::steps`]).
    pub trace: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options { post_fix_levels: 2, trace: false }
    }
}

/// Result from [`find_headword_with`] and [`analyze`].
#[derive(Debug, Clone)]
pub struct QuestionAnalysis {
    /// The question text covered by the tree.
    pub text: String,
    pub screening: Screening,
    pub headword: Option<Headword>,
    /// Text of the headword token.
    pub headword_text: Option<String>,
    /// Number of descent iterations (zero when the rules were not applied).
    pub iterations: usize,
    /// Descent trace; empty unless [`Options::trace`] is set.
    pub steps: Vec<DescentStep>,
    /// Total elapsed time spent screening + descending.
    pub elapsed: Duration,
}

/// Find the headword of `tree` with the default rules and [`Options`].
///
/// # Example
/// ```
/// use headword::{find_headword, reader::read_tree};
///
/// let tree = read_tree(
///     "(ROOT (SBARQ (WHNP (WDT Which) (NN country)) (SQ (VBP are) (NP (NNP Godiva) (NNS chocolates)) (ADVP (IN from))) (. ?)))",
/// )
/// .unwrap();
/// let headword = find_headword(&tree).unwrap().unwrap();
/// assert_eq!(tree.text_of(headword.token), "country");
/// ```
pub fn find_headword(tree: &ParseTree) -> Result<Option<Headword>, HeadwordError> {
    let mut annotations = Annotations::new();
    annotate(tree, &mut annotations)?;
    Ok(annotations.headword())
}

/// Find the headword of `tree` with the default rules and the given `options`.
pub fn find_headword_with(tree: &ParseTree, options: &Options) -> Result<QuestionAnalysis, HeadwordError> {
    let generator = HeadwordGenerator::new(options.clone());
    let mut annotations = Annotations::new();
    let run = generator.run(tree, &mut annotations)?;

    Ok(QuestionAnalysis {
        text: tree.text().to_string(),
        screening: run.screening,
        headword: run.headword,
        headword_text: run.headword.map(|h| tree.text_of(h.token).to_string()),
        iterations: run.metrics.iterations,
        steps: run.metrics.steps,
        elapsed: run.metrics.total,
    })
}

/// Read a bracketed tree and find its headword.
pub fn analyze(brackets: &str, options: &Options) -> Result<(ParseTree, QuestionAnalysis), Error> {
    let tree = read_tree(brackets)?;
    let analysis = find_headword_with(&tree, options)?;
    Ok((tree, analysis))
}

/// Resolve the headword of `tree` and write it into `sink`.
pub fn annotate<S: HeadwordSink + ?Sized>(tree: &ParseTree, sink: &mut S) -> Result<(), HeadwordError> {
    HeadwordGenerator::default().run(tree, sink)?;
    Ok(())
}

/// Compare a separately computed focus annotation with the headword.
///
/// Diagnostic only: the outcome is logged at debug level and returned, the
/// annotations are left untouched.
pub fn compare_focus(tree: &ParseTree, annotations: &Annotations) -> FocusCheck {
    engine::check_focus(tree, annotations)
}
