//! Tree descent driver.
//!
//! ```text
//! node = ROOT
//! loop
//!   ├─ override fires?         node = adjusted, continue
//!   ├─ apply_rules(node)       miss / no match -> no headword
//!   ├─ constituent             node = head, continue
//!   └─ token
//!        ├─ type word? post_operation_fix
//!        │     ├─ constituent  node = pp, continue
//!        │     └─ token        use it
//!        └─ emit headword
//! ```
//!
//! Each step moves strictly down the tree, except the post-fix jump, which
//! lands on a PP that is not an ancestor of the current token. The generator
//! additionally refuses to adopt a post-fix target twice.

use super::eligibility::{Screening, screen};
use super::generic::apply_rules;
use super::metrics::{DescentMetrics, DescentStep, RunResult};
use super::overrides::apply_non_trivial_rules;
use super::post_fix::post_operation_fix;
use super::sink::HeadwordSink;
use crate::error::HeadwordError;
use crate::rules::{DEFAULT_RULES, DEFAULT_TYPE_WORDS, RuleTable, TypeWords};
use crate::{Headword, HeadwordSource, NodeId, Options, ParseNode, ParseTree};
use std::collections::HashSet;
use std::time::Instant;

/// Resolves question headwords with a fixed rule configuration.
///
/// The generator only borrows its tables, so one instance (or many, over the
/// same tables) can serve any number of questions, including in parallel.
#[derive(Debug, Clone)]
pub struct HeadwordGenerator<'a> {
    rules: &'a RuleTable,
    type_words: &'a TypeWords,
    options: Options,
}

impl HeadwordGenerator<'static> {
    /// Generator over the default rule table and type-word set.
    pub fn new(options: Options) -> Self {
        HeadwordGenerator { rules: &*DEFAULT_RULES, type_words: &*DEFAULT_TYPE_WORDS, options }
    }
}

impl Default for HeadwordGenerator<'static> {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl<'a> HeadwordGenerator<'a> {
    pub fn with_rules(rules: &'a RuleTable, type_words: &'a TypeWords, options: Options) -> Self {
        HeadwordGenerator { rules, type_words, options }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Run the eligibility filter over the tree's tokens.
    pub fn screen(&self, tree: &ParseTree) -> Screening {
        screen(tree, &tree.tokens())
    }

    /// Screen, descend if needed, and write the headword (if any) to `sink`.
    pub fn run<S: HeadwordSink + ?Sized>(&self, tree: &ParseTree, sink: &mut S) -> Result<RunResult, HeadwordError> {
        let start = Instant::now();
        let mut metrics = DescentMetrics::default();

        let screening = self.screen(tree);
        let headword = match screening {
            Screening::Implicit(token) => {
                Some(Headword { token, span: tree.node(token).span(), source: HeadwordSource::Implicit })
            }
            Screening::TooShort => None,
            Screening::ApplyRules => self.descend(tree, &mut metrics)?,
        };

        if let Some(headword) = headword {
            tracing::debug!(word = tree.text_of(headword.token), source = ?headword.source, "headword");
            sink.write_headword(headword);
        }

        metrics.total = start.elapsed();
        Ok(RunResult { screening, headword, metrics })
    }

    /// Walk the tree from `ROOT` down to a single token.
    ///
    /// Rule-table misses and unmatched priority lists end the search with
    /// `Ok(None)`; only structural violations are returned as errors.
    pub fn descend(&self, tree: &ParseTree, metrics: &mut DescentMetrics) -> Result<Option<Headword>, HeadwordError> {
        let root = tree.constituent(tree.root())?;
        if root.category != "ROOT" {
            return Err(HeadwordError::structural(format!("tree is rooted at {}, expected ROOT", root.category)));
        }

        let mut node = tree.root();
        let mut source = HeadwordSource::Rules;
        let mut fix_targets: HashSet<NodeId> = HashSet::new();

        loop {
            metrics.iterations += 1;
            tracing::trace!(category = tree.label(node), text = tree.text_of(node), "descend");

            if let Some((rule, adjusted)) = apply_non_trivial_rules(tree, node)? {
                tracing::debug!(?rule, from = tree.label(node), to = tree.label(adjusted), "override");
                self.record(metrics, DescentStep::Override { rule, from: node, to: adjusted });
                node = adjusted;
                continue;
            }

            let head = match apply_rules(tree, self.rules, node) {
                Ok(head) => head,
                Err(err) if err.is_recoverable() => {
                    tracing::debug!(%err, question = tree.text(), "no headword");
                    self.record(metrics, DescentStep::Abort(err));
                    return Ok(None);
                }
                Err(err) => return Err(err),
            };
            self.record(metrics, DescentStep::Rule { from: node, to: head });

            let token = match tree.node(head) {
                ParseNode::Constituent(_) => {
                    node = head;
                    continue;
                }
                ParseNode::Token(token) => token,
            };

            let mut resolved = head;
            if self.type_words.contains(&token.lemma) {
                match post_operation_fix(tree, head, self.options.post_fix_levels)? {
                    Some(target) if tree.node(target).is_token() => {
                        tracing::debug!(from = tree.text_of(head), to = tree.text_of(target), "post-fix token");
                        self.record(metrics, DescentStep::PostFix { token: head, target });
                        resolved = target;
                        source = HeadwordSource::PostFix;
                    }
                    Some(target) if fix_targets.insert(target) => {
                        tracing::debug!(from = tree.text_of(head), to = tree.text_of(target), "post-fix phrase");
                        self.record(metrics, DescentStep::PostFix { token: head, target });
                        node = target;
                        source = HeadwordSource::PostFix;
                        continue;
                    }
                    Some(target) => {
                        tracing::debug!(word = tree.text_of(head), "post-fix target already visited");
                        self.record(metrics, DescentStep::PostFixRejected { token: head, target });
                    }
                    None => {}
                }
            }

            self.record(metrics, DescentStep::Resolved(resolved));
            return Ok(Some(Headword { token: resolved, span: tree.node(resolved).span(), source }));
        }
    }

    fn record(&self, metrics: &mut DescentMetrics, step: DescentStep) {
        if self.options.trace {
            metrics.steps.push(step);
        }
    }
}
