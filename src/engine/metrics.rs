//! Descent metrics and trace.
//!
//! Tracing events cover the same ground for logs; the step list exists so
//! callers (the CLI report, tests) can inspect a run as data. Steps are only
//! collected when [`crate::Options::trace`] is set.

use super::eligibility::Screening;
use super::overrides::Override;
use crate::error::HeadwordError;
use crate::{Headword, NodeId};
use std::time::Duration;

/// One decision taken while descending the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescentStep {
    /// A non-trivial rule redirected the descent.
    Override { rule: Override, from: NodeId, to: NodeId },
    /// The generic rules picked a head child.
    Rule { from: NodeId, to: NodeId },
    /// A type-word token was redirected to a prepositional phrase.
    PostFix { token: NodeId, target: NodeId },
    /// The post-fix target was already visited; the token is kept.
    PostFixRejected { token: NodeId, target: NodeId },
    /// The search ended without a headword.
    Abort(HeadwordError),
    Resolved(NodeId),
}

#[derive(Debug, Default, Clone)]
pub struct DescentMetrics {
    /// Elapsed time for screening plus descent.
    pub total: Duration,
    /// Number of descent loop iterations.
    pub iterations: usize,
    pub steps: Vec<DescentStep>,
}

/// Generator output bundled with timing information.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub screening: Screening,
    pub headword: Option<Headword>,
    pub metrics: DescentMetrics,
}
