//! Output sink and focus diagnostic.

use crate::{Headword, NodeId, ParseTree};

/// Receives the resolved headword of a question.
pub trait HeadwordSink {
    fn write_headword(&mut self, headword: Headword);
}

/// Per-question result store.
///
/// Holds at most one headword; later writes are ignored. The focus is an
/// externally computed annotation kept here only for [`crate::compare_focus`].
#[derive(Debug, Clone, Default)]
pub struct Annotations {
    headword: Option<Headword>,
    focus: Option<NodeId>,
}

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_focus(focus: NodeId) -> Self {
        Annotations { headword: None, focus: Some(focus) }
    }

    pub fn headword(&self) -> Option<Headword> {
        self.headword
    }

    pub fn focus(&self) -> Option<NodeId> {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Option<NodeId>) {
        self.focus = focus;
    }
}

impl HeadwordSink for Annotations {
    fn write_headword(&mut self, headword: Headword) {
        if let Some(existing) = self.headword {
            tracing::debug!(
                kept = existing.token.index(),
                ignored = headword.token.index(),
                "headword already written"
            );
            return;
        }
        self.headword = Some(headword);
    }
}

/// Agreement between the focus annotation and the headword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusCheck {
    BothMissing,
    Agree,
    /// Texts differ (case-insensitively), or only one of them exists.
    Disagree { focus: Option<String>, headword: Option<String> },
}

pub(crate) fn check_focus(tree: &ParseTree, annotations: &Annotations) -> FocusCheck {
    let text = |id: NodeId| tree.get(id).map(|_| tree.text_of(id).to_string());
    let focus = annotations.focus.and_then(text);
    let headword = annotations.headword.and_then(|h| text(h.token));

    match (focus, headword) {
        (None, None) => {
            tracing::debug!(question = tree.text(), "both focus and headword are missing");
            FocusCheck::BothMissing
        }
        (Some(f), Some(h)) if f.to_lowercase() == h.to_lowercase() => FocusCheck::Agree,
        (focus, headword) => {
            tracing::debug!(question = tree.text(), ?focus, ?headword, "focus differs from headword");
            FocusCheck::Disagree { focus, headword }
        }
    }
}
