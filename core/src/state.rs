//! Query state and the derived presentation view.
//!
//! The view is never stored; it is recomputed from the state record
//! whenever the renderer asks, so it cannot drift out of sync with the
//! data behind it.

use shared::IbanGeneration;

use crate::directory::BankIdentifierEntry;

/// Maximum number of suggestions the renderer shows at once.
pub const MAX_SUGGESTIONS: usize = 10;

/// Live free-text query state.
#[derive(Debug, Clone, Default)]
pub struct QueryState {
    /// What the user has typed, possibly rewritten to a canonical
    /// completion on submission.
    pub raw_input: String,
    /// Directory-order subsequence of entries matching `raw_input`.
    pub candidates: Vec<BankIdentifierEntry>,
    /// Whether the suggestion list should currently be shown.
    pub suggestions_visible: bool,
}

impl QueryState {
    /// The candidates the renderer actually shows, capped at
    /// [`MAX_SUGGESTIONS`].
    pub fn shown_candidates(&self) -> &[BankIdentifierEntry] {
        let shown = self.candidates.len().min(MAX_SUGGESTIONS);
        &self.candidates[..shown]
    }
}

/// Which of the mutually exclusive surfaces is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// The suggestion list is up.
    Suggesting,
    /// A generated IBAN/BIC pair is on display.
    Result,
    /// A dismissible error message is on display.
    Error,
    /// Nothing to show yet.
    Idle,
}

impl View {
    /// Derive the active view: an error wins over everything, then a
    /// visible non-empty suggestion list, then the last result.
    pub fn derive(
        query: &QueryState,
        result: Option<&IbanGeneration>,
        error: Option<&str>,
    ) -> Self {
        if error.is_some() {
            View::Error
        } else if query.suggestions_visible && !query.candidates.is_empty() {
            View::Suggesting
        } else if result.is_some() {
            View::Result
        } else {
            View::Idle
        }
    }
}
