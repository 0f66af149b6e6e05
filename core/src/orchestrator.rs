//! Generation orchestration.
//!
//! Owns the single state record behind the UI (directory, query,
//! result, error) and applies every event to it as a synchronous
//! transition. The only suspension point is the remote call between
//! [`Orchestrator::begin_submission`] and
//! [`Orchestrator::apply_outcome`].
//!
//! Every dispatch carries a monotonically increasing epoch. An outcome
//! is applied only while its epoch is the newest one handed out, so
//! when submissions overlap the latest submission wins regardless of
//! the order the calls settle in.

use shared::IbanGeneration;
use tracing::{debug, info};

use crate::api::{GenerationOutcome, GenerationParams, GenerationService};
use crate::directory::{BankIdentifierEntry, Directory};
use crate::matcher;
use crate::state::{QueryState, View};

/// One dispatched generation request: the derived parameters plus the
/// epoch guarding its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub epoch: u64,
    pub params: GenerationParams,
}

/// Owns the application state and applies every event to it.
#[derive(Debug, Default)]
pub struct Orchestrator {
    directory: Directory,
    query: QueryState,
    result: Option<IbanGeneration>,
    error: Option<String>,
    /// Epoch of the newest dispatch; outcomes from older ones are stale.
    dispatched: u64,
}

impl Orchestrator {
    pub fn new(directory: Directory) -> Self {
        Self {
            directory,
            ..Default::default()
        }
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn result(&self) -> Option<&IbanGeneration> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The view the renderer should display right now.
    pub fn view(&self) -> View {
        View::derive(&self.query, self.result.as_ref(), self.error.as_deref())
    }

    /// The input changed: refilter candidates, show them, drop any
    /// displayed error. The last result is kept; it is merely hidden
    /// while the suggestions are up.
    pub fn handle_input(&mut self, text: &str) {
        self.query.raw_input = text.to_string();
        self.query.candidates = matcher::filter(&self.directory, text);
        self.query.suggestions_visible = true;
        self.error = None;
    }

    /// Focus/blur visibility hint from the renderer.
    pub fn set_suggestions_visible(&mut self, visible: bool) {
        self.query.suggestions_visible = visible;
    }

    /// Dismiss a displayed error, returning to Idle or Suggesting per
    /// the current input.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Explicit submission (button click or confirm key).
    ///
    /// Parameter derivation, in priority order: the shown suggestion
    /// list's first entry, else the first directory match for the raw
    /// input, else the raw input verbatim as a bank code. Where a match
    /// is used, the input is rewritten to its canonical completion.
    /// The suggestion list collapses afterwards.
    pub fn begin_submission(&mut self) -> Dispatch {
        let params = if let Some(entry) = self.query.shown_candidates().first().cloned() {
            self.query.raw_input = matcher::complete(&self.query.raw_input, &entry);
            GenerationParams {
                bic: entry.code,
                bank_code: String::new(),
                country_code: entry.country_code,
            }
        } else if let Some(entry) = matcher::resolve_first(&self.directory, &self.query.raw_input) {
            self.query.raw_input = matcher::complete(&self.query.raw_input, &entry);
            GenerationParams {
                bic: entry.code,
                bank_code: String::new(),
                country_code: entry.country_code,
            }
        } else {
            GenerationParams {
                bic: String::new(),
                bank_code: self.query.raw_input.clone(),
                country_code: String::new(),
            }
        };

        self.query.candidates.clear();
        self.query.suggestions_visible = false;
        self.dispatch(params)
    }

    /// A suggestion was picked: a submission whose match is forced to
    /// `entry`, dispatching with the BIC alone. The input is rewritten
    /// to the completion and candidates refreshed against it before the
    /// list is hidden.
    pub fn accept_suggestion(&mut self, entry: &BankIdentifierEntry) -> Dispatch {
        let completed = matcher::complete(&self.query.raw_input, entry);
        self.handle_input(&completed);
        self.query.suggestions_visible = false;

        self.dispatch(GenerationParams {
            bic: entry.code.clone(),
            bank_code: String::new(),
            country_code: String::new(),
        })
    }

    fn dispatch(&mut self, params: GenerationParams) -> Dispatch {
        self.dispatched += 1;
        info!(
            "Dispatching generation #{} - bic={:?} bankCode={:?} countryCode={:?}",
            self.dispatched, params.bic, params.bank_code, params.country_code
        );
        Dispatch {
            epoch: self.dispatched,
            params,
        }
    }

    /// Apply a settled generation outcome.
    ///
    /// Outcomes from superseded dispatches are discarded. Afterwards
    /// exactly one of result/error is set; every non-success variant
    /// lands in the error state.
    pub fn apply_outcome(&mut self, epoch: u64, outcome: GenerationOutcome) {
        if epoch != self.dispatched {
            debug!(
                "Discarding stale outcome from dispatch #{} (newest is #{})",
                epoch, self.dispatched
            );
            return;
        }

        match outcome {
            GenerationOutcome::Generated(generation) => {
                info!(
                    "Generated IBAN {} for bank code {}",
                    generation.iban, generation.bankcode
                );
                self.result = Some(generation);
                self.error = None;
            }
            GenerationOutcome::Malformed(raw) => {
                self.result = None;
                self.error = Some(raw);
            }
            GenerationOutcome::ServiceError(message) | GenerationOutcome::Faulted(message) => {
                self.result = None;
                self.error = Some(message);
            }
        }
    }

    /// A submission driven to completion against `service`. For
    /// cooperative callers with no overlapping submissions; racing
    /// callers use the [`begin_submission`]/[`apply_outcome`] pair.
    ///
    /// [`begin_submission`]: Orchestrator::begin_submission
    /// [`apply_outcome`]: Orchestrator::apply_outcome
    pub async fn submit<S: GenerationService>(&mut self, service: &S) {
        let dispatch = self.begin_submission();
        let outcome = service.generate(&dispatch.params).await;
        self.apply_outcome(dispatch.epoch, outcome);
    }

    /// [`Orchestrator::accept_suggestion`] driven to completion against
    /// `service`.
    pub async fn accept<S: GenerationService>(
        &mut self,
        service: &S,
        entry: &BankIdentifierEntry,
    ) {
        let dispatch = self.accept_suggestion(entry);
        let outcome = service.generate(&dispatch.params).await;
        self.apply_outcome(dispatch.epoch, outcome);
    }
}
