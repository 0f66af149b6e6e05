//! Core logic of the IBAN generator client.
//!
//! The crate reconciles free-text input against a cached directory of
//! known bank identifiers, derives the parameters for a remote
//! generation call, and manages the resulting success/error/suggestion
//! states. Rendering is someone else's job: a frontend feeds events in
//! (input changes, submissions, suggestion picks, error dismissals) and
//! reads the active [`state::View`] plus the data behind it back out.

pub mod api;
pub mod directory;
pub mod matcher;
pub mod orchestrator;
pub mod state;

pub use api::{
    ApiClient, ApiError, DirectoryService, GenerationOutcome, GenerationParams, GenerationService,
};
pub use directory::{BankIdentifierEntry, Directory};
pub use orchestrator::{Dispatch, Orchestrator};
pub use state::{QueryState, View, MAX_SUGGESTIONS};
