// Editor/Store: the only writer of the résumé document.
// Handlers take the write lock, mutate through ResumeStore, then persist the snapshot
// and notify the export scheduler. Renderers only ever see snapshots.

pub mod demo;
pub mod handlers;
pub mod store;

use thiserror::Error;
use uuid::Uuid;

pub use store::{PersonalDetailsPatch, ResumeStore, SkillList};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No {what} entry with id {id}")]
    NotFound { what: &'static str, id: Uuid },

    #[error("'{0}' is not in the list")]
    Missing(String),

    #[error("Cannot move item {from} to {to} in a list of {len}")]
    IndexOutOfRange { from: usize, to: usize, len: usize },

    #[error("{0}")]
    Invalid(String),
}
