//! In-memory registry of published export artifacts.
//!
//! Each artifact is reachable through a transient URL until it is released. Release
//! happens exactly once: either explicitly (the consuming view is gone) or when a newer
//! artifact supersedes it.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::export::RenderedArtifact;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtifactRef {
    pub id: Uuid,
    pub url: String,
    pub filename: String,
    pub pages: usize,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct StoredArtifact {
    pub reference: ArtifactRef,
    pub bytes: Bytes,
}

#[derive(Debug, Default)]
struct Registry {
    live: HashMap<Uuid, StoredArtifact>,
    current: Option<Uuid>,
}

#[derive(Debug, Default)]
pub struct ArtifactRegistry {
    inner: Mutex<Registry>,
}

impl ArtifactRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores `artifact` as the current one and releases whatever it supersedes.
    pub fn publish(&self, artifact: RenderedArtifact) -> ArtifactRef {
        let id = Uuid::new_v4();
        let reference = ArtifactRef {
            id,
            url: format!("/api/v1/exports/{id}"),
            filename: artifact.filename,
            pages: artifact.pages,
            created_at: Utc::now(),
        };

        let mut registry = self.lock();
        if let Some(previous) = registry.current.replace(id) {
            if registry.live.remove(&previous).is_some() {
                debug!(artifact_id = %previous, "Released superseded export artifact");
            }
        }
        registry.live.insert(
            id,
            StoredArtifact {
                reference: reference.clone(),
                bytes: artifact.bytes,
            },
        );
        reference
    }

    pub fn get(&self, id: Uuid) -> Option<StoredArtifact> {
        self.lock().live.get(&id).cloned()
    }

    #[cfg(test)]
    pub fn current(&self) -> Option<ArtifactRef> {
        let registry = self.lock();
        registry
            .current
            .and_then(|id| registry.live.get(&id))
            .map(|a| a.reference.clone())
    }

    /// Returns `true` the first time an id is released and `false` afterwards.
    pub fn release(&self, id: Uuid) -> bool {
        let mut registry = self.lock();
        let released = registry.live.remove(&id).is_some();
        if registry.current == Some(id) {
            registry.current = None;
        }
        if released {
            debug!(artifact_id = %id, "Released export artifact");
        }
        released
    }

    pub fn live_count(&self) -> usize {
        self.lock().live.len()
    }
}
