//! Local persistence of the résumé document.
//!
//! One JSON file per data directory, written atomically: the new content goes to a
//! temporary file in the same directory and is renamed over the old one, so a crash
//! mid-write leaves the previous version intact.
//!
//! Loading fails closed. A corrupt file or an unknown schema version yields a fresh
//! document plus a warning the caller must surface; it is never silently discarded.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::ResumeDocument;

pub const STORAGE_FILE: &str = "cv-constructor-resume.json";
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored resume is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Stored resume has unsupported schema version {found}")]
    UnsupportedVersion { found: u32 },

    #[error("Storage task failed: {0}")]
    Task(String),
}

/// On-disk envelope around the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredResume {
    pub schema_version: u32,
    pub id: Uuid,
    pub last_modified: DateTime<Utc>,
    pub resume: ResumeDocument,
}

impl StoredResume {
    pub fn wrap(resume: &ResumeDocument) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            id: resume.id,
            last_modified: resume.updated_at,
            resume: resume.clone(),
        }
    }
}

#[async_trait]
pub trait ResumeRepository: Send + Sync {
    /// `Ok(None)` when nothing has been saved yet.
    async fn load(&self) -> Result<Option<ResumeDocument>, StorageError>;
    async fn save(&self, resume: &ResumeDocument) -> Result<(), StorageError>;
}

/// Stores the document as `<data_dir>/cv-constructor-resume.json`.
#[derive(Debug, Clone)]
pub struct FileRepository {
    dir: PathBuf,
}

impl FileRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(STORAGE_FILE)
    }
}

fn decode(raw: &[u8]) -> Result<ResumeDocument, StorageError> {
    // Check the version before the full shape so a future format reports as such.
    let value: serde_json::Value = serde_json::from_slice(raw)?;
    let found = value
        .get("schemaVersion")
        .and_then(serde_json::Value::as_u64)
        .unwrap_or(0);
    if found != u64::from(SCHEMA_VERSION) {
        return Err(StorageError::UnsupportedVersion {
            found: u32::try_from(found).unwrap_or(u32::MAX),
        });
    }
    let stored: StoredResume = serde_json::from_value(value)?;
    let mut resume = stored.resume;
    let renamed = resume.dedupe_ids();
    if renamed > 0 {
        warn!(renamed, "Stored resume had repeated entry ids; assigned fresh ones");
    }
    Ok(resume)
}

fn write_atomically(dir: &Path, target: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    std::fs::create_dir_all(dir)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(target).map_err(|e| StorageError::Io(e.error))?;
    Ok(())
}

#[async_trait]
impl ResumeRepository for FileRepository {
    async fn load(&self) -> Result<Option<ResumeDocument>, StorageError> {
        let path = self.path();
        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        decode(&raw).map(Some)
    }

    async fn save(&self, resume: &ResumeDocument) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(&StoredResume::wrap(resume))?;
        let dir = self.dir.clone();
        let target = self.path();
        tokio::task::spawn_blocking(move || write_atomically(&dir, &target, &bytes))
            .await
            .map_err(|e| StorageError::Task(format!("spawn_blocking failed in save: {e}")))??;
        debug!(path = %self.path().display(), "Saved resume");
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Startup load
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum LoadOutcome {
    /// Nothing stored yet.
    Fresh(ResumeDocument),
    Restored(ResumeDocument),
    /// Stored data was unusable; a fresh document replaces it.
    Recovered { resume: ResumeDocument, reason: String },
}

impl LoadOutcome {
    pub fn into_parts(self) -> (ResumeDocument, Option<String>) {
        match self {
            LoadOutcome::Fresh(resume) | LoadOutcome::Restored(resume) => (resume, None),
            LoadOutcome::Recovered { resume, reason } => (resume, Some(reason)),
        }
    }
}

pub async fn load_or_fresh(repo: &dyn ResumeRepository) -> LoadOutcome {
    match repo.load().await {
        Ok(Some(resume)) => {
            info!(resume_id = %resume.id, "Restored saved resume");
            LoadOutcome::Restored(resume)
        }
        Ok(None) => {
            info!("No saved resume, starting fresh");
            LoadOutcome::Fresh(ResumeDocument::empty())
        }
        Err(e) => {
            warn!(error = %e, "Saved resume is unusable, starting fresh");
            LoadOutcome::Recovered {
                resume: ResumeDocument::empty(),
                reason: format!("Saved data could not be restored: {e}"),
            }
        }
    }
}
