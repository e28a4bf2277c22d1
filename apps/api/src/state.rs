use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::editor::ResumeStore;
use crate::export::ExportScheduler;
use crate::models::ResumeDocument;
use crate::storage::ResumeRepository;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single résumé document. Handlers never hold the lock across rendering.
    pub store: Arc<RwLock<ResumeStore>>,
    pub repository: Arc<dyn ResumeRepository>,
    pub exports: ExportScheduler,
    pub config: Config,
    /// Set when saved data could not be restored at startup; shown to the user.
    pub storage_warning: Option<String>,
}

impl AppState {
    pub fn new(
        resume: ResumeDocument,
        repository: Arc<dyn ResumeRepository>,
        exports: ExportScheduler,
        config: Config,
        storage_warning: Option<String>,
    ) -> Self {
        Self {
            store: Arc::new(RwLock::new(ResumeStore::new(resume))),
            repository,
            exports,
            config,
            storage_warning,
        }
    }

    pub async fn snapshot(&self) -> ResumeDocument {
        self.store.read().await.snapshot()
    }
}
