//! Debounced background export.
//!
//! Every document change bumps a generation counter and replaces the pending task.
//! The task waits out the debounce window, renders on the blocking pool and publishes
//! only if its generation is still the latest. Bursts of edits therefore produce a
//! single render, and a slow render that finishes after a newer edit is dropped.
//!
//! Status is broadcast on a `watch` channel so handlers can read it without locking.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::export::artifacts::{ArtifactRef, ArtifactRegistry};
use crate::export::pipeline::{render_off_thread, PdfRenderer, RenderedArtifact};
use crate::export::ExportError;
use crate::models::ResumeDocument;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ExportStatus {
    /// Nothing has been requested yet.
    Idle,
    /// Waiting out the debounce window.
    Pending { generation: u64 },
    Generating { generation: u64 },
    Ready { generation: u64, artifact: ArtifactRef },
    /// Recoverable; `retry` regenerates the last snapshot.
    Failed { generation: u64, message: String },
}

#[derive(Clone)]
pub struct ExportScheduler {
    inner: Arc<Inner>,
}

struct Inner {
    renderer: Arc<dyn PdfRenderer>,
    artifacts: ArtifactRegistry,
    debounce: Duration,
    generation: AtomicU64,
    pending: Mutex<Option<JoinHandle<()>>>,
    snapshot: Mutex<Option<ResumeDocument>>,
    status: watch::Sender<ExportStatus>,
}

impl ExportScheduler {
    pub fn new(renderer: Arc<dyn PdfRenderer>, debounce: Duration) -> Self {
        let (status, _) = watch::channel(ExportStatus::Idle);
        Self {
            inner: Arc::new(Inner {
                renderer,
                artifacts: ArtifactRegistry::new(),
                debounce,
                generation: AtomicU64::new(0),
                pending: Mutex::new(None),
                snapshot: Mutex::new(None),
                status,
            }),
        }
    }

    /// Schedules a debounced export of `resume`, superseding any pending one.
    pub fn notify_changed(&self, resume: ResumeDocument) -> u64 {
        self.schedule(resume, self.inner.debounce)
    }

    /// Regenerates the last snapshot immediately.
    pub fn retry(&self) -> Result<u64, ExportError> {
        let snapshot = self
            .inner
            .snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(ExportError::NothingToRetry)?;
        info!("Retrying export");
        Ok(self.schedule(snapshot, Duration::ZERO))
    }

    /// Renders `resume` right now, outside the debounce flow. Used for downloads.
    pub async fn render_now(&self, resume: ResumeDocument) -> Result<RenderedArtifact, ExportError> {
        render_off_thread(Arc::clone(&self.inner.renderer), resume).await
    }

    pub fn status(&self) -> ExportStatus {
        self.inner.status.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ExportStatus> {
        self.inner.status.subscribe()
    }

    pub fn artifacts(&self) -> &ArtifactRegistry {
        &self.inner.artifacts
    }

    fn schedule(&self, resume: ResumeDocument, delay: Duration) -> u64 {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *self
            .inner
            .snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(resume.clone());
        self.inner
            .status
            .send_replace(ExportStatus::Pending { generation });

        let inner = Arc::clone(&self.inner);
        let handle = tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            inner.run(generation, resume).await;
        });

        let previous = self
            .inner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }
        debug!(generation, "Export scheduled");
        generation
    }
}

impl Inner {
    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    async fn run(self: Arc<Self>, generation: u64, resume: ResumeDocument) {
        if !self.is_current(generation) {
            return;
        }
        self.status
            .send_replace(ExportStatus::Generating { generation });

        let result = render_off_thread(Arc::clone(&self.renderer), resume).await;

        // Check and publish under the channel lock so a newer edit cannot interleave.
        let mut result = Some(result);
        let published = self.status.send_if_modified(|status| {
            if !self.is_current(generation) {
                return false;
            }
            match result.take() {
                Some(Ok(artifact)) => {
                    let artifact = self.artifacts.publish(artifact);
                    info!(generation, artifact_id = %artifact.id, pages = artifact.pages, "Export ready");
                    *status = ExportStatus::Ready {
                        generation,
                        artifact,
                    };
                }
                Some(Err(e)) => {
                    warn!(generation, error = %e, "Export failed");
                    *status = ExportStatus::Failed {
                        generation,
                        message: e.to_string(),
                    };
                }
                None => return false,
            }
            true
        });

        if !published {
            debug!(generation, "Discarded stale export result");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ScaleFactors;
    use crate::render::RenderError;
    use bytes::Bytes;
    use std::sync::atomic::{AtomicBool, AtomicUsize};

    const DEBOUNCE: Duration = Duration::from_millis(500);

    #[derive(Default)]
    struct FakeRenderer {
        calls: AtomicUsize,
        fail: AtomicBool,
    }

    impl PdfRenderer for FakeRenderer {
        fn render(&self, resume: &ResumeDocument) -> Result<RenderedArtifact, RenderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(RenderError::UnsupportedImage("image/bmp".to_string()));
            }
            Ok(RenderedArtifact {
                bytes: Bytes::from(resume.personal_details.full_name.clone().into_bytes()),
                filename: "Test_CV.pdf".to_string(),
                pages: 1,
                scale: ScaleFactors::identity(),
            })
        }
    }

    fn doc(name: &str) -> ResumeDocument {
        let mut doc = ResumeDocument::empty();
        doc.personal_details.full_name = name.to_string();
        doc
    }

    fn scheduler() -> (ExportScheduler, Arc<FakeRenderer>) {
        let renderer = Arc::new(FakeRenderer::default());
        (ExportScheduler::new(renderer.clone(), DEBOUNCE), renderer)
    }

    async fn settled(scheduler: &ExportScheduler) -> ExportStatus {
        let mut rx = scheduler.subscribe();
        let status = rx
            .wait_for(|s| matches!(s, ExportStatus::Ready { .. } | ExportStatus::Failed { .. }))
            .await
            .unwrap()
            .clone();
        status
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_of_edits_renders_once() {
        let (scheduler, renderer) = scheduler();
        for i in 0..5 {
            scheduler.notify_changed(doc(&format!("edit {i}")));
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        let ExportStatus::Ready { generation, artifact } = settled(&scheduler).await else {
            panic!("expected ready");
        };
        assert_eq!(generation, 5);
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 1);
        let stored = scheduler.artifacts().get(artifact.id).unwrap();
        assert_eq!(stored.bytes, Bytes::from_static(b"edit 4"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_is_pending_during_debounce() {
        let (scheduler, renderer) = scheduler();
        assert_eq!(scheduler.status(), ExportStatus::Idle);
        scheduler.notify_changed(doc("Ada"));
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(scheduler.status(), ExportStatus::Pending { generation: 1 });
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_is_recoverable_with_retry() {
        let (scheduler, renderer) = scheduler();
        renderer.fail.store(true, Ordering::SeqCst);
        scheduler.notify_changed(doc("Ada"));
        let status = settled(&scheduler).await;
        assert!(matches!(status, ExportStatus::Failed { generation: 1, .. }));
        assert_eq!(scheduler.artifacts().live_count(), 0);

        renderer.fail.store(false, Ordering::SeqCst);
        let generation = scheduler.retry().unwrap();
        assert_eq!(generation, 2);
        let status = settled(&scheduler).await;
        assert!(matches!(status, ExportStatus::Ready { generation: 2, .. }));
    }

    #[tokio::test]
    async fn test_retry_without_snapshot_is_an_error() {
        let (scheduler, _) = scheduler();
        assert!(matches!(scheduler.retry(), Err(ExportError::NothingToRetry)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_result_is_discarded() {
        let (scheduler, renderer) = scheduler();
        scheduler.notify_changed(doc("old"));
        scheduler.notify_changed(doc("new"));

        // A run for the superseded generation publishes nothing.
        Arc::clone(&scheduler.inner).run(1, doc("old")).await;
        assert_eq!(scheduler.artifacts().live_count(), 0);
        assert_eq!(scheduler.status(), ExportStatus::Pending { generation: 2 });
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 0);

        let ExportStatus::Ready { artifact, .. } = settled(&scheduler).await else {
            panic!("expected ready");
        };
        let stored = scheduler.artifacts().get(artifact.id).unwrap();
        assert_eq!(stored.bytes, Bytes::from_static(b"new"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_export_releases_previous_artifact() {
        let (scheduler, _) = scheduler();
        scheduler.notify_changed(doc("first"));
        let ExportStatus::Ready { artifact: first, .. } = settled(&scheduler).await else {
            panic!("expected ready");
        };

        scheduler.notify_changed(doc("second"));
        let ExportStatus::Ready { artifact: second, .. } = settled(&scheduler).await else {
            panic!("expected ready");
        };

        assert_ne!(first.id, second.id);
        assert!(scheduler.artifacts().get(first.id).is_none());
        assert_eq!(scheduler.artifacts().live_count(), 1);
    }

    #[tokio::test]
    async fn test_render_now_bypasses_debounce() {
        let (scheduler, renderer) = scheduler();
        let artifact = scheduler.render_now(doc("Ada")).await.unwrap();
        assert_eq!(artifact.bytes, Bytes::from_static(b"Ada"));
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.status(), ExportStatus::Idle);
    }
}
