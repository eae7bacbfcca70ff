//! Model download coordination.
//!
//! [`DownloadCoordinator`] is the single mutation path for an engine's
//! download state. The `NotStarted | Failed -> Downloading` transition is
//! claimed atomically through the registry, which guarantees at most one
//! in-flight download per engine; a second caller gets
//! `DownloadInProgress` instead of a duplicate fetch.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::descriptor::DownloadStatus;
use crate::domain::error::Result;
use crate::registry::EngineRegistry;

pub struct DownloadCoordinator {
    registry: Arc<EngineRegistry>,
}

impl DownloadCoordinator {
    pub fn new(registry: Arc<EngineRegistry>) -> Self {
        Self { registry }
    }

    /// Fetch models for `name`, driving the engine's download routine to a
    /// terminal state.
    ///
    /// Caller-input problems are raised: `EngineNotFound` for an unknown
    /// name, `DownloadNotApplicable` when the engine has nothing to fetch,
    /// `DownloadInProgress` when another caller already holds the download.
    /// A failure of the download itself is captured on the descriptor
    /// (`Failed` plus `download_error`) and reported as the returned
    /// status, never raised. An engine that is already `Ready` is a no-op.
    pub async fn trigger_download(&self, name: &str) -> Result<DownloadStatus> {
        if !self.registry.claim_download(name).await? {
            return Ok(DownloadStatus::Ready);
        }

        let engine = self.registry.handle(name).await?;
        info!(engine = %name, "starting model download");

        let outcome = engine.download().await;
        let status = match &outcome {
            Ok(()) => {
                info!(engine = %name, "model download finished");
                DownloadStatus::Ready
            }
            Err(e) => {
                warn!(engine = %name, error = %e, "model download failed");
                DownloadStatus::Failed
            }
        };
        self.registry.finish_download(name, outcome).await;
        Ok(status)
    }
}
