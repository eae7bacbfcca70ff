//! Engine registry: which engines are usable right now.
//!
//! The registry exclusively owns every [`EngineDescriptor`]. Descriptors
//! are written whole under one lock, so readers never observe a
//! half-written descriptor. After initialization the only mutable field is
//! the download state, and only the download coordinator writes it.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::domain::descriptor::{DownloadStatus, EngineDescriptor};
use crate::domain::error::{DocvertError, Result};
use crate::engine::{Engine, ProbeReport};

struct EngineEntry {
    engine: Arc<dyn Engine>,
    descriptor: EngineDescriptor,
}

/// Registry of extraction engines keyed by name.
///
/// Entries are created once by [`EngineRegistry::probe_all`] and never
/// added or removed afterwards; [`EngineRegistry::reprobe`] refreshes the
/// availability fields in place.
pub struct EngineRegistry {
    entries: RwLock<BTreeMap<String, EngineEntry>>,
}

impl EngineRegistry {
    /// Probe every engine concurrently and build the registry.
    ///
    /// Never raises for an engine problem: a probe failure becomes a
    /// descriptor with `available = false` and the captured message.
    pub async fn probe_all(engines: Vec<Arc<dyn Engine>>) -> Self {
        let reports = probe_engines(&engines).await;

        let mut entries = BTreeMap::new();
        for (engine, report) in engines.into_iter().zip(reports) {
            let name = engine.name().to_string();
            let descriptor = EngineDescriptor::from_probe(
                &name,
                report.available,
                report.error,
                report.requires_download,
            );
            if descriptor.available {
                info!(engine = %name, "registered engine");
            } else {
                warn!(
                    engine = %name,
                    error = descriptor.error.as_deref().unwrap_or(""),
                    "engine is not available"
                );
            }
            entries.insert(name, EngineEntry { engine, descriptor });
        }

        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Re-run every engine's capability probe on demand.
    ///
    /// Download state is preserved for engines that still require a
    /// download, keeping the download coordinator the single writer of
    /// that field.
    pub async fn reprobe(&self) {
        let engines: Vec<Arc<dyn Engine>> = {
            let entries = self.entries.read().await;
            entries.values().map(|e| Arc::clone(&e.engine)).collect()
        };
        let reports = probe_engines(&engines).await;

        let mut entries = self.entries.write().await;
        for (engine, report) in engines.iter().zip(reports) {
            let name = engine.name().to_string();
            let Some(entry) = entries.get_mut(&name) else {
                continue;
            };
            let mut descriptor = EngineDescriptor::from_probe(
                &name,
                report.available,
                report.error,
                report.requires_download,
            );
            if descriptor.requires_download
                && entry.descriptor.download_status != DownloadStatus::NotRequired
            {
                descriptor.download_status = entry.descriptor.download_status;
                descriptor.download_error = entry.descriptor.download_error.clone();
            }
            entry.descriptor = descriptor;
        }
    }

    /// Current state of every engine, in stable name order.
    pub async fn snapshot(&self) -> Vec<EngineDescriptor> {
        let entries = self.entries.read().await;
        entries.values().map(|e| e.descriptor.clone()).collect()
    }

    /// Current state of one engine.
    pub async fn get(&self, name: &str) -> Result<EngineDescriptor> {
        let entries = self.entries.read().await;
        entries
            .get(name)
            .map(|e| e.descriptor.clone())
            .ok_or_else(|| DocvertError::EngineNotFound(name.to_string()))
    }

    /// The engine handle itself, for dispatching conversion work.
    pub async fn handle(&self, name: &str) -> Result<Arc<dyn Engine>> {
        let entries = self.entries.read().await;
        entries
            .get(name)
            .map(|e| Arc::clone(&e.engine))
            .ok_or_else(|| DocvertError::EngineNotFound(name.to_string()))
    }

    /// Atomically claim the download slot for `name`.
    ///
    /// Returns `Ok(true)` when the caller won the
    /// `NotStarted | Failed -> Downloading` transition and now owns the
    /// download, `Ok(false)` when models are already `Ready` (idempotent
    /// no-op). The check-and-set happens under the write lock, so exactly
    /// one concurrent caller can win it.
    pub(crate) async fn claim_download(&self, name: &str) -> Result<bool> {
        let mut entries = self.entries.write().await;
        let entry = entries
            .get_mut(name)
            .ok_or_else(|| DocvertError::EngineNotFound(name.to_string()))?;

        if !entry.descriptor.requires_download {
            return Err(DocvertError::DownloadNotApplicable(name.to_string()));
        }
        match entry.descriptor.download_status {
            DownloadStatus::Downloading => {
                Err(DocvertError::DownloadInProgress(name.to_string()))
            }
            DownloadStatus::Ready => Ok(false),
            DownloadStatus::NotStarted | DownloadStatus::Failed => {
                entry.descriptor.download_status = DownloadStatus::Downloading;
                entry.descriptor.download_error = None;
                Ok(true)
            }
            // Unreachable given the requires_download check above.
            DownloadStatus::NotRequired => {
                Err(DocvertError::DownloadNotApplicable(name.to_string()))
            }
        }
    }

    /// Record the terminal state of a download owned via `claim_download`.
    pub(crate) async fn finish_download(&self, name: &str, outcome: std::result::Result<(), String>) {
        let mut entries = self.entries.write().await;
        let Some(entry) = entries.get_mut(name) else {
            return;
        };
        match outcome {
            Ok(()) => {
                entry.descriptor.download_status = DownloadStatus::Ready;
                entry.descriptor.download_error = None;
            }
            Err(e) => {
                entry.descriptor.download_status = DownloadStatus::Failed;
                entry.descriptor.download_error = Some(e);
            }
        }
    }
}

/// Probe `engines` concurrently, returning reports in input order.
async fn probe_engines(engines: &[Arc<dyn Engine>]) -> Vec<ProbeReport> {
    let mut join_set = JoinSet::new();
    for (idx, engine) in engines.iter().enumerate() {
        let engine = Arc::clone(engine);
        join_set.spawn(async move { (idx, engine.probe().await) });
    }

    let mut reports: Vec<Option<ProbeReport>> = vec![None; engines.len()];
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((idx, report)) => reports[idx] = Some(report),
            Err(e) => warn!(error = %e, "engine probe task failed"),
        }
    }

    reports
        .into_iter()
        .map(|slot| {
            slot.unwrap_or_else(|| ProbeReport::unavailable("engine probe task failed", false))
        })
        .collect()
}
