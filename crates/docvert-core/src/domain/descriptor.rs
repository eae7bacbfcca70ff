//! Engine descriptors: the registry's view of one extraction engine.

use serde::{Deserialize, Serialize};

/// Status of an engine's model download/preparation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DownloadStatus {
    /// The engine has no models to fetch.
    NotRequired,
    NotStarted,
    Downloading,
    Ready,
    Failed,
}

/// Snapshot of one engine as tracked by the registry.
///
/// Created by probing the engine at registry initialization. After creation
/// only `download_status` and `download_error` change, and only the
/// download coordinator writes them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineDescriptor {
    /// Unique engine name, the registry key.
    pub name: String,

    /// Whether the engine answered its capability probe.
    pub available: bool,

    /// Why the engine is unavailable (always present when `available` is false).
    pub error: Option<String>,

    /// Whether the engine must fetch models before it can convert.
    pub requires_download: bool,

    /// Current model download state.
    pub download_status: DownloadStatus,

    /// Error captured from the most recent failed download.
    pub download_error: Option<String>,
}

impl EngineDescriptor {
    /// Build a descriptor from a probe. An unavailable engine always
    /// carries an error message, and `download_status` is `NotRequired`
    /// exactly when no download is needed.
    pub fn from_probe(
        name: impl Into<String>,
        available: bool,
        error: Option<String>,
        requires_download: bool,
    ) -> Self {
        let error = if available {
            error
        } else {
            Some(
                error
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| "engine probe reported unavailable".to_string()),
            )
        };
        let download_status = if requires_download {
            DownloadStatus::NotStarted
        } else {
            DownloadStatus::NotRequired
        };
        Self {
            name: name.into(),
            available,
            error,
            requires_download,
            download_status,
            download_error: None,
        }
    }
}
