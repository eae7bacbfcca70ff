//! Engine capability trait.
//!
//! Defines the `Engine` async trait every extraction backend implements,
//! plus the probe report type the registry consumes. Conversion and
//! download calls are opaque, potentially long-running external calls; an
//! `Err` carries a human-readable message and is always recorded as data by
//! the orchestration layer, never propagated as a crash.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::convert::{DocumentRef, OutputFormat};

/// Result of an engine capability probe.
///
/// Probes never panic and never return a Rust error; a broken engine is a
/// report with `available = false` and a message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProbeReport {
    pub available: bool,

    /// Why the engine is unusable (expected when `available` is false).
    pub error: Option<String>,

    /// Whether models must be fetched before the engine can convert.
    pub requires_download: bool,
}

impl ProbeReport {
    pub fn available(requires_download: bool) -> Self {
        Self {
            available: true,
            error: None,
            requires_download,
        }
    }

    pub fn unavailable(error: impl Into<String>, requires_download: bool) -> Self {
        Self {
            available: false,
            error: Some(error.into()),
            requires_download,
        }
    }
}

/// Trait for extraction engine backends.
///
/// Dispatch is by registry lookup on `name()`, never by runtime type
/// inspection. Implementations must be safe to share across the comparison
/// and batch workers (`Send + Sync`).
#[async_trait]
pub trait Engine: Send + Sync {
    /// Unique engine name; the registry key.
    fn name(&self) -> &str;

    /// Check whether the engine is usable right now.
    async fn probe(&self) -> ProbeReport;

    /// Fetch the engine's models. Only called for engines whose probe
    /// reported `requires_download`.
    async fn download(&self) -> std::result::Result<(), String>;

    /// Convert one document. The returned string is the converted content
    /// in the requested format.
    async fn convert(
        &self,
        document: &DocumentRef,
        format: OutputFormat,
    ) -> std::result::Result<String, String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_report_constructors() {
        let ok = ProbeReport::available(true);
        assert!(ok.available);
        assert!(ok.error.is_none());
        assert!(ok.requires_download);

        let broken = ProbeReport::unavailable("binary not on PATH", false);
        assert!(!broken.available);
        assert_eq!(broken.error.as_deref(), Some("binary not on PATH"));
    }

    #[test]
    fn test_probe_report_serde_roundtrip() {
        let report = ProbeReport::unavailable("import failed", true);
        let json = serde_json::to_string(&report).expect("serialize");
        let back: ProbeReport = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(report, back);
    }
}
