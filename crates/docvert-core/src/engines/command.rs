//! Subprocess-backed engine adapter.
//!
//! Every built-in extraction backend (docling, marker, mineru, paddleocr)
//! is an external command-line tool. `CommandEngine` wraps one tool's
//! command templates: probing spawns a cheap capability check, downloading
//! spawns the configured model-fetch command, and converting spawns the
//! conversion command and captures stdout or collects the product file
//! from a scratch output directory.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::{EngineCommandSpec, Limits, OutputCapture};
use crate::domain::convert::{DocumentRef, OutputFormat};
use crate::engine::{Engine, ProbeReport};

pub struct CommandEngine {
    spec: EngineCommandSpec,
    limits: Limits,
}

impl CommandEngine {
    pub fn new(spec: EngineCommandSpec, limits: Limits) -> Self {
        Self { spec, limits }
    }

    /// Substitute `{input}`, `{format}` and `{output_dir}` in a template.
    fn render(
        template: &[String],
        document: &DocumentRef,
        format: OutputFormat,
        output_dir: Option<&Path>,
    ) -> Vec<String> {
        template
            .iter()
            .map(|arg| {
                let mut arg = arg
                    .replace("{input}", document.as_str())
                    .replace("{format}", format.as_str());
                if let Some(dir) = output_dir {
                    arg = arg.replace("{output_dir}", &dir.display().to_string());
                }
                arg
            })
            .collect()
    }

    /// Spawn `argv` and wait for it, enforcing `timeout_secs` (0 = none).
    ///
    /// All failure modes (unlaunchable binary, nonzero exit, timeout) come
    /// back as `Err(message)`; the caller decides whether that is an
    /// availability problem or a conversion failure.
    async fn run(&self, argv: &[String], timeout_secs: u64) -> Result<String, String> {
        let (exe, args) = argv
            .split_first()
            .ok_or_else(|| format!("engine {} has an empty command", self.spec.name))?;

        debug!(engine = %self.spec.name, command = %exe, "spawning engine command");

        let child = Command::new(exe)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| format!("failed to launch {exe}: {e}"))?;

        let output = if timeout_secs > 0 {
            tokio::time::timeout(Duration::from_secs(timeout_secs), child.wait_with_output())
                .await
                .map_err(|_| format!("{exe} timed out after {timeout_secs} seconds"))?
        } else {
            child.wait_with_output().await
        }
        .map_err(|e| format!("waiting for {exe}: {e}"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = stderr.trim();
            return Err(if detail.is_empty() {
                format!("{exe} exited with {}", output.status)
            } else {
                format!("{exe} failed: {detail}")
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Find the first produced file with `ext` under `dir`, recursively.
    ///
    /// Tools like mineru nest their products ("auto/..."), so a flat listing
    /// is not enough. Directories are visited in name order for a
    /// deterministic pick.
    fn find_output(dir: &Path, ext: &str) -> Option<PathBuf> {
        let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
            .ok()?
            .filter_map(|e| e.ok().map(|e| e.path()))
            .collect();
        entries.sort();

        for path in &entries {
            if path.extension().is_some_and(|e| e == ext) {
                return Some(path.clone());
            }
        }
        for path in entries {
            if path.is_dir() {
                if let Some(found) = Self::find_output(&path, ext) {
                    return Some(found);
                }
            }
        }
        None
    }
}

#[async_trait]
impl Engine for CommandEngine {
    fn name(&self) -> &str {
        &self.spec.name
    }

    async fn probe(&self) -> ProbeReport {
        if self.spec.probe.is_empty() {
            return ProbeReport::unavailable(
                "no probe command configured",
                self.spec.requires_download,
            );
        }
        match self.run(&self.spec.probe, self.limits.probe_timeout_seconds).await {
            Ok(_) => ProbeReport::available(self.spec.requires_download),
            Err(e) => {
                debug!(engine = %self.spec.name, error = %e, "probe failed");
                ProbeReport::unavailable(e, self.spec.requires_download)
            }
        }
    }

    async fn download(&self) -> Result<(), String> {
        let argv = self
            .spec
            .download
            .as_ref()
            .ok_or_else(|| format!("no download command configured for {}", self.spec.name))?;
        self.run(argv, self.limits.download_timeout_seconds)
            .await
            .map(|_| ())
    }

    async fn convert(
        &self,
        document: &DocumentRef,
        format: OutputFormat,
    ) -> Result<String, String> {
        match self.spec.capture {
            OutputCapture::Stdout => {
                let argv = Self::render(&self.spec.convert, document, format, None);
                self.run(&argv, self.limits.convert_timeout_seconds).await
            }
            OutputCapture::OutputDir => {
                let scratch = tempfile::tempdir()
                    .map_err(|e| format!("creating scratch output dir: {e}"))?;
                let argv =
                    Self::render(&self.spec.convert, document, format, Some(scratch.path()));
                self.run(&argv, self.limits.convert_timeout_seconds).await?;

                let ext = format.extension();
                let Some(product) = Self::find_output(scratch.path(), ext) else {
                    warn!(engine = %self.spec.name, "conversion produced no .{ext} file");
                    return Err(format!(
                        "{} produced no .{ext} output file",
                        self.spec.name
                    ));
                };
                std::fs::read_to_string(&product)
                    .map_err(|e| format!("reading {}: {e}", product.display()))
            }
        }
    }
}
