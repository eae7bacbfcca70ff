//! Configuration for the engine catalogue and execution limits.
//!
//! Loaded from TOML; every section has defaults so an empty file (or no
//! file at all) yields a working setup with the built-in engine commands.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level docvert configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub limits: Limits,

    /// Engine command catalogue. Replacing this list swaps the whole
    /// engine set; the orchestration core is indifferent to its contents.
    #[serde(default = "default_engine_specs")]
    pub engines: Vec<EngineCommandSpec>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let cfg: Config = toml::from_str(&raw).with_context(|| "parsing TOML")?;
        Ok(cfg)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            limits: Limits::default(),
            engines: default_engine_specs(),
        }
    }
}

/// Execution timeouts, in seconds. Zero disables the corresponding timeout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Limits {
    pub probe_timeout_seconds: u64,
    pub convert_timeout_seconds: u64,
    pub download_timeout_seconds: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            probe_timeout_seconds: 15,
            convert_timeout_seconds: 600,
            download_timeout_seconds: 3600,
        }
    }
}

/// How a command engine hands back its converted output.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputCapture {
    /// The conversion command writes the content to stdout.
    #[default]
    Stdout,
    /// The command writes product files into `{output_dir}`; the engine
    /// collects the file matching the requested format's extension.
    OutputDir,
}

/// Command templates for one external extraction tool.
///
/// Argument templates may reference `{input}`, `{format}` and
/// `{output_dir}` placeholders, substituted per invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineCommandSpec {
    pub name: String,

    /// Cheap capability check, e.g. a `--version` invocation.
    pub probe: Vec<String>,

    /// The conversion command.
    pub convert: Vec<String>,

    /// Model-fetch command for engines that need one.
    #[serde(default)]
    pub download: Option<Vec<String>>,

    #[serde(default)]
    pub requires_download: bool,

    #[serde(default)]
    pub capture: OutputCapture,
}

fn spec(
    name: &str,
    probe: &[&str],
    convert: &[&str],
    download: Option<&[&str]>,
    capture: OutputCapture,
) -> EngineCommandSpec {
    EngineCommandSpec {
        name: name.to_string(),
        probe: probe.iter().map(|s| s.to_string()).collect(),
        convert: convert.iter().map(|s| s.to_string()).collect(),
        download: download.map(|argv| argv.iter().map(|s| s.to_string()).collect()),
        requires_download: download.is_some(),
        capture,
    }
}

/// The built-in engine catalogue.
fn default_engine_specs() -> Vec<EngineCommandSpec> {
    vec![
        spec(
            "docling",
            &["docling", "--version"],
            &[
                "docling",
                "{input}",
                "--to",
                "{format}",
                "--output",
                "{output_dir}",
            ],
            None,
            OutputCapture::OutputDir,
        ),
        spec(
            "marker",
            &["marker_single", "--help"],
            &[
                "marker_single",
                "{input}",
                "--output_format",
                "{format}",
                "--output_dir",
                "{output_dir}",
            ],
            Some(&[
                "python3",
                "-c",
                "from marker.models import create_model_dict; create_model_dict()",
            ]),
            OutputCapture::OutputDir,
        ),
        spec(
            "mineru",
            &["mineru", "--version"],
            &["mineru", "-p", "{input}", "-o", "{output_dir}"],
            Some(&["mineru-models-download", "-s", "huggingface"]),
            OutputCapture::OutputDir,
        ),
        spec(
            "paddleocr",
            &["python3", "-c", "import paddleocr"],
            &[
                "python3",
                "-m",
                "paddleocr.ppstructure",
                "--input",
                "{input}",
                "--output",
                "{output_dir}",
            ],
            Some(&[
                "python3",
                "-c",
                "from paddleocr import PPStructureV3; PPStructureV3()",
            ]),
            OutputCapture::OutputDir,
        ),
    ]
}
