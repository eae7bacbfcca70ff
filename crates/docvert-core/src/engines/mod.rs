//! Built-in engine adapters.

pub mod command;

use std::sync::Arc;

use crate::config::Config;
use crate::engine::Engine;

pub use command::CommandEngine;

/// Build the engine set described by `config`.
pub fn engines_from_config(config: &Config) -> Vec<Arc<dyn Engine>> {
    config
        .engines
        .iter()
        .map(|spec| {
            Arc::new(CommandEngine::new(spec.clone(), config.limits.clone())) as Arc<dyn Engine>
        })
        .collect()
}
