//! Tracing initialisation for docvert binaries.
//!
//! Call [`init_tracing`] once at program start. `RUST_LOG` takes
//! precedence over the supplied default level; repeated calls are ignored
//! because the global subscriber can only be installed once per process.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialise the global tracing subscriber.
///
/// With `json` set, log lines are emitted as newline-delimited JSON
/// instead of the human format. `level` is the default verbosity when
/// `RUST_LOG` is unset.
pub fn init_tracing(json: bool, level: Level) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    let base = tracing_subscriber::registry().with(filter);

    // A second call leaves the already-installed subscriber in place.
    let installed = if json {
        base.with(fmt::layer().with_target(false).json()).try_init()
    } else {
        base.with(fmt::layer().with_target(false)).try_init()
    };
    installed.ok();
}
