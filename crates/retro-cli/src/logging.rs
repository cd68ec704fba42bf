// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for the retro CLI.
//!
//! Uses `tracing` with `tracing-subscriber` for structured logging.
//! Log level can be controlled via the `RUST_LOG` environment variable.
//!
//! # Examples
//!
//! ```bash
//! # Default: warnings only
//! retro
//!
//! # Debug output for troubleshooting
//! RUST_LOG=retro_core=debug retro
//!
//! # Or use the -v flag
//! retro -v
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter applied when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "retro_core=warn,retro_cli=warn,octocrab=error";

/// Filter applied when `-v` is passed and `RUST_LOG` is unset.
const VERBOSE_FILTER: &str = "retro_core=debug,retro_cli=debug,octocrab=warn";

/// Initialize the logging subsystem.
///
/// All log output goes to stderr so stdout stays clean for report output.
/// `RUST_LOG` takes precedence over the `-v` flag when set.
pub fn init_logging(verbose: bool) {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let default_filter = if verbose {
        VERBOSE_FILTER
    } else {
        DEFAULT_FILTER
    };
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .expect("valid default filter directives");

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
