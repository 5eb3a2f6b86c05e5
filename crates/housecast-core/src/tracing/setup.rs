//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

/// Initialize the Housecast tracing/logging system.
///
/// Reads `HOUSECAST_LOG` for per-module log levels.
/// Format: `HOUSECAST_LOG=housecast_serve=debug,housecast_analysis=info`
///
/// Falls back to `housecast=info` if `HOUSECAST_LOG` is not set or is invalid.
/// Safe to call more than once.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(default_directives()));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .init();
    });
}

/// Directives used when `HOUSECAST_LOG` is absent: every workspace crate at `info`.
fn default_directives() -> &'static str {
    "housecast=info,housecast_core=info,housecast_analysis=info,housecast_serve=info"
}
