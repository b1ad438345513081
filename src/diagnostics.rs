//! Diagnostics helpers shared by the loaders and the CLI.
//!
//! Fatal problems travel as `anyhow` errors whose message is built with
//! [`error_message`]; non-fatal anomalies go through [`warn`] and the `log`
//! facade so `RUST_LOG` controls what reaches stderr.

use std::fmt::Display;

/// Prefix used for every user-facing error message.
const ERROR_PREFIX: &str = "lineage-viz";

/// Format an error message consistently.
pub fn error_message(msg: impl Display) -> String {
    format!("{}: {}", ERROR_PREFIX, msg)
}

/// The message without the prefix added by [`error_message`], for inline notices.
pub fn without_prefix(msg: &str) -> &str {
    msg.strip_prefix(ERROR_PREFIX)
        .and_then(|rest| rest.strip_prefix(": "))
        .unwrap_or(msg)
}

/// Report a non-fatal anomaly.
pub fn warn(msg: impl Display) {
    log::warn!("{}", msg);
}

/// Initialise the global logger. Defaults to `warn` unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("warn");
    // A second init (tests, embedding) is harmless.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
