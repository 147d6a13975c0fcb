// Optional tracing bootstrap for hosts without their own subscriber

use tracing_subscriber::{fmt, EnvFilter};

/// Install a console subscriber honoring RUST_LOG, defaulting to info.
///
/// Uses try_init so a host that already installed a subscriber keeps it;
/// calling this twice is harmless.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
