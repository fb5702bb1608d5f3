use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a fmt subscriber filtered by `RUST_LOG`, defaulting to
/// `folio_core=info`. Safe to call more than once; only the first call (and
/// only if no other global subscriber exists) has an effect.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("folio_core=info"));

        if fmt().with_env_filter(filter).try_init().is_ok() {
            tracing::info!("folio-core tracing initialized");
        }
    });
}
