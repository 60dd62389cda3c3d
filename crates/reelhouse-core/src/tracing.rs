//! Process-wide log subscriber.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log line format, chosen with `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line. The default.
    Json,
    /// Multi-line human-readable output for local runs.
    Pretty,
}

impl LogFormat {
    pub fn from_env() -> Self {
        Self::parse(std::env::var("LOG_FORMAT").ok().as_deref())
    }

    fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("pretty") => Self::Pretty,
            _ => Self::Json,
        }
    }
}

/// Filter used when `RUST_LOG` is unset: the service crate and the HTTP
/// layers at `info`, database drivers at `warn`.
fn default_filter(service: &str) -> String {
    format!("warn,{service}=info,reelhouse_core=info,tower_http=info,sea_orm=warn,sqlx=warn")
}

/// Install the subscriber for `service` (its crate name as it appears in log
/// targets). Later calls are ignored.
pub fn init_tracing(service: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(service)));
    let registry = tracing_subscriber::registry().with(filter);
    let _ = match LogFormat::from_env() {
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).try_init(),
    };
}
