//! Logging infrastructure
//!
//! Structured tracing setup. `RUST_LOG` overrides the default filter.

pub fn init_logger() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tiffin_server=info,tower_http=info".into()),
        )
        .with_file(false)
        .with_line_number(false)
        .with_target(false)
        .init();
}
