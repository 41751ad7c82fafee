//! HTTP front-end for the route weather lookup.
//!
//! The binary (`route-weather`) adds the command line on top of this.

pub mod http;

pub use http::{create_router, run_http_server};

/// Install the global `tracing` subscriber, honouring `RUST_LOG` (default `info`).
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
