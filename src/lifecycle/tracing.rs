//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing_subscriber` formatter filtered by
//! `RUST_LOG` (defaulting to `info`). Module paths are hidden (`with_target(false)`);
//! log lines carry an `entity_type` field instead.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: startup (with preloaded size) and shutdown of each table
//! - **Entity Operations**: `Saved` / `Deleted` from the actors, `Created` / `Updated` /
//!   `Deleted` from the resource layer
//! - **HTTP Requests**: one span per request from `tower_http`'s `TraceLayer`
//! - **Sessions**: commits at `debug`, discarded writes at `info`
//!
//! ## Usage Examples
//!
//! ```bash
//! # Default
//! cargo run
//!
//! # Per-message actor logs and request spans
//! RUST_LOG=debug,tower_http=debug cargo run
//!
//! # Only the storage engine
//! RUST_LOG=entity_actor=debug cargo run
//! ```
//!
//! With `RUST_LOG=info`, creating a state looks like:
//!
//! ```text
//! INFO Saved entity_type="State" id=5b0c... created=true size=1
//! INFO Created entity_type=State id=5b0c...
//! ```
use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // entity_type identifies the table instead
        .compact()
        .init();
}
