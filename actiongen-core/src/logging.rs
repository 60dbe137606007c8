//! Structured logging using **tracing**.
//!
//! Resolver events go to stderr so stdout stays clean for JSON output.

/// Initializes the global tracing subscriber.
///
/// Call once, at startup. With `json` set, events are emitted as JSON
/// lines; otherwise as compact human-readable text.
///
/// # Environment Variables
/// - `RUST_LOG`: Controls log filtering (e.g., `RUST_LOG=actiongen_core=debug`)
pub fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::from_default_env();

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_ansi(false)
            .with_level(true)
            .with_target(true)
            .with_current_span(true)
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .compact()
            .with_target(false)
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
