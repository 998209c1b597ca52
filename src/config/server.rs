//! Server configuration module for the HTTP listener.
//!
//! Reads the bind address from the environment with a sensible default, so the
//! API can be moved between ports without a rebuild.

/// Gets the socket address the HTTP server should bind to.
///
/// Reads `BIND_ADDR` from the environment and falls back to `0.0.0.0:8000`.
#[must_use]
pub fn get_bind_address() -> String {
    std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string())
}
