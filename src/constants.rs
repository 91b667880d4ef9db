//! Application-wide constants.
//!
//! Endpoint literals, timeouts, and config defaults live here so the client,
//! config loader, and CLI agree on them.

use std::path::PathBuf;

// ── Endpoint ──────────────────────────────────────────────────────
/// Cleverbot reply endpoint. Query parameters are appended per request.
pub const DEFAULT_BASE_URL: &str = "https://www.cleverbot.com/getreply";
/// Client identifier sent as the `wrapper` parameter on every request.
pub const WRAPPER_ID: &str = "cleverchat-rs";
/// User-Agent header for outgoing requests.
pub const USER_AGENT: &str = concat!("cleverchat/", env!("CARGO_PKG_VERSION"));

// ── Timing ────────────────────────────────────────────────────────
/// Default whole-request timeout (seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Default TCP connect timeout (seconds).
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Floor for both timeouts.
pub const MIN_TIMEOUT_SECS: u64 = 1;

// ── Capacities ────────────────────────────────────────────────────
/// Maximum transcript lines retained by the interactive chat.
pub const DEFAULT_MAX_HISTORY: usize = 50;
/// Minimum max_history floor.
pub const MIN_MAX_HISTORY: usize = 1;
/// Characters of an error response body kept in error messages.
pub const MAX_ERROR_BODY_CHARS: usize = 300;

// ── Environment ───────────────────────────────────────────────────
/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "CLEVERBOT_API_KEY";

// ── Paths ─────────────────────────────────────────────────────────

/// Returns the user's home directory, falling back to /tmp.
pub fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string()))
}

/// Returns `~/.config/cleverchat/`.
pub fn config_dir() -> PathBuf {
    home_dir().join(".config").join("cleverchat")
}

/// Returns `~/.config/cleverchat/config.toml`.
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Returns `~/.config/cleverchat/.env` (API key, never committed).
pub fn env_file_path() -> PathBuf {
    config_dir().join(".env")
}
