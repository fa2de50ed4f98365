//! Hub configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`), with defaults for everything.

use std::net::SocketAddr;
use std::time::Duration;

use crate::domain::MemberRoster;

/// Log output format selected with `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-field lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Top-level hub configuration.
///
/// Loaded once at startup via [`HubConfig::from_env`].
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:8080`).
    pub listen_addr: SocketAddr,

    /// Number of undelivered events each observer may have queued before
    /// further events to it are dropped.
    pub observer_queue_capacity: usize,

    /// Interval between server pings on observer connections. `None`
    /// disables the heartbeat.
    pub heartbeat_interval: Option<Duration>,

    /// Close an observer connection after this long without any inbound
    /// frame. `None` keeps silent connections open indefinitely.
    pub idle_timeout: Option<Duration>,

    /// Upper bound on HTTP request handling time.
    pub request_timeout: Duration,

    /// Members offered by `GET /api/members`.
    pub member_roster: MemberRoster,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            observer_queue_capacity: 256,
            heartbeat_interval: Some(Duration::from_secs(30)),
            idle_timeout: Some(Duration::from_secs(90)),
            request_timeout: Duration::from_secs(30),
            member_roster: MemberRoster::default(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl HubConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to [`HubConfig::default`] values when a variable is not
    /// set. Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, std::net::AddrParseError> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr = match std::env::var("LISTEN_ADDR") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.listen_addr,
        };

        let member_roster = std::env::var("MEMBER_ROSTER")
            .ok()
            .map(|raw| MemberRoster::from_csv_list(&raw))
            .filter(|roster| !roster.names().is_empty())
            .unwrap_or(defaults.member_roster);

        let log_format = match std::env::var("LOG_FORMAT").ok().as_deref() {
            Some("json") | Some("JSON") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            listen_addr,
            observer_queue_capacity: parse_env(
                "OBSERVER_QUEUE_CAPACITY",
                defaults.observer_queue_capacity,
            ),
            heartbeat_interval: optional_secs(parse_env("WS_HEARTBEAT_INTERVAL_SECS", 30)),
            idle_timeout: optional_secs(parse_env("WS_IDLE_TIMEOUT_SECS", 90)),
            request_timeout: Duration::from_secs(parse_env("REQUEST_TIMEOUT_SECS", 30)),
            member_roster,
            log_format,
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Zero means "disabled".
fn optional_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
