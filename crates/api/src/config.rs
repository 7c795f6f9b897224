//! Application configuration loaded from environment variables.

use std::time::Duration;

use booking::{BookingConfig, NotificationPolicy};
use domain::Room;
use thiserror::Error;

const DEFAULT_ROOMS: &str = "1.1:2,1.2:2,1.3:4";

/// A variable was set to something that cannot be used.
#[derive(Debug, Error)]
#[error("invalid value for {var}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub reason: String,
}

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `3000`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `DATABASE_URL`: Postgres connection string; bookings stay in memory when unset
/// - `EUR_RATE`: USD to EUR conversion rate (default: `0.92`)
/// - `ROOMS`: room inventory as `id:capacity,...` (default: `1.1:2,1.2:2,1.3:4`)
/// - `NOTIFICATION_POLICY`: `best_effort` or `required` (default: `best_effort`)
/// - `PAYMENT_TIMEOUT_MS`: payment call bound (default: `5000`)
/// - `NOTIFICATION_TIMEOUT_MS`: confirmation call bound (default: `2000`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub database_url: Option<String>,
    pub eur_rate: f64,
    pub rooms: Vec<Room>,
    pub notification_policy: NotificationPolicy,
    pub payment_timeout: Duration,
    pub notification_timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    ///
    /// Unset variables take their default. Set but malformed values are
    /// rejected rather than silently replaced.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            host: var("HOST").unwrap_or(defaults.host),
            port: parse_var(&var, "PORT")?.unwrap_or(defaults.port),
            log_level: var("RUST_LOG").unwrap_or(defaults.log_level),
            database_url: var("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            eur_rate: parse_var(&var, "EUR_RATE")?.unwrap_or(defaults.eur_rate),
            rooms: match var("ROOMS") {
                Some(list) => parse_rooms(&list).map_err(|reason| ConfigError {
                    var: "ROOMS",
                    reason,
                })?,
                None => defaults.rooms,
            },
            notification_policy: parse_var(&var, "NOTIFICATION_POLICY")?
                .unwrap_or(defaults.notification_policy),
            payment_timeout: parse_var(&var, "PAYMENT_TIMEOUT_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.payment_timeout),
            notification_timeout: parse_var(&var, "NOTIFICATION_TIMEOUT_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.notification_timeout),
        })
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Orchestrator settings carried by this configuration.
    pub fn booking_config(&self) -> BookingConfig {
        BookingConfig {
            notification_policy: self.notification_policy,
            payment_timeout: self.payment_timeout,
            notification_timeout: self.notification_timeout,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let booking = BookingConfig::default();
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            database_url: None,
            eur_rate: 0.92,
            rooms: parse_rooms(DEFAULT_ROOMS).unwrap_or_default(),
            notification_policy: booking.notification_policy,
            payment_timeout: booking.payment_timeout,
            notification_timeout: booking.notification_timeout,
        }
    }
}

fn parse_var<T>(
    var: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    var(key)
        .map(|raw| {
            raw.trim().parse().map_err(|e: T::Err| ConfigError {
                var: key,
                reason: e.to_string(),
            })
        })
        .transpose()
}

/// Parses an inventory list such as `"101:2, 102:4"`.
pub fn parse_rooms(list: &str) -> Result<Vec<Room>, String> {
    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (id, capacity) = entry
                .split_once(':')
                .ok_or_else(|| format!("expected id:capacity, got '{entry}'"))?;
            let id = id.trim();
            if id.is_empty() {
                return Err(format!("missing room id in '{entry}'"));
            }
            let capacity: u32 = capacity
                .trim()
                .parse()
                .map_err(|e| format!("bad capacity in '{entry}': {e}"))?;
            if capacity == 0 {
                return Err(format!("room {id} must hold at least one guest"));
            }
            Ok(Room::new(id, capacity))
        })
        .collect()
}
