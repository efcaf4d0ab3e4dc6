//! Basket TTL: configuration and remaining-seconds conversion.
//!
//! The store keeps expiration as an absolute epoch timestamp. Callers only
//! ever see remaining seconds, with `-1` standing in for "never expires".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Remaining TTL reported for keys without an expiration.
pub const NO_EXPIRATION: i64 = -1;

const MAX_WINDOW: u64 = i64::MAX as u64;

/// Process-wide TTL applied to every basket write and read refresh.
///
/// Only whole positive seconds enable it. Zero, negative, fractional values
/// below one second and non-numeric input all mean "no TTL". Windows are
/// capped at `i64::MAX` seconds so an expiration always fits the store's
/// epoch timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BasketTtl(Option<u64>);

impl BasketTtl {
    pub fn disabled() -> Self {
        Self(None)
    }

    pub fn from_seconds(seconds: i64) -> Self {
        if seconds > 0 {
            Self(Some(seconds as u64))
        } else {
            Self(None)
        }
    }

    /// Lenient parse of the deployment setting.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if let Ok(seconds) = raw.parse::<i64>() {
            return Self::from_seconds(seconds);
        }
        match raw.parse::<f64>() {
            Ok(seconds) if seconds.is_finite() && seconds >= 1.0 => {
                // `as` saturates for f64 -> u64
                Self(Some((seconds.trunc() as u64).min(MAX_WINDOW)))
            }
            _ => Self(None),
        }
    }

    pub fn seconds(&self) -> Option<u64> {
        self.0
    }

    pub fn is_enabled(&self) -> bool {
        self.0.is_some()
    }
}

impl fmt::Display for BasketTtl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(seconds) => write!(f, "{seconds}s"),
            None => f.write_str("disabled"),
        }
    }
}

impl Serialize for BasketTtl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let seconds = self.0.map_or(0, |s| i64::try_from(s).unwrap_or(i64::MAX));
        serializer.serialize_i64(seconds)
    }
}

impl<'de> Deserialize<'de> for BasketTtl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Float(f64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(seconds) => Self::from_seconds(seconds),
            Raw::Float(seconds) => Self::parse(&seconds.to_string()),
            Raw::Text(text) => Self::parse(&text),
        })
    }
}

/// Convert a store expiration into remaining seconds.
///
/// `floor(expiration - now)`, so a key expiring in 59.4s reports 59.
pub fn remaining_ttl(expiration: Option<i64>, now: DateTime<Utc>) -> i64 {
    match expiration {
        None => NO_EXPIRATION,
        Some(expiration) => {
            let now_secs = now.timestamp_millis() as f64 / 1000.0;
            (expiration as f64 - now_secs).floor() as i64
        }
    }
}

/// Absolute expiration for a write made at `now` with `ttl_seconds`.
pub fn expiration_after(now: DateTime<Utc>, ttl_seconds: u64) -> i64 {
    let window = i64::try_from(ttl_seconds).unwrap_or(i64::MAX);
    now.timestamp().saturating_add(window)
}
