//! Time and nonce sources used while signing.
//!
//! Signers never read the system clock or the OS random source directly;
//! they take a [`Clock`] and a [`NonceSource`], which lets tests pin both.

use chrono::{DateTime, TimeZone, Utc};
use ring::rand::{SecureRandom, SystemRandom};

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Creates a clock that always reports the given unix timestamp (seconds).
    ///
    /// Out-of-range timestamps fall back to the unix epoch.
    #[must_use]
    pub fn from_unix_seconds(seconds: i64) -> Self {
        Self(Utc.timestamp_opt(seconds, 0).single().unwrap_or_default())
    }

    /// Creates a clock that always reports the given instant.
    #[must_use]
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Source of the legacy scheme's random nonce.
pub trait NonceSource: Send + Sync {
    /// Returns a nonce in `[0, 65535]`.
    fn nonce(&self) -> u16;
}

/// Nonces drawn from the operating system's CSPRNG.
#[derive(Debug)]
pub struct SystemNonce {
    rng: SystemRandom,
}

impl Default for SystemNonce {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemNonce {
    /// Creates a new OS-backed nonce source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }
}

impl NonceSource for SystemNonce {
    fn nonce(&self) -> u16 {
        let mut bytes = [0u8; 2];
        match self.rng.fill(&mut bytes) {
            Ok(()) => u16::from_be_bytes(bytes),
            // OS RNG unavailable: fall back to sub-second clock bits.
            Err(_) => u16::try_from(Utc::now().timestamp_subsec_micros() % 65_536).unwrap_or(0),
        }
    }
}

/// A nonce source that always returns the same value.
#[derive(Debug, Clone, Copy)]
pub struct FixedNonce(pub u16);

impl NonceSource for FixedNonce {
    fn nonce(&self) -> u16 {
        self.0
    }
}

/// The single instant a request is signed at.
///
/// Captured once per request and truncated to whole seconds; both the
/// timestamp and the UTC date derive from the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SigningInstant {
    unix_seconds: i64,
    instant: DateTime<Utc>,
}

impl SigningInstant {
    /// Reads the clock once.
    #[must_use]
    pub fn capture(clock: &dyn Clock) -> Self {
        let now = clock.now();
        let unix_seconds = now.timestamp();
        let instant = Utc
            .timestamp_opt(unix_seconds, 0)
            .single()
            .unwrap_or(now);
        Self {
            unix_seconds,
            instant,
        }
    }

    /// Unix timestamp in seconds.
    #[must_use]
    pub fn unix_seconds(&self) -> i64 {
        self.unix_seconds
    }

    /// UTC calendar date as `YYYY-MM-DD`.
    #[must_use]
    pub fn date(&self) -> String {
        self.instant.format("%Y-%m-%d").to_string()
    }
}
