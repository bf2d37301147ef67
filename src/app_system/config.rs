//! Start-up configuration for the shop.

use std::str::FromStr;

use crate::domain::Amount;
use crate::error::{ShopError, ShopResult};

/// Settings read once when the system starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopConfig {
    /// Capacity of the store's request channel.
    ///
    /// Default: 100
    pub channel_buffer: usize,

    /// Points credited to every new account.
    ///
    /// Default: 1000
    pub signup_points: Amount,

    /// Load the demo catalog when the store starts empty.
    ///
    /// Default: true
    pub seed_catalog: bool,

    /// Argon2 memory cost in KiB.
    ///
    /// Default: 19456 (19 MiB)
    pub hash_memory_kib: u32,

    /// Argon2 iteration count.
    ///
    /// Default: 2
    pub hash_iterations: u32,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            channel_buffer: 100,
            signup_points: 1000,
            seed_catalog: true,
            hash_memory_kib: 19_456,
            hash_iterations: 2,
        }
    }
}

impl ShopConfig {
    /// Defaults overridden by any `SHOP_*` variables that are set.
    ///
    /// # Errors
    /// `Validation` when a variable is set but does not parse.
    pub fn from_env() -> ShopResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> ShopResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            channel_buffer: parse_var(&lookup, "SHOP_CHANNEL_BUFFER", defaults.channel_buffer)?,
            signup_points: parse_var(&lookup, "SHOP_SIGNUP_POINTS", defaults.signup_points)?,
            seed_catalog: parse_var(&lookup, "SHOP_SEED_CATALOG", defaults.seed_catalog)?,
            hash_memory_kib: parse_var(&lookup, "SHOP_HASH_MEMORY_KIB", defaults.hash_memory_kib)?,
            hash_iterations: parse_var(&lookup, "SHOP_HASH_ITERATIONS", defaults.hash_iterations)?,
        }
        .validated()
    }

    #[allow(dead_code)]
    #[must_use]
    pub fn with_channel_buffer(mut self, size: usize) -> Self {
        self.channel_buffer = size;
        self
    }

    #[allow(dead_code)]
    #[must_use]
    pub fn with_signup_points(mut self, points: Amount) -> Self {
        self.signup_points = points;
        self
    }

    #[allow(dead_code)]
    #[must_use]
    pub fn with_seed_catalog(mut self, seed: bool) -> Self {
        self.seed_catalog = seed;
        self
    }

    /// Set the Argon2 cost. Tests use tiny values to stay fast.
    #[allow(dead_code)]
    #[must_use]
    pub fn with_hash_cost(mut self, memory_kib: u32, iterations: u32) -> Self {
        self.hash_memory_kib = memory_kib;
        self.hash_iterations = iterations;
        self
    }

    fn validated(self) -> ShopResult<Self> {
        if self.channel_buffer == 0 {
            return Err(ShopError::Validation(
                "SHOP_CHANNEL_BUFFER must be greater than 0".to_string(),
            ));
        }
        if self.signup_points < 0 {
            return Err(ShopError::Validation(
                "SHOP_SIGNUP_POINTS must not be negative".to_string(),
            ));
        }
        Ok(self)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> ShopResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| ShopError::Validation(format!("{key}={raw:?}: {e}"))),
    }
}
