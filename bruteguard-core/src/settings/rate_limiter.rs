use serde::Deserialize;

use super::duration::DurationSetting;

/// Rate limiting configuration validation error
#[derive(Debug)]
pub struct RateLimiterValidationError {
    pub message: String,
}

impl std::fmt::Display for RateLimiterValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rate limiter configuration error: {}", self.message)
    }
}

impl std::error::Error for RateLimiterValidationError {}

/// Limits for one protected dimension (login, password or address).
#[derive(Debug, Clone, Deserialize)]
#[readonly::make]
pub struct BucketSettings {
    /// Maximum admitted attempts per window
    pub capacity: u32,

    /// Length of one counting window
    pub window: DurationSetting,

    /// Inactivity after which a bucket is evicted
    pub idle_expiry: DurationSetting,
}

impl BucketSettings {
    pub fn new(capacity: u32, window: DurationSetting, idle_expiry: DurationSetting) -> Self {
        BucketSettings {
            capacity,
            window,
            idle_expiry,
        }
    }

    pub fn validate(&self) -> Result<(), RateLimiterValidationError> {
        if self.capacity == 0 {
            return Err(RateLimiterValidationError {
                message: "capacity must be greater than 0".to_string(),
            });
        }

        if self.window.is_zero() {
            return Err(RateLimiterValidationError {
                message: "window must be greater than 0".to_string(),
            });
        }

        // A bucket evicted before its window ends would hand out a fresh quota.
        let window: std::time::Duration = self.window.clone().into();
        let idle_expiry: std::time::Duration = self.idle_expiry.clone().into();
        if idle_expiry < window {
            return Err(RateLimiterValidationError {
                message: format!(
                    "idle_expiry ({}) must not be shorter than window ({})",
                    self.idle_expiry, self.window
                ),
            });
        }

        Ok(())
    }
}

/// Configuration of the three rate limiters and their shared sweep loop.
#[derive(Debug, Clone, Deserialize)]
#[readonly::make]
pub struct RateLimiterSettings {
    pub login: BucketSettings,
    pub password: BucketSettings,
    pub address: BucketSettings,

    /// Period of the idle-bucket sweep
    pub sweep_interval: DurationSetting,
}

impl RateLimiterSettings {
    pub fn new(
        login: BucketSettings,
        password: BucketSettings,
        address: BucketSettings,
        sweep_interval: DurationSetting,
    ) -> Self {
        RateLimiterSettings {
            login,
            password,
            address,
            sweep_interval,
        }
    }

    /// Same limits for all three dimensions, mostly useful in tests.
    pub fn uniform(bucket: BucketSettings, sweep_interval: DurationSetting) -> Self {
        Self::new(bucket.clone(), bucket.clone(), bucket, sweep_interval)
    }

    pub fn validate(&self) -> Result<(), RateLimiterValidationError> {
        for (name, bucket) in [
            ("login", &self.login),
            ("password", &self.password),
            ("address", &self.address),
        ] {
            bucket.validate().map_err(|e| RateLimiterValidationError {
                message: format!("{}: {}", name, e.message),
            })?;
        }

        if self.sweep_interval.is_zero() {
            return Err(RateLimiterValidationError {
                message: "sweep_interval must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for RateLimiterSettings {
    fn default() -> Self {
        RateLimiterSettings {
            login: BucketSettings::new(
                10,
                DurationSetting::Minutes(1),
                DurationSetting::Minutes(10),
            ),
            password: BucketSettings::new(
                100,
                DurationSetting::Minutes(1),
                DurationSetting::Minutes(10),
            ),
            address: BucketSettings::new(
                1000,
                DurationSetting::Minutes(1),
                DurationSetting::Minutes(10),
            ),
            sweep_interval: DurationSetting::Minutes(1),
        }
    }
}
