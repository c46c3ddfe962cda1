use std::time::Duration;

use serde::{de::Error, Deserialize, Deserializer};

/// Human-friendly duration used throughout the settings, e.g. `500ms`, `10s`,
/// `5m` or `1h`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DurationSetting {
    Millis(u64),
    Seconds(u64),
    Minutes(u64),
    Hours(u64),
}

impl DurationSetting {
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        let (num, unit) = match (s.strip_suffix("ms"), s.char_indices().last()) {
            (Some(num), _) => (num, "ms"),
            (None, Some((idx, _))) => s.split_at(idx),
            (None, None) => return Err("Empty duration".to_string()),
        };
        let num: u64 = num
            .trim()
            .parse()
            .map_err(|e| format!("Invalid duration '{s}': {e}"))?;

        let (setting, seconds_per_unit) = match unit {
            "ms" => (DurationSetting::Millis(num), None),
            "s" => (DurationSetting::Seconds(num), None),
            "m" => (DurationSetting::Minutes(num), Some(60)),
            "h" => (DurationSetting::Hours(num), Some(60 * 60)),
            _ => return Err(format!("Invalid time unit in duration '{s}'")),
        };
        if let Some(factor) = seconds_per_unit {
            if num.checked_mul(factor).is_none() {
                return Err(format!("Duration '{s}' is too large"));
            }
        }
        Ok(setting)
    }

    pub fn is_zero(&self) -> bool {
        Duration::from(self.clone()).is_zero()
    }
}

impl<'de> Deserialize<'de> for DurationSetting {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = Deserialize::deserialize(deserializer)?;
        DurationSetting::parse(&s).map_err(D::Error::custom)
    }
}

impl From<DurationSetting> for Duration {
    fn from(val: DurationSetting) -> Self {
        match val {
            DurationSetting::Millis(ms) => Duration::from_millis(ms),
            DurationSetting::Seconds(s) => Duration::from_secs(s),
            DurationSetting::Minutes(m) => Duration::from_secs(m.saturating_mul(60)),
            DurationSetting::Hours(h) => Duration::from_secs(h.saturating_mul(60 * 60)),
        }
    }
}

impl std::fmt::Display for DurationSetting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DurationSetting::Millis(ms) => write!(f, "{ms}ms"),
            DurationSetting::Seconds(s) => write!(f, "{s}s"),
            DurationSetting::Minutes(m) => write!(f, "{m}m"),
            DurationSetting::Hours(h) => write!(f, "{h}h"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_units() {
        assert_eq!(
            Duration::from(DurationSetting::parse("250ms").unwrap()),
            Duration::from_millis(250)
        );
        assert_eq!(
            Duration::from(DurationSetting::parse("10s").unwrap()),
            Duration::from_secs(10)
        );
        assert_eq!(
            Duration::from(DurationSetting::parse("5m").unwrap()),
            Duration::from_secs(300)
        );
        assert_eq!(
            Duration::from(DurationSetting::parse("2h").unwrap()),
            Duration::from_secs(7200)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(DurationSetting::parse("").is_err());
        assert!(DurationSetting::parse("10").is_err());
        assert!(DurationSetting::parse("10d").is_err());
        assert!(DurationSetting::parse("abcs").is_err());
        assert!(DurationSetting::parse("5µ").is_err());
    }

    #[test]
    fn test_rejects_values_that_overflow_seconds() {
        let err = DurationSetting::parse("9999999999999999h").unwrap_err();
        assert!(err.contains("too large"));
        assert!(DurationSetting::parse("307445734561825861m").is_err());
        assert!(DurationSetting::parse("307445734561825860m").is_ok());

        let parsed: Result<DurationSetting, _> = serde_norway::from_str("\"9999999999999999h\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_out_of_range_variant_saturates() {
        assert!(!DurationSetting::Hours(u64::MAX).is_zero());
        assert_eq!(
            Duration::from(DurationSetting::Minutes(u64::MAX)),
            Duration::from_secs(u64::MAX)
        );
    }

    #[test]
    fn test_deserialize_from_yaml() {
        let parsed: DurationSetting = serde_norway::from_str("\"1m\"").unwrap();
        assert_eq!(parsed, DurationSetting::Minutes(1));
        assert_eq!(parsed.to_string(), "1m");
    }
}
