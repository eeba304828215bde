//! Pending OTP store configuration

use serde::{Deserialize, Serialize};

use super::parse_var;
use crate::errors::ConfigError;

/// Maintenance settings for the in-memory OTP store
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OtpStoreConfig {
    /// Interval of the background sweep that drops expired codes.
    /// `None` keeps purely lazy expiry.
    #[serde(default)]
    pub sweep_interval_secs: Option<u64>,
}

impl OtpStoreConfig {
    /// Load from `OTP_SWEEP_INTERVAL_SECS`; `0` disables the sweep
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let interval: Option<u64> = parse_var(lookup, "OTP_SWEEP_INTERVAL_SECS")?;
        Ok(Self {
            sweep_interval_secs: interval.filter(|secs| *secs > 0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_interval() {
        let unset = OtpStoreConfig::from_lookup(&|_: &str| None).unwrap();
        assert_eq!(unset.sweep_interval_secs, None);

        let zero = OtpStoreConfig::from_lookup(&|_: &str| Some("0".to_string())).unwrap();
        assert_eq!(zero.sweep_interval_secs, None);

        let set = OtpStoreConfig::from_lookup(&|_: &str| Some("60".to_string())).unwrap();
        assert_eq!(set.sweep_interval_secs, Some(60));
    }
}
