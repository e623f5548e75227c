//! Environment-driven solver configuration.
//!
//! A `.env` file (if present) is loaded first, then these keys override the
//! defaults in [`SolverConfig::default`]:
//!
//! | key                   | field              |
//! |-----------------------|--------------------|
//! | `ML_TOLERANCE`        | `tolerance`        |
//! | `ML_MAX_ITER`         | `max_iter`         |
//! | `ML_MASS_FLOOR`       | `mass_floor`       |
//! | `ML_MASS_CEILING`     | `mass_ceiling`     |
//! | `ML_MIN_MASS_CEILING` | `min_mass_ceiling` |

use std::fmt::Display;
use std::str::FromStr;

use crate::domain::SolverConfig;
use crate::error::ModelError;

impl SolverConfig {
    /// Defaults overridden by the process environment (and `.env`).
    pub fn from_env() -> Result<Self, ModelError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each known key.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ModelError> {
        let mut config = Self::default();

        if let Some(v) = parse_key(&lookup, "ML_TOLERANCE")? {
            config.tolerance = v;
        }
        if let Some(v) = parse_key(&lookup, "ML_MAX_ITER")? {
            config.max_iter = v;
        }
        if let Some(v) = parse_key(&lookup, "ML_MASS_FLOOR")? {
            config.mass_floor = v;
        }
        if let Some(v) = parse_key(&lookup, "ML_MASS_CEILING")? {
            config.mass_ceiling = v;
        }
        if let Some(v) = parse_key(&lookup, "ML_MIN_MASS_CEILING")? {
            config.min_mass_ceiling = v;
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_key<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ModelError>
where
    T: FromStr,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let value = raw
        .trim()
        .parse::<T>()
        .map_err(|e| ModelError::InvalidConfig(format!("{key}={raw:?}: {e}")))?;
    log::info!("solver setting {key} overridden from environment: {}", raw.trim());
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let cfg = SolverConfig::from_lookup(|_| None).unwrap();
        assert_eq!(cfg, SolverConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = SolverConfig::from_lookup(lookup_from(&[
            ("ML_TOLERANCE", "1e-8"),
            ("ML_MAX_ITER", " 200 "),
            ("ML_MIN_MASS_CEILING", "60"),
        ]))
        .unwrap();
        assert_eq!(cfg.tolerance, 1e-8);
        assert_eq!(cfg.max_iter, 200);
        assert_eq!(cfg.min_mass_ceiling, 60.0);
        assert_eq!(cfg.mass_ceiling, 100.0);
    }

    #[test]
    fn malformed_value_is_a_config_error() {
        let err = SolverConfig::from_lookup(lookup_from(&[("ML_MAX_ITER", "lots")])).unwrap_err();
        assert!(matches!(err, ModelError::InvalidConfig(msg) if msg.contains("ML_MAX_ITER")));
    }

    #[test]
    fn overrides_are_validated() {
        let err = SolverConfig::from_lookup(lookup_from(&[("ML_MASS_FLOOR", "-1")])).unwrap_err();
        assert!(matches!(err, ModelError::InvalidConfig(_)));
    }
}
