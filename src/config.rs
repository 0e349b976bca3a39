use log::warn;
use std::env;
use std::str::FromStr;

use crate::blockchain::{DEFAULT_DIFFICULTY, MAX_DIFFICULTY, ProofOfWork};

/// Runtime settings read from the environment (and `.env`, if present).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub difficulty: u32,
    pub max_iterations: Option<u64>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port: u16 = parse_var(&lookup, "PORT").unwrap_or(8080);

        let mut difficulty: u32 =
            parse_var(&lookup, "POW_DIFFICULTY").unwrap_or(DEFAULT_DIFFICULTY);
        if difficulty > MAX_DIFFICULTY {
            warn!("POW_DIFFICULTY={difficulty} exceeds digest length, clamping to {MAX_DIFFICULTY}");
            difficulty = MAX_DIFFICULTY;
        }

        let max_iterations = parse_var(&lookup, "POW_MAX_ITERATIONS");

        Self {
            host,
            port,
            difficulty,
            max_iterations,
        }
    }

    pub fn proof_of_work(&self) -> ProofOfWork {
        let pow = ProofOfWork::new(self.difficulty);
        match self.max_iterations {
            Some(max) => pow.with_max_iterations(max),
            None => pow,
        }
    }
}

/// Parse `key` if set; an unparseable value is logged and treated as unset.
fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("{key}={raw:?} is not valid, using the default");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = config_from(&[]);
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.difficulty, DEFAULT_DIFFICULTY);
        assert_eq!(cfg.max_iterations, None);
    }

    #[test]
    fn reads_overrides() {
        let cfg = config_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "9000"),
            ("POW_DIFFICULTY", "2"),
            ("POW_MAX_ITERATIONS", "5000"),
        ]);
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 9000);
        assert_eq!(
            cfg.proof_of_work(),
            ProofOfWork::new(2).with_max_iterations(5000)
        );
    }

    #[test]
    fn clamps_and_ignores_garbage() {
        let cfg = config_from(&[("POW_DIFFICULTY", "99"), ("PORT", "not-a-port")]);
        assert_eq!(cfg.difficulty, MAX_DIFFICULTY);
        assert_eq!(cfg.port, 8080);
    }

    #[test]
    fn unparseable_pow_settings_fall_back() {
        let cfg = config_from(&[("POW_DIFFICULTY", "abc"), ("POW_MAX_ITERATIONS", "-1")]);
        assert_eq!(cfg.difficulty, DEFAULT_DIFFICULTY);
        assert_eq!(cfg.max_iterations, None);

        let cfg = config_from(&[("POW_MAX_ITERATIONS", " 250 ")]);
        assert_eq!(cfg.max_iterations, Some(250));
    }
}
