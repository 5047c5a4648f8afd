use std::path::PathBuf;

use log::warn;

const DEFAULT_BANK: &str = "questions.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path to the question bank JSON file.
    pub bank_path: PathBuf,
    pub shuffle: bool,
    /// Only ask this many questions, if set.
    pub limit: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bank_path: PathBuf::from(DEFAULT_BANK),
            shuffle: true,
            limit: None,
        }
    }
}

impl Config {
    /// Loads `.env` into the process environment if there is one.
    /// Call before the logger is set up so `RUST_LOG` can come from the file.
    pub fn load_dotenv() -> bool {
        dotenv::dotenv().is_ok()
    }

    /// Reads `QUIZ_BANK`, `QUIZ_SHUFFLE` and `QUIZ_LIMIT`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let bank_path = lookup("QUIZ_BANK")
            .map(PathBuf::from)
            .unwrap_or(defaults.bank_path);

        let shuffle = match lookup("QUIZ_SHUFFLE").as_deref().map(str::trim) {
            None => defaults.shuffle,
            Some("1") | Some("true") | Some("yes") => true,
            Some("0") | Some("false") | Some("no") => false,
            Some(other) => {
                warn!("Ignoring unrecognised QUIZ_SHUFFLE value {:?}", other);
                defaults.shuffle
            }
        };

        let limit = lookup("QUIZ_LIMIT").and_then(|raw| match raw.trim().parse::<usize>() {
            Ok(limit) => Some(limit),
            Err(_) => {
                warn!("Ignoring invalid QUIZ_LIMIT value {:?}", raw);
                None
            }
        });

        Self {
            bank_path,
            shuffle,
            limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(config_from(&[]), Config::default());
    }

    #[test]
    fn reads_all_variables() {
        let config = config_from(&[
            ("QUIZ_BANK", "/tmp/bank.json"),
            ("QUIZ_SHUFFLE", "false"),
            ("QUIZ_LIMIT", "5"),
        ]);
        assert_eq!(config.bank_path, PathBuf::from("/tmp/bank.json"));
        assert!(!config.shuffle);
        assert_eq!(config.limit, Some(5));
    }

    #[test]
    fn bad_values_fall_back_to_defaults() {
        let config = config_from(&[("QUIZ_SHUFFLE", "maybe"), ("QUIZ_LIMIT", "lots")]);
        assert!(config.shuffle);
        assert_eq!(config.limit, None);
    }
}
