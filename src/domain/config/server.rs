use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_UPLOAD_DIR: &str = "./data/uploads";
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 1024 * 1024 * 1024;
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got '{value}'")]
    InvalidValue {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub upload_dir: PathBuf,
    pub max_upload_size: usize,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Reads `UPLOAD_DIR`, `MAX_UPLOAD_SIZE` and `PORT`, falling back to the
    /// defaults for any variable that is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup("UPLOAD_DIR").filter(|v| !v.trim().is_empty()) {
            config.upload_dir = PathBuf::from(dir);
        }

        if let Some(raw) = lookup("MAX_UPLOAD_SIZE") {
            config.max_upload_size =
                raw.trim()
                    .parse::<usize>()
                    .map_err(|_| ConfigError::InvalidValue {
                        name: "MAX_UPLOAD_SIZE",
                        expected: "byte count",
                        value: raw.clone(),
                    })?;
        }

        if let Some(raw) = lookup("PORT") {
            config.port = raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue {
                    name: "PORT",
                    expected: "u16",
                    value: raw.clone(),
                })?;
        }

        Ok(config)
    }
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
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.upload_dir, PathBuf::from("./data/uploads"));
        assert_eq!(config.max_upload_size, 1_073_741_824);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("UPLOAD_DIR", "/srv/uploads"),
            ("MAX_UPLOAD_SIZE", "4096"),
            ("PORT", "9000"),
        ]))
        .unwrap();

        assert_eq!(config.upload_dir, PathBuf::from("/srv/uploads"));
        assert_eq!(config.max_upload_size, 4096);
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_blank_upload_dir_keeps_default() {
        let config = ServerConfig::from_lookup(lookup_from(&[("UPLOAD_DIR", "  ")])).unwrap();
        assert_eq!(config.upload_dir, PathBuf::from(DEFAULT_UPLOAD_DIR));
    }

    #[test]
    fn test_invalid_port() {
        let result = ServerConfig::from_lookup(lookup_from(&[("PORT", "http")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { name: "PORT", .. })
        ));
    }

    #[test]
    fn test_invalid_max_upload_size() {
        let result = ServerConfig::from_lookup(lookup_from(&[("MAX_UPLOAD_SIZE", "1GB")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                name: "MAX_UPLOAD_SIZE",
                ..
            })
        ));
    }
}
