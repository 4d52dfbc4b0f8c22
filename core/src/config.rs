//! Client configuration read from the environment.

use crate::client::TodoClient;

/// Environment variable holding the API base URL.
pub const BASE_URL_ENV: &str = "TODO_API_URL";

/// Used when `TODO_API_URL` is unset or blank; matches the mock server's default port.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(BASE_URL_ENV) {
            Some(url) if !url.trim().is_empty() => Self {
                base_url: url.trim().to_string(),
            },
            _ => Self::default(),
        }
    }

    pub fn client(&self) -> TodoClient {
        TodoClient::new(&self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_uses_default() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn blank_uses_default() {
        let config = Config::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn env_value_wins() {
        let config = Config::from_lookup(|key| {
            assert_eq!(key, BASE_URL_ENV);
            Some("https://api.example.com/".to_string())
        });
        assert_eq!(config.base_url, "https://api.example.com/");
        assert_eq!(config.client().base_url(), "https://api.example.com");
    }
}
