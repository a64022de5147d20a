use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_API_URL: &str = "https://api.spoonacular.com";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub provider: ProviderConfig,
    pub server: ServerConfig,
}

/// Connection details for the remote recipe provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub base_url: String,
    #[serde(skip_serializing)]
    pub api_key: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rate_limit: u64,
    pub search_freshness_seconds: u64,
}

impl ProviderConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            user_agent: format!("Recipe-Finder/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("RECIPE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_key = lookup("RECIPE_API_KEY").unwrap_or_default();

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid PORT value".to_string()))?;

        let rate_limit = lookup("RATE_LIMIT")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid RATE_LIMIT value".to_string()))?;

        let search_freshness_seconds = lookup("SEARCH_FRESHNESS_SECONDS")
            .unwrap_or_else(|| "60".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid SEARCH_FRESHNESS_SECONDS value".to_string()))?;

        Ok(Settings {
            provider: ProviderConfig::new(base_url, api_key),
            server: ServerConfig {
                host,
                port,
                rate_limit,
                search_freshness_seconds,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Config("Port must be non-zero".to_string()));
        }

        if self.server.rate_limit == 0 {
            return Err(Error::Config("Rate limit must be non-zero".to_string()));
        }

        if self.provider.api_key.trim().is_empty() {
            return Err(Error::Config("RECIPE_API_KEY must be set".to_string()));
        }

        let base = Url::parse(&self.provider.base_url)?;
        match base.scheme() {
            "http" | "https" => Ok(()),
            other => Err(Error::Config(format!(
                "RECIPE_API_URL must use http or https, got {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(pairs: &[(&str, &str)]) -> Result<Settings> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let settings = settings_from(&[("RECIPE_API_KEY", "secret")]).unwrap();
        assert_eq!(settings.provider.base_url, DEFAULT_API_URL);
        assert_eq!(settings.provider.api_key, "secret");
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.server.rate_limit, 10);
        assert_eq!(settings.server.search_freshness_seconds, 60);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = settings_from(&[("PORT", "not-a-port")]);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = settings_from(&[
            ("RECIPE_API_URL", "http://localhost:9999"),
            ("RECIPE_API_KEY", "secret"),
            ("PORT", "8080"),
        ])
        .unwrap();
        assert!(settings.validate().is_ok());

        settings.server.port = 0;
        assert!(settings.validate().is_err());
        settings.server.port = 8080;

        settings.provider.api_key = "  ".to_string();
        assert!(settings.validate().is_err());
        settings.provider.api_key = "secret".to_string();

        settings.provider.base_url = "ftp://example.com".to_string();
        assert!(settings.validate().is_err());

        settings.provider.base_url = "not a url".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_api_key_is_not_serialized() {
        let settings = settings_from(&[("RECIPE_API_KEY", "secret")]).unwrap();
        let json = serde_json::to_string(&settings).unwrap();
        assert!(!json.contains("secret"));
    }
}
