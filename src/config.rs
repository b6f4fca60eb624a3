/// Where the registration backend lives.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const REGISTER_PATH: &str = "/api/users/register";
pub const FALLBACK_PATH: &str = "/api/users";

// Baked into the client bundle at build time.
const COMPILED_API_URL: Option<&str> = option_env!("REGISTRATION_API_URL");
const COMPILED_FALLBACK: Option<&str> = option_env!("REGISTRATION_FALLBACK");

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API base URL must start with http:// or https://, got {0:?}")]
    InvalidBaseUrl(String),
    #[error("fallback policy must be \"always\" or \"server-faults\", got {0:?}")]
    InvalidFallbackPolicy(String),
}

/// When the secondary endpoint is tried after the primary one failed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Any failure of the primary endpoint, client rejections included.
    #[default]
    Always,
    /// Only when the primary endpoint was unreachable or answered 404 or 5xx.
    ServerFaultsOnly,
}

impl FallbackPolicy {
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.trim().to_lowercase().as_str() {
            "always" => Ok(FallbackPolicy::Always),
            "server-faults" => Ok(FallbackPolicy::ServerFaultsOnly),
            _ => Err(ConfigError::InvalidFallbackPolicy(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub register_path: String,
    pub fallback_path: String,
    pub fallback_policy: FallbackPolicy,
}

impl Default for ApiConfig {
    /// The compiled-in configuration. Invalid build-time values are logged and
    /// replaced by the built-in defaults; the server refuses to start with them.
    fn default() -> Self {
        Self::compiled().unwrap_or_else(|e| {
            log::error!("Ignoring build-time registration API configuration: {e}");
            Self::with_base_url(DEFAULT_API_URL)
        })
    }
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        check_base_url(base_url)?;
        Ok(Self::with_base_url(base_url))
    }

    fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            register_path: REGISTER_PATH.into(),
            fallback_path: FALLBACK_PATH.into(),
            fallback_policy: FallbackPolicy::default(),
        }
    }

    /// Configuration from `REGISTRATION_API_URL` and `REGISTRATION_FALLBACK` as
    /// they were set when the crate was built.
    pub fn compiled() -> Result<Self, ConfigError> {
        Self::from_values(COMPILED_API_URL, COMPILED_FALLBACK)
    }

    /// Same variables, read from the process environment.
    #[cfg(feature = "ssr")]
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var("REGISTRATION_API_URL").ok();
        let fallback = std::env::var("REGISTRATION_FALLBACK").ok();
        Self::from_values(url.as_deref(), fallback.as_deref())
    }

    fn from_values(url: Option<&str>, fallback: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = Self::new(url.unwrap_or(DEFAULT_API_URL))?;
        if let Some(policy) = fallback {
            config.fallback_policy = FallbackPolicy::parse(policy)?;
        }
        Ok(config)
    }

    pub fn register_url(&self) -> String {
        format!("{}{}", self.base_url, self.register_path)
    }

    pub fn fallback_url(&self) -> String {
        format!("{}{}", self.base_url, self.fallback_path)
    }
}

fn check_base_url(base_url: &str) -> Result<(), ConfigError> {
    if base_url.starts_with("http://") || base_url.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidBaseUrl(base_url.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_urls() {
        let config = ApiConfig::new("http://api.test:5000/").unwrap();
        assert_eq!(config.register_url(), "http://api.test:5000/api/users/register");
        assert_eq!(config.fallback_url(), "http://api.test:5000/api/users");
        assert_eq!(config.fallback_policy, FallbackPolicy::Always);
    }

    #[test]
    fn rejects_urls_without_scheme() {
        assert_eq!(
            ApiConfig::new("localhost:5000"),
            Err(ConfigError::InvalidBaseUrl("localhost:5000".into()))
        );
    }

    #[test]
    fn build_time_configuration_is_valid() {
        let compiled = ApiConfig::compiled().unwrap();
        assert_eq!(ApiConfig::default(), compiled);
    }

    #[test]
    fn build_time_values_are_checked() {
        assert_eq!(
            ApiConfig::from_values(Some("api.test"), None),
            Err(ConfigError::InvalidBaseUrl("api.test".into()))
        );
        assert_eq!(
            ApiConfig::from_values(None, Some("sometimes")),
            Err(ConfigError::InvalidFallbackPolicy("sometimes".into()))
        );

        let config = ApiConfig::from_values(None, Some("server-faults")).unwrap();
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.fallback_policy, FallbackPolicy::ServerFaultsOnly);
    }

    #[test]
    fn fallback_policy_names() {
        assert_eq!(FallbackPolicy::parse("Always"), Ok(FallbackPolicy::Always));
        assert_eq!(
            FallbackPolicy::parse(" server-faults "),
            Ok(FallbackPolicy::ServerFaultsOnly)
        );
    }
}
