use crate::settings::Settings;

const PRODUCTION_API_URL: &str = "https://api.uptogo.com.br";
const PRODUCTION_APP_URL: &str = "https://web.uptogo.com.br";
const DEVELOPMENT_API_URL: &str = "http://localhost/uptogo/api";
const DEVELOPMENT_APP_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Base URL of the Uptogo REST API for this environment.
    #[must_use]
    pub fn api_base_url(self) -> &'static str {
        match self {
            Environment::Development => DEVELOPMENT_API_URL,
            Environment::Production => PRODUCTION_API_URL,
        }
    }

    /// Base URL of the Uptogo web app, used for delivery tracking links.
    #[must_use]
    pub fn app_base_url(self) -> &'static str {
        match self {
            Environment::Development => DEVELOPMENT_APP_URL,
            Environment::Production => PRODUCTION_APP_URL,
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub api_base_url: String,
    pub app_base_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub settings: Settings,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("api_base_url", &self.api_base_url)
            .field("app_base_url", &self.app_base_url)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("settings", &self.settings)
            .finish()
    }
}
