use serde::Deserialize;
use std::time::Duration;

/// Browser-like user agent sent to every target
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub const DEFAULT_GPR_BASE_URL: &str = "https://ssl.doas.state.ga.us/gpr/index";
pub const DEFAULT_GPR_SEARCH_URL: &str = "https://ssl.doas.state.ga.us/gpr/eventSearch";
pub const DEFAULT_GPR_DETAILS_URL: &str = "https://ssl.doas.state.ga.us/gpr/eventDetails";

/// Main configuration structure for Procurement-Scout
///
/// Every section is optional; an empty file yields the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub logging: LoggingConfig,
    pub http: HttpConfig,
    #[serde(rename = "georgia-gpr")]
    pub georgia_gpr: GprConfig,
}

/// Engine run configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Deadline for a whole run (seconds)
    #[serde(rename = "run-timeout-secs")]
    pub run_timeout_secs: u64,
}

impl EngineConfig {
    pub fn run_timeout(&self) -> Duration {
        Duration::from_secs(self.run_timeout_secs)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            run_timeout_secs: 300,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of trace, debug, info, warn, error
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Shared HTTP client settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Whole-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// TCP/TLS connect timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: 60,
            connect_timeout_secs: 10,
        }
    }
}

/// Georgia Procurement Registry adapter settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GprConfig {
    /// Whether the adapter is registered with the engine
    pub enabled: bool,

    /// Landing page that issues the session cookie
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Paginated search endpoint
    #[serde(rename = "search-url")]
    pub search_url: String,

    /// Detail page endpoint
    #[serde(rename = "details-url")]
    pub details_url: String,

    /// Rows requested from the search endpoint in one page
    #[serde(rename = "page-size")]
    pub page_size: u32,

    /// Pause before each detail-page fetch (milliseconds)
    #[serde(rename = "politeness-delay-ms")]
    pub politeness_delay_ms: u64,
}

impl GprConfig {
    pub fn politeness_delay(&self) -> Duration {
        Duration::from_millis(self.politeness_delay_ms)
    }
}

impl Default for GprConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: DEFAULT_GPR_BASE_URL.to_string(),
            search_url: DEFAULT_GPR_SEARCH_URL.to_string(),
            details_url: DEFAULT_GPR_DETAILS_URL.to_string(),
            page_size: 50,
            politeness_delay_ms: 200,
        }
    }
}
