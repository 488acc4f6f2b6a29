use figment::providers::{Env, Format, Toml};
use figment::Figment;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const ENV_PREFIX: &str = "DATASET_INSPECTOR_";
pub const CONFIG_FILE: &str = "dataset-inspector.toml";

const BASE_URL_KEY: &str = "api_base_url";
const TIMEOUT_KEY: &str = "timeout_ms";
const ANALYZE_PATH: &str = "analyze_dataset/";

/// Analysis service settings, resolved once at startup and passed down
/// explicitly. Nothing below this struct reads the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    base_url: String,
    timeout: Duration,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl AnalysisConfig {
    /// Loads `.env`, then the optional TOML file, then prefixed environment
    /// variables (highest precedence).
    pub fn load() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "Loaded .env file");
        }
        let figment = Figment::new()
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX));
        Self::from_figment(&figment)
    }

    /// Missing or invalid values fall back to their defaults.
    pub fn from_figment(figment: &Figment) -> Self {
        Self {
            base_url: resolve_base_url(figment),
            timeout: Duration::from_millis(resolve_timeout_ms(figment)),
        }
    }

    pub fn with_overrides(mut self, base_url: Option<String>, timeout_ms: Option<u64>) -> Self {
        if let Some(base_url) = base_url {
            match normalize_base_url(&base_url) {
                Some(normalized) => self.base_url = normalized,
                None => warn!(value = %base_url, "Ignoring invalid base URL override"),
            }
        }
        match timeout_ms {
            Some(0) => warn!("Ignoring zero timeout override"),
            Some(ms) => self.timeout = Duration::from_millis(ms),
            None => {}
        }
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `{base_url}/analyze_dataset/`
    pub fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url, ANALYZE_PATH)
    }
}

fn resolve_base_url(figment: &Figment) -> String {
    if figment.find_value(BASE_URL_KEY).is_err() {
        return DEFAULT_BASE_URL.to_string();
    }
    match figment.extract_inner::<String>(BASE_URL_KEY) {
        Ok(value) => normalize_base_url(&value).unwrap_or_else(|| {
            warn!(value = %value, default = DEFAULT_BASE_URL, "Invalid base URL, using default");
            DEFAULT_BASE_URL.to_string()
        }),
        Err(err) => {
            warn!(error = %err, default = DEFAULT_BASE_URL, "Unreadable base URL, using default");
            DEFAULT_BASE_URL.to_string()
        }
    }
}

fn resolve_timeout_ms(figment: &Figment) -> u64 {
    if figment.find_value(TIMEOUT_KEY).is_err() {
        return DEFAULT_TIMEOUT_MS;
    }
    match figment.extract_inner::<u64>(TIMEOUT_KEY) {
        Ok(0) => {
            warn!(default = DEFAULT_TIMEOUT_MS, "Timeout must be positive, using default");
            DEFAULT_TIMEOUT_MS
        }
        Ok(ms) => ms,
        Err(err) => {
            warn!(error = %err, default = DEFAULT_TIMEOUT_MS, "Invalid timeout, using default");
            DEFAULT_TIMEOUT_MS
        }
    }
}

/// Accepts absolute http(s) URLs only; strips trailing slashes.
fn normalize_base_url(value: &str) -> Option<String> {
    let trimmed = value.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    let url = Url::parse(trimmed).ok()?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return None;
    }
    Some(trimmed.to_string())
}
