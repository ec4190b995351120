use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api-dev.wellspring.edu.vn";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Where the school backend lives.
///
/// `API_URL` defaults to `BASE_URL` + `/api`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let base_url = env::var("BASE_URL")
            .ok()
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let api_url = env::var("API_URL")
            .ok()
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| format!("{base_url}/api"));

        let timeout_ms = env::var("API_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        Self {
            base_url,
            api_url,
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    /// Join an endpoint path onto `api_url`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_url: format!("{DEFAULT_BASE_URL}/api"),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}
