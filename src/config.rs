use reqwest::header::{HeaderMap, HeaderValue};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";
const DEFAULT_TIMEOUT_SECS: u64 = 600;
pub const DEFAULT_USER_AGENT: &str = "pokedex-gallery/0.1.0";

/// Environment variable that overrides the API base URL.
pub const BASE_URL_ENV: &str = "POKEAPI_BASE_URL";

/// Configuration for the PokeAPI client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub default_headers: HeaderMap,
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a new ClientConfig from environment variables and defaults.
    ///
    /// Falls back to the public PokeAPI endpoint if `POKEAPI_BASE_URL` is not set.
    pub fn from_env() -> Self {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_headers: HeaderMap::new(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Build the headers sent with every request.
    pub fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert(
            reqwest::header::ACCEPT,
            HeaderValue::from_static("application/json"),
        );
        if let Ok(val) = HeaderValue::from_str(&self.user_agent) {
            headers.insert(reqwest::header::USER_AGENT, val);
        }

        // User-provided headers win over the built-in ones
        for (key, value) in &self.default_headers {
            headers.insert(key, value.clone());
        }

        headers
    }

    /// Resolve a request target against the base URL.
    ///
    /// Absolute `http(s)://` targets (pagination cursors, entry URLs) pass
    /// through untouched; anything else is treated as a path under the base.
    pub fn resolve(&self, target: &str) -> String {
        if target.starts_with("http://") || target.starts_with("https://") {
            return target.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            target.trim_start_matches('/')
        )
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> ClientConfig {
        ClientConfig {
            base_url: base_url.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_headers: HeaderMap::new(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    #[test]
    fn test_build_headers_defaults() {
        let headers = config(DEFAULT_BASE_URL).build_headers();
        assert_eq!(headers.get("accept").unwrap(), "application/json");
        assert_eq!(headers.get("user-agent").unwrap(), DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_custom_default_headers_override() {
        let mut cfg = config(DEFAULT_BASE_URL);
        cfg.default_headers
            .insert("accept", HeaderValue::from_static("text/plain"));
        let headers = cfg.build_headers();
        assert_eq!(headers.get("accept").unwrap(), "text/plain");
    }

    #[test]
    fn test_resolve_relative_path() {
        let cfg = config("https://pokeapi.co/api/v2/");
        assert_eq!(
            cfg.resolve("/pokemon?limit=50"),
            "https://pokeapi.co/api/v2/pokemon?limit=50"
        );
        assert_eq!(
            cfg.resolve("pokemon/pikachu"),
            "https://pokeapi.co/api/v2/pokemon/pikachu"
        );
    }

    #[test]
    fn test_resolve_absolute_passthrough() {
        let cfg = config(DEFAULT_BASE_URL);
        let cursor = "https://pokeapi.co/api/v2/pokemon?offset=50&limit=50";
        assert_eq!(cfg.resolve(cursor), cursor);
        assert_eq!(
            cfg.resolve("http://127.0.0.1:9000/pokemon/25/"),
            "http://127.0.0.1:9000/pokemon/25/"
        );
    }
}
