use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::Error;

/// Shared inner state for the client.
pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) config: ClientConfig,
}

/// The PokeAPI client.
///
/// Holds an `Arc<ClientInner>` for cheap cloning. Services borrow `&Client`.
#[derive(Clone)]
pub struct Client {
    pub(crate) inner: Arc<ClientInner>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.config.base_url)
            .field("timeout", &self.inner.config.timeout)
            .finish()
    }
}

impl Client {
    /// Create a new client with default configuration from environment variables.
    ///
    /// Reads `POKEAPI_BASE_URL` from the environment.
    pub fn new() -> Self {
        ClientBuilder::new().build()
    }

    /// Create a new `ClientBuilder` for customizing client configuration.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Access the Pokemon service.
    pub fn pokemon(&self) -> crate::pokemon::PokemonService<'_> {
        crate::pokemon::PokemonService::new(self)
    }

    /// The base URL relative targets are resolved against.
    pub fn base_url(&self) -> &str {
        &self.inner.config.base_url
    }

    /// Execute a GET request, deserializing the JSON response into `T`.
    pub(crate) async fn get<T: DeserializeOwned>(&self, target: &str) -> Result<T, Error> {
        let bytes = self.execute_raw(target).await?;
        let result = serde_json::from_slice(&bytes)?;
        Ok(result)
    }

    /// Execute a GET request whose body may legitimately be absent.
    ///
    /// An empty body, a whitespace-only body, or a literal JSON `null` all
    /// yield `Ok(None)`.
    pub(crate) async fn get_optional<T: DeserializeOwned>(
        &self,
        target: &str,
    ) -> Result<Option<T>, Error> {
        let bytes = self.execute_raw(target).await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        let result = serde_json::from_slice::<Option<T>>(&bytes)?;
        Ok(result)
    }

    /// Execute a raw GET request against `target`.
    ///
    /// `target` is either a path relative to the base URL or an absolute URL
    /// handed out by the API. Returns the raw response bytes on success.
    pub(crate) async fn execute_raw(&self, target: &str) -> Result<bytes::Bytes, Error> {
        let inner = &self.inner;
        let url = inner.config.resolve(target);
        let parsed = reqwest::Url::parse(&url).map_err(|_| Error::InvalidUrl(url.clone()))?;

        let request = inner
            .http
            .get(parsed)
            .headers(inner.config.build_headers())
            .build()
            .map_err(Error::Http)?;

        debug!(url = %url, "executing request");

        let response = inner.http.execute(request).await.map_err(Error::Http)?;
        let status = response.status().as_u16();

        if status >= 400 {
            let body_bytes = response.bytes().await.map_err(Error::Http)?;
            return Err(Error::Api {
                status,
                message: String::from_utf8_lossy(&body_bytes).trim().to_string(),
            });
        }

        let bytes = response.bytes().await.map_err(Error::Http)?;
        debug!(url = %url, status, len = bytes.len(), "request complete");
        Ok(bytes)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a `Client` with custom configuration.
pub struct ClientBuilder {
    config: ClientConfig,
    http_client: Option<reqwest::Client>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::from_env(),
            http_client: None,
        }
    }

    /// Set the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Ignored if a custom `http_client` is provided.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set a custom reqwest HTTP client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Set the User-Agent string.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config.user_agent = ua.into();
        self
    }

    /// Add a default header.
    pub fn default_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            name.parse::<reqwest::header::HeaderName>(),
            value.parse::<reqwest::header::HeaderValue>(),
        ) {
            self.config.default_headers.insert(name, value);
        }
        self
    }

    /// Build the `Client`.
    ///
    /// Fails only if the underlying TLS backend cannot be initialised.
    pub fn try_build(self) -> Result<Client, Error> {
        let http = match self.http_client {
            Some(http) => http,
            None => reqwest::Client::builder()
                .timeout(self.config.timeout)
                .build()
                .map_err(Error::Http)?,
        };

        Ok(Client {
            inner: Arc::new(ClientInner {
                http,
                config: self.config,
            }),
        })
    }

    /// Build the `Client`.
    ///
    /// # Panics
    ///
    /// Panics if the reqwest client cannot be constructed; use
    /// [`try_build`](Self::try_build) to handle that case.
    pub fn build(self) -> Client {
        self.try_build().expect("failed to build reqwest client")
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
