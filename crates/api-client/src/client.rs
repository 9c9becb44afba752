//! Main API client implementation

use crate::config::ClientConfig;
use crate::endpoints::{AdminApi, ClientApi, VendorApi};
use crate::error::{normalize, ApiError, ApiResult, ErrorSpec, RawError};
use eventmart_core::{Role, TokenHolder};
use eventmart_telemetry::RequestTimer;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// EventMart API client
///
/// Issues exactly one HTTP request per call. There is no retry, caching or
/// de-duplication here; the hook layer owns those concerns. When the token
/// holder has a token for the calling role it is sent as a bearer token.
#[derive(Clone)]
pub struct MarketplaceClient {
    inner: Client,
    config: Arc<ClientConfig>,
    tokens: TokenHolder,
}

impl MarketplaceClient {
    /// Create a new client with configuration from the environment
    pub fn new() -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        Self::with_tokens(config, TokenHolder::new())
    }

    /// Create a client that reads access tokens from a shared holder
    pub fn with_tokens(config: ClientConfig, tokens: TokenHolder) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("eventmart-api-client/", env!("CARGO_PKG_VERSION"))),
        );

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(|e| ApiError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            inner,
            config: Arc::new(config),
            tokens,
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Shared access token holder
    #[must_use]
    pub fn tokens(&self) -> &TokenHolder {
        &self.tokens
    }

    // -------------------------------------------------------------------------
    // Role API accessors
    // -------------------------------------------------------------------------

    /// Access admin endpoints
    #[must_use]
    pub fn admin(&self) -> AdminApi {
        AdminApi::new(self.clone())
    }

    /// Access vendor endpoints
    #[must_use]
    pub fn vendor(&self) -> VendorApi {
        VendorApi::new(self.clone())
    }

    /// Access client endpoints
    #[must_use]
    pub fn client(&self) -> ClientApi {
        ClientApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Low-level HTTP methods
    // -------------------------------------------------------------------------

    /// Perform a GET request against a role's API
    pub async fn get<T: DeserializeOwned>(
        &self,
        role: Role,
        path: &str,
        spec: ErrorSpec,
    ) -> ApiResult<T> {
        self.request(role, Method::GET, path, Option::<&()>::None, spec)
            .await
    }

    /// Perform a POST request against a role's API
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        role: Role,
        path: &str,
        body: &B,
        spec: ErrorSpec,
    ) -> ApiResult<T> {
        self.request(role, Method::POST, path, Some(body), spec).await
    }

    /// Perform a PATCH request against a role's API
    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        role: Role,
        path: &str,
        body: &B,
        spec: ErrorSpec,
    ) -> ApiResult<T> {
        self.request(role, Method::PATCH, path, Some(body), spec).await
    }

    fn url_for(&self, role: Role, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.url_for(role).trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Execute a single request and normalize any failure
    #[instrument(skip(self, body), fields(operation = spec.operation, request_id))]
    async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        role: Role,
        method: Method,
        path: &str,
        body: Option<&B>,
        spec: ErrorSpec,
    ) -> ApiResult<T> {
        let url = self.url_for(role, path);
        let request_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("request_id", request_id.as_str());

        let timer = RequestTimer::start(spec.operation);

        let mut request = self
            .inner
            .request(method.clone(), &url)
            .header(X_REQUEST_ID, &request_id);

        if let Some(token) = self.tokens.get(role) {
            request = request.bearer_auth(token);
        }

        if let Some(b) = body {
            request = request.json(b);
        }

        debug!(%method, %url, "Sending request");

        let result = match request.send().await {
            Ok(response) => {
                let status = response.status();
                match response.text().await {
                    Ok(text) if status.is_success() => serde_json::from_str::<T>(&text)
                        .map_err(|e| RawError::Decode(e.to_string())),
                    Ok(text) => Err(RawError::Response {
                        status: status.as_u16(),
                        body: text,
                    }),
                    Err(e) => Err(RawError::Transport(e.to_string())),
                }
            }
            Err(e) => Err(RawError::Transport(e.to_string())),
        };

        let elapsed = timer.finish(result.is_ok());
        match result {
            Ok(value) => {
                debug!(elapsed_ms = elapsed.as_millis(), "Request succeeded");
                Ok(value)
            }
            Err(raw) => Err(normalize(raw, spec)),
        }
    }
}
