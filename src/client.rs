//! YesDev API client.
//!
//! Low-level HTTP client that handles authentication and the envelope
//! contract. Every YesDev operation is a POST to one endpoint, selected by
//! the `s` query parameter ("service"). Higher-level operations are
//! implemented via traits on entity types.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;

use crate::config::Settings;
use crate::envelope::Envelope;
use crate::error::{Result, YesDevError};

const USER_AGENT: &str = concat!("yesdev-mcp/", env!("CARGO_PKG_VERSION"));
const TOKEN_FIELD: &str = "access_token";
const REDACTED: &str = "[HIDDEN]";

/// Low-level YesDev API client.
///
/// Handles authentication and HTTP requests. Entity-specific operations
/// are implemented via the `Get`, `Create`, `Update`, `Remove` and `List`
/// traits on model types.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use yesdev_mcp::YesDevClient;
///
/// # async fn example() -> yesdev_mcp::Result<()> {
/// // Create from environment variables
/// let client = YesDevClient::from_env()?;
///
/// // Or configure manually
/// let client = YesDevClient::new("your-token", "https://www.yesdev.cn/api/platform.php")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct YesDevClient {
    http: Client,
    endpoint: Arc<Url>,
    token: String,
}

impl std::fmt::Debug for YesDevClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YesDevClient")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl YesDevClient {
    /// Create a client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `YESDEV_ACCESS_TOKEN` is not set.
    pub fn from_env() -> Result<Self> {
        Self::from_settings(&Settings::from_env()?)
    }

    /// Create a client from resolved settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the API URL is invalid.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(&settings.access_token, &settings.api_url)
    }

    /// Create a new client with the provided token and endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URL is invalid.
    pub fn new(token: &str, api_url: &str) -> Result<Self> {
        let endpoint = Url::parse(api_url)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(YesDevError::HttpError)?;

        Ok(Self {
            http,
            endpoint: Arc::new(endpoint),
            token: token.to_string(),
        })
    }

    /// Get the endpoint URL.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// URL for one service: the endpoint with `?s=<service>` appended.
    pub fn service_url(&self, service: &str) -> Url {
        let mut url = (*self.endpoint).clone();
        url.query_pairs_mut().append_pair("s", service);
        url
    }

    /// Call a service and return the raw envelope.
    ///
    /// Only transport-level problems are errors here; an envelope with
    /// `ret != 200` is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, non-2xx status, or a body that
    /// is not a JSON envelope.
    #[tracing::instrument(skip(self, params))]
    pub async fn call_raw<P: Serialize + ?Sized>(
        &self,
        service: &str,
        params: &P,
    ) -> Result<Envelope> {
        let fields = Self::param_fields(params)?;
        tracing::info!(service, params = %Self::redacted(&fields), "calling YesDev API");

        let mut body = Map::with_capacity(fields.len() + 1);
        body.insert(TOKEN_FIELD.to_string(), Value::String(self.token.clone()));
        body.extend(fields);

        let response = self
            .http
            .post(self.service_url(service))
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(service, error = %e, "YesDev API request failed");
                YesDevError::HttpError(e)
            })?;

        let response = Self::check_response(service, response).await?;
        let status = response.status();
        let text = response.text().await?;
        let envelope: Envelope = serde_json::from_str(&text).map_err(|e| {
            tracing::warn!(service, status = status.as_u16(), error = %e, "unexpected YesDev response body");
            YesDevError::ParseError(e)
        })?;

        tracing::info!(
            service,
            status = status.as_u16(),
            ret = envelope.ret,
            msg = %envelope.msg,
            "YesDev API response"
        );
        Ok(envelope)
    }

    /// Call a service and decode its `data` payload.
    ///
    /// # Errors
    ///
    /// Returns [`YesDevError::Remote`] when `ret != 200`,
    /// [`YesDevError::MissingData`] when `data` is absent, plus any transport error.
    pub async fn call<P, T>(&self, service: &str, params: &P) -> Result<T>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.call_raw(service, params).await?.into_data(service)
    }

    /// Call a service whose payload is irrelevant (delete, update, check...).
    ///
    /// # Errors
    ///
    /// Returns [`YesDevError::Remote`] when `ret != 200`, plus any transport error.
    pub async fn call_unit<P: Serialize + ?Sized>(&self, service: &str, params: &P) -> Result<()> {
        self.call_raw(service, params).await?.into_unit()
    }

    fn param_fields<P: Serialize + ?Sized>(params: &P) -> Result<Map<String, Value>> {
        match serde_json::to_value(params)? {
            Value::Object(map) => Ok(map),
            Value::Null => Ok(Map::new()),
            other => Err(YesDevError::InvalidArgument(format!(
                "service parameters must serialize to a JSON object, got {other}"
            ))),
        }
    }

    /// The outgoing parameters as they appear in logs.
    fn redacted(fields: &Map<String, Value>) -> Value {
        let mut shown = Map::with_capacity(fields.len() + 1);
        shown.insert(TOKEN_FIELD.to_string(), Value::String(REDACTED.to_string()));
        for (k, v) in fields {
            if k != TOKEN_FIELD {
                shown.insert(k.clone(), v.clone());
            }
        }
        Value::Object(shown)
    }

    /// Check response status and convert errors.
    async fn check_response(service: &str, response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let message = Self::extract_error_message(response, status).await;
        tracing::warn!(service, status = status.as_u16(), %message, "YesDev API returned an error status");
        Err(YesDevError::ApiError {
            message,
            status_code: Some(status.as_u16()),
        })
    }

    /// Extract error message from a failed response.
    async fn extract_error_message(response: Response, status: StatusCode) -> String {
        let fallback = || {
            status
                .canonical_reason()
                .map_or_else(|| format!("HTTP {status}"), str::to_string)
        };

        let Ok(body) = response.text().await else {
            return fallback();
        };

        if let Ok(json) = serde_json::from_str::<Value>(&body) {
            for key in ["msg", "message", "error"] {
                if let Some(msg) = json.get(key).and_then(Value::as_str) {
                    if !msg.trim().is_empty() {
                        return msg.to_string();
                    }
                }
            }
        }

        fallback()
    }
}
