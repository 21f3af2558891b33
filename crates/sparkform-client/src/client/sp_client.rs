//! SparkPost HTTP client implementation.

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

use crate::webhook::{Webhook, WebhookApi, WebhookInput, WebhookService};
use crate::{Error, Result, SpConfig, TRACING_TARGET_CLIENT, TRACING_TARGET_HTTP};

/// Path of the webhooks collection relative to the base URL.
const WEBHOOKS_PATH: [&str; 3] = ["api", "v1", "webhooks"];

/// HTTP client for the SparkPost Webhooks API.
///
/// # Examples
///
/// ```ignore
/// use sparkform_client::{SpClient, SpConfig, WebhookApi};
///
/// let client = SpClient::new(SpConfig::new("my-api-key"))?;
/// let webhook = client.fetch_webhook("e4093700-7733-11ed-9039-2f08fa6ecfde").await?;
/// ```
#[derive(Debug, Clone)]
pub struct SpClient {
    /// HTTP client
    http_client: Client,

    /// Parsed base URL
    base_url: Url,

    /// Configuration
    config: SpConfig,
}

impl SpClient {
    /// Create a new SparkPost client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: SpConfig) -> Result<Self> {
        config.validate()?;
        let base_url = config.parsed_base_url()?;

        let mut api_key = HeaderValue::from_str(config.api_key.trim())
            .map_err(|e| Error::config(format!("Invalid API key: {}", e)))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, api_key);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http_client = Client::builder()
            .timeout(config.effective_timeout())
            .user_agent(config.effective_user_agent())
            .default_headers(headers)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        debug!(
            target: TRACING_TARGET_CLIENT,
            base_url = %base_url,
            timeout = ?config.effective_timeout(),
            "SparkPost client initialized"
        );

        Ok(Self {
            http_client,
            base_url,
            config,
        })
    }

    /// Get a reference to the client configuration.
    pub fn config(&self) -> &SpConfig {
        &self.config
    }

    /// Converts this client into a [`WebhookService`] for use with dependency injection.
    pub fn into_service(self) -> WebhookService {
        WebhookService::new(self)
    }

    /// Builds the URL of the webhooks collection, or of one webhook when `id` is given.
    fn webhooks_url(&self, id: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.clone();

        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| Error::config("Base URL cannot be used as a base"))?;
            segments.pop_if_empty().extend(WEBHOOKS_PATH);
            if let Some(id) = id {
                segments.push(id);
            }
        }

        Ok(url)
    }

    /// Sends a request and turns unsuccessful statuses into classified errors.
    async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();

        debug!(
            target: TRACING_TARGET_HTTP,
            status = status.as_u16(),
            url = %response.url(),
            "Received response from SparkPost"
        );

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.ok().unwrap_or_default();
        let (message, code) = match serde_json::from_str::<ErrorEnvelope>(&body) {
            Ok(envelope) if !envelope.errors.is_empty() => envelope.summarize(),
            _ if !body.trim().is_empty() => (body, None),
            _ => (status.to_string(), None),
        };

        Err(Error::from_status(status.as_u16(), message, code))
    }

    /// Decodes the `results` object of a successful response.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let body = response.text().await?;
        serde_json::from_str::<ResultsEnvelope<T>>(&body)
            .map(|envelope| envelope.results)
            .map_err(|e| {
                Error::invalid_response(format!("Failed to parse response: {}", e), Some(body))
            })
    }
}

#[async_trait::async_trait]
impl WebhookApi for SpClient {
    async fn fetch_webhook(&self, id: &str) -> Result<Webhook> {
        let url = self.webhooks_url(Some(id))?;
        debug!(target: TRACING_TARGET_HTTP, url = %url, "Fetching webhook");

        let response = self.execute(self.http_client.get(url)).await?;
        Self::decode(response).await
    }

    async fn create_webhook(&self, input: &WebhookInput) -> Result<String> {
        let url = self.webhooks_url(None)?;
        debug!(target: TRACING_TARGET_HTTP, url = %url, "Creating webhook");

        let response = self
            .execute(self.http_client.post(url).json(input))
            .await?;
        let created: CreatedWebhook = Self::decode(response).await?;

        if created.id.is_empty() {
            return Err(Error::invalid_response(
                "SparkPost returned an empty webhook id",
                None,
            ));
        }

        info!(
            target: TRACING_TARGET_CLIENT,
            webhook_id = %created.id,
            "Webhook created"
        );

        Ok(created.id)
    }

    async fn update_webhook(&self, id: &str, input: &WebhookInput) -> Result<()> {
        let url = self.webhooks_url(Some(id))?;
        debug!(target: TRACING_TARGET_HTTP, url = %url, "Updating webhook");

        self.execute(self.http_client.put(url).json(input)).await?;
        Ok(())
    }

    async fn delete_webhook(&self, id: &str) -> Result<()> {
        let url = self.webhooks_url(Some(id))?;
        debug!(target: TRACING_TARGET_HTTP, url = %url, "Deleting webhook");

        self.execute(self.http_client.delete(url)).await?;

        info!(
            target: TRACING_TARGET_CLIENT,
            webhook_id = %id,
            "Webhook deleted"
        );

        Ok(())
    }
}

/// Successful response envelope.
#[derive(Debug, Deserialize)]
struct ResultsEnvelope<T> {
    results: T,
}

/// Result of a create call.
#[derive(Debug, Deserialize)]
struct CreatedWebhook {
    #[serde(default)]
    id: String,
}

/// Error response envelope.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<ApiError>,
}

/// Single error entry reported by SparkPost.
#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl ErrorEnvelope {
    /// Joins all reported errors into one message and keeps the first code.
    fn summarize(self) -> (String, Option<String>) {
        let code = self.errors.iter().find_map(|e| e.code.clone());
        let message = self
            .errors
            .into_iter()
            .map(|e| match e.description {
                Some(description) if !description.is_empty() => {
                    format!("{}: {}", e.message, description)
                }
                _ => e.message,
            })
            .collect::<Vec<_>>()
            .join("; ");

        (message, code)
    }
}
