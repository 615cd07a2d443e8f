use reqwest::Client;
use url::Url;

use crate::error::{Error, ErrorCode, Result};

/// Default base URL for the Slack Web API
pub const DEFAULT_BASE_URL: &str = "https://slack.com/api";

/// Slack Web API client.
///
/// Holds the bot token for the lifetime of one request's delivery; nothing
/// here is mutated after construction, so a client can be shared freely
/// between concurrent requests without locking.
pub struct SlackClient {
    /// HTTP client for REST API calls
    pub(crate) http_client: Client,
    /// Base URL for the Web API (overridable for tests)
    base_url: Url,
    /// Bot token sent as a bearer Authorization header
    token: String,
}

impl SlackClient {
    /// Create a new Slack client.
    ///
    /// # Arguments
    /// * `token` - The bot token used for every call
    /// * `base_url` - The Web API base URL, normally [`DEFAULT_BASE_URL`]
    ///
    /// # Returns
    /// A Result containing the SlackClient or an Error
    pub fn new(token: impl Into<String>, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::new(ErrorCode::InvalidArgument, format!("Invalid URL: {e}")))?;

        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| {
                Error::new(ErrorCode::Network, format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            http_client,
            base_url,
            token: token.into(),
        })
    }

    /// Build the full URL for a Web API method
    ///
    /// # Arguments
    /// * `method` - The API method name (e.g., "chat.postMessage")
    ///
    /// # Returns
    /// The full URL string
    pub fn api_url(&self, method: &str) -> String {
        let method = method.trim_start_matches('/');
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/{method}")
    }

    /// Make a GET request to a Web API method
    ///
    /// # Arguments
    /// * `method` - The API method name
    /// * `query` - Query string parameters
    ///
    /// # Returns
    /// A Result containing the reqwest::Response or an Error
    pub async fn get(&self, method: &str, query: &[(&str, &str)]) -> Result<reqwest::Response> {
        let url = self.api_url(method);

        self.http_client
            .get(&url)
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await
            .map_err(|e| Error::new(ErrorCode::Network, format!("GET request failed: {e}")))
    }

    /// Make a POST request to a Web API method
    ///
    /// # Arguments
    /// * `method` - The API method name
    /// * `body` - The request body (will be serialized to JSON)
    ///
    /// # Returns
    /// A Result containing the reqwest::Response or an Error
    pub async fn post<T: serde::Serialize>(
        &self,
        method: &str,
        body: &T,
    ) -> Result<reqwest::Response> {
        let url = self.api_url(method);

        self.http_client
            .post(&url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::new(ErrorCode::Network, format!("POST request failed: {e}")))
    }
}
