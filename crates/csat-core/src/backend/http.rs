//! reqwest-based backend implementation

use super::types::{ApiReply, Credentials, SurveySubmission};
use super::SurveyBackend;
use crate::config::{BackendConfig, EndpointPaths};
use crate::error::{SurveyError, SurveyResult};
use async_trait::async_trait;
use reqwest::{Client, Method, Url};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, instrument};

/// Talks to the survey API over HTTP
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http_client: Client,
    base_url: Url,
    endpoints: EndpointPaths,
}

impl HttpBackend {
    /// Create a backend client from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the base URL is invalid or the HTTP
    /// client cannot be built.
    pub fn new(config: &BackendConfig) -> SurveyResult<Self> {
        config.validate()?;

        let http_client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| SurveyError::config(format!("Failed to create HTTP client: {}", e)))?;

        debug!(
            "Created survey backend client for '{}' with timeouts: connection={}s, request={}s",
            config.base_url, config.connect_timeout_secs, config.request_timeout_secs
        );

        Ok(Self {
            http_client,
            base_url: config.url()?,
            endpoints: config.endpoints.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Join an endpoint path onto the base URL, keeping any base path prefix
    fn endpoint_url(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let prefix = self.base_url.path().trim_end_matches('/');
        url.set_path(&format!("{}{}", prefix, path));
        url
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> SurveyResult<ApiReply> {
        let url_text = url.to_string();
        let mut request = self.http_client.request(method.clone(), url);
        if let Some(body) = body {
            request = request.json(body);
        }

        debug!("{} {}", method, url_text);

        let response = request.send().await.map_err(|e| {
            SurveyError::transport_with_url(format!("Request failed: {}", e), &url_text)
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            SurveyError::transport_with_url(format!("Failed to read response body: {}", e), &url_text)
        })?;

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str::<Value>(&text) {
                Ok(value) => value,
                // Non-JSON error bodies become the error message
                Err(_) if !status.is_success() => json!({ "error": text }),
                Err(e) => {
                    return Err(SurveyError::Transport {
                        message: format!("Failed to decode response body: {}", e),
                        url: Some(url_text),
                        status_code: Some(status.as_u16()),
                    });
                }
            }
        };

        debug!(status = status.as_u16(), "{} {} completed", method, url_text);
        Ok(ApiReply::new(status.as_u16(), body))
    }
}

#[async_trait]
impl SurveyBackend for HttpBackend {
    #[instrument(skip(self, credentials), fields(email = %credentials.email), level = "debug")]
    async fn login(&self, credentials: &Credentials) -> SurveyResult<ApiReply> {
        let url = self.endpoint_url(&self.endpoints.login);
        self.send(Method::POST, url, Some(credentials)).await
    }

    #[instrument(skip(self, credentials), fields(email = %credentials.email), level = "debug")]
    async fn register(&self, credentials: &Credentials) -> SurveyResult<ApiReply> {
        let url = self.endpoint_url(&self.endpoints.register);
        self.send(Method::POST, url, Some(credentials)).await
    }

    #[instrument(skip(self, submission), fields(user_id = %submission.user_id), level = "debug")]
    async fn submit_survey(&self, submission: &SurveySubmission) -> SurveyResult<ApiReply> {
        let url = self.endpoint_url(&self.endpoints.submit_survey);
        self.send(Method::POST, url, Some(submission)).await
    }

    #[instrument(skip(self, submission), fields(user_id = %submission.user_id), level = "debug")]
    async fn update_survey(&self, submission: &SurveySubmission) -> SurveyResult<ApiReply> {
        let url = self.endpoint_url(&self.endpoints.update_survey);
        self.send(Method::PUT, url, Some(submission)).await
    }

    #[instrument(skip(self), level = "debug")]
    async fn get_responses(&self, user_id: &str) -> SurveyResult<ApiReply> {
        let mut url = self.endpoint_url(&self.endpoints.get_responses);
        url.path_segments_mut()
            .map_err(|_| SurveyError::config("Backend base URL cannot carry a path"))?
            .pop_if_empty()
            .push(user_id);
        self.send::<()>(Method::GET, url, None).await
    }
}
