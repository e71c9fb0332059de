use std::time::Duration;

use engine_logging::engine_debug;
use reqwest::header::AUTHORIZATION;
use statusbot_core::{Cursor, Payload, RecoverableError};
use url::Url;

use crate::FatalConfigError;

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
        }
    }
}

impl FetchSettings {
    pub(crate) fn build_client(&self) -> Result<reqwest::Client, FatalConfigError> {
        reqwest::Client::builder()
            .connect_timeout(self.connect_timeout)
            .timeout(self.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(self.redirect_limit))
            .build()
            .map_err(|err| FatalConfigError::HttpClient(err.to_string()))
    }
}

/// One read of the review-status API. No retries: the poll interval is the retry policy.
#[async_trait::async_trait]
pub trait StatusClient: Send + Sync {
    async fn fetch(&self, cursor: Cursor) -> Result<Payload, RecoverableError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestStatusClient {
    client: reqwest::Client,
    endpoint: Url,
    authorization: String,
}

impl ReqwestStatusClient {
    pub fn new(
        endpoint: &str,
        api_token: &str,
        settings: &FetchSettings,
    ) -> Result<Self, FatalConfigError> {
        let endpoint = Url::parse(endpoint).map_err(|err| FatalConfigError::InvalidSetting {
            name: "endpoint",
            message: err.to_string(),
        })?;
        Ok(Self {
            client: settings.build_client()?,
            endpoint,
            authorization: format!("OAuth {api_token}"),
        })
    }

    fn url_for(&self, cursor: Cursor) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("from_date", &cursor.as_unix().to_string());
        url
    }
}

#[async_trait::async_trait]
impl StatusClient for ReqwestStatusClient {
    async fn fetch(&self, cursor: Cursor) -> Result<Payload, RecoverableError> {
        let url = self.url_for(cursor);
        engine_debug!("Requesting {} from_date={}", self.endpoint, cursor.as_unix());

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, &self.authorization)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RecoverableError::BadStatus(status.as_u16()));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        Payload::from_slice(&body)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> RecoverableError {
    if err.is_timeout() {
        return RecoverableError::Transport(format!("timed out: {err}"));
    }
    RecoverableError::Transport(err.to_string())
}
