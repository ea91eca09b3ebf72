use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use tracing::debug;

pub mod api;
pub mod config;
pub mod error;

pub use api::catalog::{catalog, lookup, DatasetEntry};
pub use api::events::{Events, FetchOutcome, NoData};
pub use api::observation::{DatasetId, Observation, ObservationSet};
pub use api::DateRange;
pub use config::{Config, PRODUCTION_BASE_URL};
pub use error::{Error, Result};

const API_KEY_HEADER: &str = "x-api-key";
const CLIENT_ID: &str = concat!("fingrid-opendata-rs/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// What came back from the API, before any validation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

pub trait ApiClient {
    /// Key used when a call does not bring its own.
    fn default_api_key(&self) -> Option<&str>;

    fn http_get(
        &self,
        path: &str,
        query_string: &[(String, String)],
        api_key: &str,
    ) -> Result<RawResponse>;
}

#[derive(Clone)]
pub struct FingridApi {
    api_key: Option<String>,
    base_url: String,
}

impl std::fmt::Debug for FingridApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FingridApi")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl FingridApi {
    pub fn new(api_key: Option<String>) -> Self {
        FingridApi {
            api_key,
            base_url: PRODUCTION_BASE_URL.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        FingridApi::new(config.api_key.clone()).with_base_url(config.base_url.clone())
    }

    pub fn from_env_values() -> Result<Self> {
        Ok(FingridApi::from_config(&config::load_config()?))
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn events(&self) -> Events<'_> {
        Events::new(self)
    }
}

impl ApiClient for FingridApi {
    fn default_api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn http_get(
        &self,
        path: &str,
        query_string: &[(String, String)],
        api_key: &str,
    ) -> Result<RawResponse> {
        let url = format!("{}{}", self.base_url, path);

        let http_client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        debug!(%url, "GET");
        let response = http_client
            .get(&url)
            .query(&query_string)
            .header(API_KEY_HEADER, api_key)
            .header(USER_AGENT, CLIENT_ID)
            .send()?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.text()?;

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}

/// Fetches a dataset, taking the default key and base URL from the
/// environment at the time of the call.
pub fn fetch_data(
    dataset_id: Option<DatasetId>,
    start_time: Option<&str>,
    end_time: Option<&str>,
    user_key: Option<&str>,
) -> Result<FetchOutcome> {
    let api = FingridApi::from_env_values()?;
    api.events().fetch(dataset_id, start_time, end_time, user_key)
}
