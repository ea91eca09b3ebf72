use std::fmt;

use tracing::{debug, info, warn};

use crate::config::resolve_api_key;
use crate::error::{Error, Result};
use crate::{ApiClient, RawResponse};

use super::observation::{DatasetId, EventRecord, ObservationSet};
use super::DateRange;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Fetches time series events of any dataset.
pub struct Events<'a> {
    client: &'a dyn ApiClient,
}

/// The request succeeded but the API had nothing for this dataset and window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoData {
    pub dataset_id: DatasetId,
    pub start_time: String,
    pub end_time: String,
}

impl fmt::Display for NoData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "No data found for dataset {} between {} and {}",
            self.dataset_id, self.start_time, self.end_time
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Observations(ObservationSet),
    NoData(NoData),
}

impl FetchOutcome {
    pub fn is_no_data(&self) -> bool {
        matches!(self, FetchOutcome::NoData(_))
    }

    pub fn observations(&self) -> Option<&ObservationSet> {
        match self {
            FetchOutcome::Observations(set) => Some(set),
            FetchOutcome::NoData(_) => None,
        }
    }

    pub fn into_observations(self) -> Option<ObservationSet> {
        match self {
            FetchOutcome::Observations(set) => Some(set),
            FetchOutcome::NoData(_) => None,
        }
    }
}

impl<'a> Events<'a> {
    pub fn new(client: &'a dyn ApiClient) -> Self {
        Self { client }
    }

    fn path(dataset_id: DatasetId) -> String {
        format!("/variable/{}/events/json", dataset_id)
    }

    /// Returns the events of `dataset_id` between `start_time` and `end_time`.
    ///
    /// Both times are sent verbatim and should be ISO-8601 with an explicit
    /// offset, e.g. `2021-01-01T00:00:00+0200`. An explicit non-empty
    /// `user_key` overrides the client's default key.
    pub fn fetch(
        &self,
        dataset_id: Option<DatasetId>,
        start_time: Option<&str>,
        end_time: Option<&str>,
        user_key: Option<&str>,
    ) -> Result<FetchOutcome> {
        let dataset_id = dataset_id.ok_or(Error::MissingParameter("dataset id"))?;
        let start_time = start_time.ok_or(Error::MissingParameter("start time"))?;
        let end_time = end_time.ok_or(Error::MissingParameter("end time"))?;
        let api_key = resolve_api_key(user_key, self.client.default_api_key())?;

        let qs: Vec<(String, String)> = vec![
            ("start_time".to_string(), start_time.to_string()),
            ("end_time".to_string(), end_time.to_string()),
        ];

        debug!(dataset_id, start_time, end_time, "fetching events");
        let response = self
            .client
            .http_get(&Events::path(dataset_id), &qs, &api_key)?;

        let records = parse_response(dataset_id, response)?;

        if records.is_empty() {
            let no_data = NoData {
                dataset_id,
                start_time: start_time.to_string(),
                end_time: end_time.to_string(),
            };
            info!("{}", no_data);
            return Ok(FetchOutcome::NoData(no_data));
        }

        let set = ObservationSet::from_records(dataset_id, &records)?;
        debug!(
            dataset_id,
            received = records.len(),
            kept = set.len(),
            "parsed events"
        );

        Ok(FetchOutcome::Observations(set))
    }

    /// Same as [`Events::fetch`] with every parameter given and the default key.
    pub fn fetch_events(
        &self,
        dataset_id: DatasetId,
        start_time: &str,
        end_time: &str,
    ) -> Result<FetchOutcome> {
        self.fetch(Some(dataset_id), Some(start_time), Some(end_time), None)
    }

    pub fn fetch_range(
        &self,
        dataset_id: DatasetId,
        date_range: &DateRange,
        user_key: Option<&str>,
    ) -> Result<FetchOutcome> {
        let (start_time, end_time) = date_range.to_query_values();
        self.fetch(Some(dataset_id), Some(&start_time), Some(&end_time), user_key)
    }
}

// Content type is checked before status: a non-200 HTML page reports as a
// content type failure.
fn parse_response(dataset_id: DatasetId, response: RawResponse) -> Result<Vec<EventRecord>> {
    let content_type = response.content_type.as_deref().unwrap_or("<none>");
    if !is_json(content_type) {
        warn!(dataset_id, content_type, status = response.status, "response is not JSON");
        return Err(Error::UnexpectedContentType(content_type.to_string()));
    }

    if response.status != 200 {
        warn!(dataset_id, status = response.status, body = %response.body, "API error");
        return Err(Error::ApiError(response.status));
    }

    Ok(serde_json::from_str(&response.body)?)
}

fn is_json(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|media_type| media_type.trim().eq_ignore_ascii_case(JSON_CONTENT_TYPE))
        .unwrap_or(false)
}
