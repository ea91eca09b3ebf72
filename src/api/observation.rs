use std::collections::HashSet;

use chrono::{DateTime, FixedOffset};
use polars::prelude::*;
use serde::Deserialize;

use crate::error::{Error, Result};

pub type DatasetId = u32;

/// One record as the API sends it.
#[derive(Deserialize, Debug)]
pub struct EventRecord {
    pub start_time: String,
    pub end_time: String,
    pub value: WireValue,
}

/// The API mostly sends numbers, but some datasets quote them.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum WireValue {
    Number(f64),
    Text(String),
}

impl WireValue {
    fn as_f64(&self) -> Result<f64> {
        match self {
            WireValue::Number(value) => Ok(*value),
            WireValue::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| Error::InvalidValue(text.clone())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub value: f64,
    pub dataset_id: DatasetId,
}

impl Observation {
    fn from_record(record: &EventRecord, dataset_id: DatasetId) -> Result<Self> {
        Ok(Observation {
            start_time: parse_timestamp(&record.start_time)?,
            end_time: parse_timestamp(&record.end_time)?,
            value: record.value.as_f64()?,
            dataset_id,
        })
    }
}

/// Parses an ISO-8601 timestamp carrying a UTC offset, either `+02:00` or `+0200`.
pub fn parse_timestamp(text: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(text)
        .or_else(|_| DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .map_err(|e| Error::invalid_timestamp(text, e))
}

/// De-duplicated observations for one dataset and window, in API order.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationSet {
    dataset_id: DatasetId,
    observations: Vec<Observation>,
}

impl ObservationSet {
    pub fn from_records(dataset_id: DatasetId, records: &[EventRecord]) -> Result<Self> {
        let observations = records
            .iter()
            .map(|record| Observation::from_record(record, dataset_id))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(dataset_id, observations))
    }

    pub fn new(dataset_id: DatasetId, mut observations: Vec<Observation>) -> Self {
        dedup_observations(&mut observations);
        ObservationSet {
            dataset_id,
            observations,
        }
    }

    pub fn dataset_id(&self) -> DatasetId {
        self.dataset_id
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn into_observations(self) -> Vec<Observation> {
        self.observations
    }

    /// Columns: `start_time`, `end_time` (UTC, ms), `value`, `dataset_id`.
    pub fn as_polars_df(&self) -> Result<DataFrame> {
        let mut start_times: Vec<i64> = vec![];
        let mut end_times: Vec<i64> = vec![];
        let mut values: Vec<f64> = vec![];
        let mut dataset_ids: Vec<u32> = vec![];

        for obs in &self.observations {
            start_times.push(obs.start_time.timestamp_millis());
            end_times.push(obs.end_time.timestamp_millis());
            values.push(obs.value);
            dataset_ids.push(obs.dataset_id);
        }

        let df = DataFrame::new(vec![
            utc_datetime_series("start_time", start_times),
            utc_datetime_series("end_time", end_times),
            Series::new("value".into(), values),
            Series::new("dataset_id".into(), dataset_ids),
        ])?;

        Ok(df)
    }
}

impl<'a> IntoIterator for &'a ObservationSet {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}

fn utc_datetime_series(name: &str, millis: Vec<i64>) -> Series {
    Int64Chunked::from_vec(name.into(), millis)
        .into_datetime(TimeUnit::Milliseconds, Some("UTC".into()))
        .into_series()
}

/// Drops rows identical in every field to an earlier row. First occurrence wins.
fn dedup_observations(observations: &mut Vec<Observation>) {
    let mut seen = HashSet::new();
    observations.retain(|obs| {
        seen.insert((
            obs.start_time,
            obs.end_time,
            obs.value.to_bits(),
            obs.dataset_id,
        ))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(start: &str, end: &str, value: f64) -> EventRecord {
        EventRecord {
            start_time: start.to_string(),
            end_time: end.to_string(),
            value: WireValue::Number(value),
        }
    }

    #[test]
    fn test_parse_compact_offset() {
        let ts = parse_timestamp("2021-01-01T00:00:00+0200").unwrap();
        assert_eq!(ts.offset().local_minus_utc(), 2 * 3600);
        assert_eq!(ts.to_rfc3339(), "2021-01-01T00:00:00+02:00");
    }

    #[test]
    fn test_parse_rfc3339_and_fraction() {
        let a = parse_timestamp("2021-01-01T00:00:00+02:00").unwrap();
        let b = parse_timestamp("2020-12-31T22:00:00.000Z").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_rejects_missing_offset() {
        let err = parse_timestamp("2021-01-01T00:00:00").unwrap_err();
        assert!(matches!(err, Error::InvalidTimestamp { .. }));
    }

    #[test]
    fn test_wire_value_variants() {
        let records: Vec<EventRecord> = serde_json::from_str(
            r#"[
                {"start_time": "2021-01-01T00:00:00+0000", "end_time": "2021-01-01T01:00:00+0000", "value": 12.5},
                {"start_time": "2021-01-01T01:00:00+0000", "end_time": "2021-01-01T02:00:00+0000", "value": "13"}
            ]"#,
        )
        .unwrap();
        let set = ObservationSet::from_records(7, &records).unwrap();
        let values: Vec<f64> = set.iter().map(|o| o.value).collect();
        assert_eq!(values, vec![12.5, 13.0]);
    }

    #[test]
    fn test_non_numeric_value_is_an_error() {
        let records = vec![EventRecord {
            start_time: "2021-01-01T00:00:00+0000".to_string(),
            end_time: "2021-01-01T01:00:00+0000".to_string(),
            value: WireValue::Text("n/a".to_string()),
        }];
        let err = ObservationSet::from_records(7, &records).unwrap_err();
        assert!(matches!(err, Error::InvalidValue(ref v) if v == "n/a"));
    }

    #[test]
    fn test_exact_duplicates_removed_in_order() {
        let records = vec![
            record("2021-01-01T00:00:00+0000", "2021-01-01T01:00:00+0000", 1.0),
            record("2021-01-01T01:00:00+0000", "2021-01-01T02:00:00+0000", 2.0),
            record("2021-01-01T00:00:00+0000", "2021-01-01T01:00:00+0000", 1.0),
            record("2021-01-01T02:00:00+0000", "2021-01-01T03:00:00+0000", 3.0),
            record("2021-01-01T02:00:00+0000", "2021-01-01T03:00:00+0000", 3.0),
        ];
        let set = ObservationSet::from_records(124, &records).unwrap();
        let values: Vec<f64> = set.iter().map(|o| o.value).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
        assert!(set.iter().all(|o| o.dataset_id == 124));
    }

    #[test]
    fn test_same_interval_different_value_kept() {
        let records = vec![
            record("2021-01-01T00:00:00+0000", "2021-01-01T01:00:00+0000", 1.0),
            record("2021-01-01T00:00:00+0000", "2021-01-01T01:00:00+0000", 1.5),
        ];
        let set = ObservationSet::from_records(124, &records).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_polars_df_shape() {
        let records = vec![
            record("2021-01-01T00:00:00+0200", "2021-01-01T01:00:00+0200", 8972.0),
            record("2021-01-01T01:00:00+0200", "2021-01-01T02:00:00+0200", 11018.0),
        ];
        let df = ObservationSet::from_records(124, &records)
            .unwrap()
            .as_polars_df()
            .unwrap();

        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["start_time", "end_time", "value", "dataset_id"]);
        assert_eq!(df.height(), 2);
        assert_eq!(
            df.column("start_time").unwrap().dtype(),
            &DataType::Datetime(TimeUnit::Milliseconds, Some("UTC".into()))
        );
        assert_eq!(df.column("dataset_id").unwrap().dtype(), &DataType::UInt32);
    }
}
