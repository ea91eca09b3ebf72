use chrono::{DateTime, FixedOffset, TimeZone};

pub mod catalog;
pub mod events;
pub mod observation;

pub trait FormatToApiFmt {
    fn to_api_format(&self) -> String;
}

impl<Tz: TimeZone> FormatToApiFmt for DateTime<Tz>
where
    Tz::Offset: std::fmt::Display,
{
    fn to_api_format(&self) -> String {
        // e.g. 2021-01-01T00:00:00+0200
        self.format("%Y-%m-%dT%H:%M:%S%z").to_string()
    }
}

#[derive(Debug, Clone)]
pub struct DateRange {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl DateRange {
    pub fn new<Tz: TimeZone>(start: DateTime<Tz>, end: DateTime<Tz>) -> Self {
        DateRange {
            start: start.fixed_offset(),
            end: end.fixed_offset(),
        }
    }

    pub(crate) fn to_query_values(&self) -> (String, String) {
        (self.start.to_api_format(), self.end.to_api_format())
    }

    pub fn to_query_string(&self) -> Vec<(String, String)> {
        let (start, end) = self.to_query_values();
        vec![
            ("start_time".to_string(), start),
            ("end_time".to_string(), end),
        ]
    }
}
