//! Named datasets of the open data API.
//!
//! The API only knows numeric ids; this table gives the common ones a stable
//! name so they can be fetched with [`Events::fetch_named`].

use crate::error::{Error, Result};

use super::events::{Events, FetchOutcome};
use super::observation::DatasetId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetEntry {
    pub name: &'static str,
    pub id: DatasetId,
    pub description: &'static str,
}

const fn entry(name: &'static str, id: DatasetId, description: &'static str) -> DatasetEntry {
    DatasetEntry {
        name,
        id,
        description,
    }
}

static CATALOG: &[DatasetEntry] = &[
    entry(
        "electricity_consumption_FI",
        124,
        "Electricity consumption in Finland, hourly energy (MWh/h)",
    ),
    entry(
        "electricity_consumption_FI_RT",
        193,
        "Electricity consumption in Finland, real time data (MW)",
    ),
    entry(
        "electricity_consumption_forecast_FI_24h",
        165,
        "Electricity consumption forecast for the next 24 hours (MWh/h)",
    ),
    entry(
        "electricity_production_FI",
        74,
        "Electricity production in Finland, hourly energy (MWh/h)",
    ),
    entry(
        "electricity_production_FI_RT",
        192,
        "Electricity production in Finland, real time data (MW)",
    ),
    entry(
        "wind_power_production_FI",
        75,
        "Wind power production, hourly energy (MWh/h)",
    ),
    entry(
        "wind_power_production_FI_RT",
        181,
        "Wind power production, real time data (MW)",
    ),
    entry(
        "wind_power_production_forecast_FI",
        245,
        "Wind power production forecast, updated hourly (MW)",
    ),
    entry(
        "solar_power_production_forecast_FI",
        248,
        "Solar power production forecast, updated hourly (MW)",
    ),
    entry(
        "nuclear_power_production_FI_RT",
        188,
        "Nuclear power production, real time data (MW)",
    ),
    entry(
        "hydro_power_production_FI_RT",
        191,
        "Hydro power production, real time data (MW)",
    ),
    entry(
        "net_import_export_FI_RT",
        194,
        "Net import/export of electricity, real time data (MW, import positive)",
    ),
    entry("frequency_RT", 177, "Grid frequency, real time data (Hz)"),
    entry(
        "up_regulation_price",
        244,
        "Up-regulating price in the balancing energy market (EUR/MWh)",
    ),
    entry(
        "down_regulation_price",
        106,
        "Down-regulating price in the balancing energy market (EUR/MWh)",
    ),
];

pub fn catalog() -> &'static [DatasetEntry] {
    CATALOG
}

pub fn lookup(name: &str) -> Option<&'static DatasetEntry> {
    CATALOG.iter().find(|entry| entry.name == name)
}

pub fn lookup_id(id: DatasetId) -> Option<&'static DatasetEntry> {
    CATALOG.iter().find(|entry| entry.id == id)
}

impl<'a> Events<'a> {
    /// Fetches a dataset by its catalog name.
    pub fn fetch_named(
        &self,
        name: &str,
        start_time: Option<&str>,
        end_time: Option<&str>,
        user_key: Option<&str>,
    ) -> Result<FetchOutcome> {
        let entry = lookup(name).ok_or_else(|| Error::UnknownDataset(name.to_string()))?;
        self.fetch(Some(entry.id), start_time, end_time, user_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("electricity_consumption_FI").map(|e| e.id), Some(124));
        assert!(lookup("electricity_consumption_SE").is_none());
        assert_eq!(
            lookup_id(177).map(|e| e.name),
            Some("frequency_RT")
        );
    }

    #[test]
    fn test_names_and_ids_unique() {
        let names: HashSet<_> = catalog().iter().map(|e| e.name).collect();
        let ids: HashSet<_> = catalog().iter().map(|e| e.id).collect();
        assert_eq!(names.len(), catalog().len());
        assert_eq!(ids.len(), catalog().len());
    }
}
