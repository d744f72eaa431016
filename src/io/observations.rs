use crate::types::{GridResult, Observation};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::time::Duration;

/// Source of point observations, keyed by timestamp.
///
/// Narrow seam over the remote data store so the interpolation core can be
/// tested entirely offline with synthetic observations. An empty result for
/// a timestamp is a valid response, not a malformed one; the pipeline turns
/// it into `NoObservations`.
pub trait ObservationSource {
    /// Distinct timestamps known to the store, ascending
    fn list_timestamps(&self) -> GridResult<Vec<String>>;

    /// All observations recorded at exactly this timestamp
    fn fetch_observations(&self, timestamp: &str) -> GridResult<Vec<Observation>>;
}

#[derive(Debug, Deserialize)]
struct TimestampRow {
    ts: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WeatherRow {
    lon: f64,
    lat: f64,
    temp: Option<f64>,
}

/// Observation store backed by a Supabase (PostgREST) table.
pub struct SupabaseStore {
    base_url: String,
    api_key: String,
    table: String,
    client: reqwest::blocking::Client,
}

impl SupabaseStore {
    pub fn new(base_url: &str, api_key: &str, table: &str) -> GridResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            table: table.to_string(),
            client,
        })
    }

    fn request(&self, params: &[(&str, &str)]) -> GridResult<reqwest::blocking::Response> {
        let url = format!("{}/rest/v1/{}", self.base_url, self.table);
        let response = self
            .client
            .get(&url)
            .query(params)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()?
            .error_for_status()?;
        Ok(response)
    }
}

impl ObservationSource for SupabaseStore {
    fn list_timestamps(&self) -> GridResult<Vec<String>> {
        log::info!("Listing timestamps from table {}", self.table);
        let rows: Vec<TimestampRow> = self
            .request(&[("select", "ts"), ("order", "ts.asc")])?
            .json()?;

        // Distinct and sorted; the table holds one row per station per instant
        let distinct: BTreeSet<String> = rows.into_iter().filter_map(|row| row.ts).collect();
        log::info!("Store knows {} distinct timestamps", distinct.len());
        Ok(distinct.into_iter().collect())
    }

    fn fetch_observations(&self, timestamp: &str) -> GridResult<Vec<Observation>> {
        let ts_filter = format!("eq.{}", timestamp);
        let rows: Vec<WeatherRow> = self
            .request(&[
                ("select", "lon,lat,temp"),
                ("ts", ts_filter.as_str()),
                ("temp", "not.is.null"),
            ])?
            .json()?;

        let observations: Vec<Observation> = rows
            .into_iter()
            .filter_map(|row| {
                let value = row.temp?;
                if !(value.is_finite() && row.lon.is_finite() && row.lat.is_finite()) {
                    log::warn!("Dropping non-finite row at ({}, {})", row.lon, row.lat);
                    return None;
                }
                Some(Observation {
                    longitude: row.lon,
                    latitude: row.lat,
                    value,
                })
            })
            .collect();

        log::debug!("{} observations at {}", observations.len(), timestamp);
        Ok(observations)
    }
}
