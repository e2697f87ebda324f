use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use serde::Deserialize;
use serde_json::{Map, Value};
use snafu::{ensure, OptionExt, ResultExt};

use crate::errors::{CustomResult, Error, MalformedPayloadSnafu, MalformedRecordSnafu, StatusSnafu};
use crate::modules::helpers::sectors::SectorFields;

/// # a source of lap records
/// every call returns a complete snapshot or an error, never a partial list
#[async_trait]
pub trait LapSource: Send + Sync {
    async fn fetch_laps(&self) -> CustomResult<Vec<LapRecord>>;

    /// name of the source used in log lines
    fn describe(&self) -> String;
}

pub struct HttpLapSource {
    client: reqwest::Client,
    url: String,
}

impl HttpLapSource {
    /// # create a source reading from an url
    ///
    /// ## Arguments
    /// * `url` - the url serving the json list of laps
    /// * `timeout` - the maximum time a single fetch may take
    pub fn new(url: &str, timeout: Duration) -> CustomResult<HttpLapSource> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| request_error(url, source))?;

        Ok(HttpLapSource {
            client,
            url: url.to_string(),
        })
    }
}

fn request_error(url: &str, source: reqwest::Error) -> Error {
    if source.is_timeout() {
        Error::TimeoutError { url: url.to_string() }
    } else {
        Error::TransportError { url: url.to_string(), source }
    }
}

#[async_trait]
impl LapSource for HttpLapSource {
    async fn fetch_laps(&self) -> CustomResult<Vec<LapRecord>> {
        info!(target: "laptimes_api:fetch_laps", "Getting laps from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|source| request_error(&self.url, source))?;

        let status = response.status();
        ensure!(status.is_success(), StatusSnafu { url: &self.url, status: status.as_u16() });

        let body = response
            .text()
            .await
            .map_err(|source| request_error(&self.url, source))?;

        let laps = parse_laps(&body)?;
        debug!(target: "laptimes_api:fetch_laps", "received {} laps from {}", laps.len(), self.url);
        Ok(laps)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// # parse a payload of lap records
/// one malformed record rejects the whole payload
///
/// ## Arguments
/// * `body` - the json payload, a list of lap records
///
/// ## Returns
/// * `Vec<LapRecord>` - the validated records in payload order
pub fn parse_laps(body: &str) -> CustomResult<Vec<LapRecord>> {
    let raw: Vec<RawLapRecord> = serde_json::from_str(body).context(MalformedPayloadSnafu)?;

    raw.into_iter()
        .enumerate()
        .map(|(index, record)| record.validate(index))
        .collect()
}

/// a lap record as it is found on the wire
#[derive(Debug, Deserialize)]
struct RawLapRecord {
    driver: Option<String>,
    car_id: Option<String>,
    car: Option<String>,
    track_id: Option<String>,
    track: Option<String>,
    lap_time_ms: Option<i64>,
    valid: Option<bool>,
    cuts: Option<u32>,
    lap_count: Option<u32>,
    date: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl RawLapRecord {
    fn validate(self, index: usize) -> CustomResult<LapRecord> {
        let driver = self
            .driver
            .filter(|driver| !driver.is_empty())
            .context(MalformedRecordSnafu { index, reason: "missing driver" })?;
        let car_id = self
            .car_id
            .or(self.car)
            .context(MalformedRecordSnafu { index, reason: "missing car" })?;
        let track_id = self
            .track_id
            .or(self.track)
            .context(MalformedRecordSnafu { index, reason: "missing track" })?;
        let valid = self.valid.context(MalformedRecordSnafu { index, reason: "missing valid flag" })?;
        let date = self.date.context(MalformedRecordSnafu { index, reason: "missing date" })?;

        let lap_time_ms = match self.lap_time_ms {
            Some(ms) if ms < 0 => {
                return MalformedRecordSnafu { index, reason: format!("negative lap time {ms}") }.fail();
            }
            Some(ms) => Some(ms as u64),
            None => None,
        };

        let sector_fields = match SectorFields::from_json(&self.extra) {
            Ok(sector_fields) => sector_fields,
            Err(reason) => return MalformedRecordSnafu { index, reason }.fail(),
        };

        Ok(LapRecord {
            driver,
            car_id,
            track_id,
            lap_time_ms,
            valid,
            cuts: self.cuts.unwrap_or(0),
            lap_count: self.lap_count,
            date,
            sector_fields,
        })
    }
}

/// a validated lap record, ready to be normalized
#[derive(Debug, Clone, PartialEq)]
pub struct LapRecord {
    pub driver: String,
    pub car_id: String,
    pub track_id: String,
    pub lap_time_ms: Option<u64>,
    pub valid: bool,
    pub cuts: u32,
    pub lap_count: Option<u32>,
    pub date: String,
    pub sector_fields: SectorFields,
}
