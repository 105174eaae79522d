use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// chrono equivalent of the feed's `y-MM-dd hh:mm:ss a` timestamp format
/// (12-hour clock with AM/PM marker, no offset).
pub(crate) const FEED_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %I:%M:%S %p";

/// The feed carries no timezone, so timestamps are interpreted as UTC.
/// Parsing is exact: anything that does not match the format is a decode error.
fn deserialize_feed_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let naive = NaiveDateTime::parse_from_str(&raw, FEED_TIMESTAMP_FORMAT)
        .map_err(serde::de::Error::custom)?;
    Ok(Utc.from_utc_datetime(&naive))
}

/// One station as decoded from the feed. Immutable once decoded.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationRecord {
    pub id: i64,
    pub station_name: String,
    pub available_docks: u32,
    pub total_docks: i64,
    pub available_bikes: u32,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "statusValue")]
    pub status: String,
    #[serde(deserialize_with = "deserialize_feed_timestamp")]
    pub last_communication_time: DateTime<Utc>,
}

impl StationRecord {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// A decoded feed response: generation time plus the stations in the order the
/// feed listed them (that order is not meaningful).
#[derive(Debug, Clone, Deserialize)]
pub struct FeedSnapshot {
    #[serde(
        rename = "executionTime",
        deserialize_with = "deserialize_feed_timestamp"
    )]
    pub execution_time: DateTime<Utc>,
    #[serde(rename = "stationBeanList")]
    pub stations: Vec<StationRecord>,
}

/// A station paired with its great-circle distance from the user, in meters.
#[derive(Debug, Clone)]
pub struct RankedStation {
    pub station: StationRecord,
    pub distance_m: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "super::deserialize_feed_timestamp")] DateTime<Utc>);

    #[test]
    fn feed_timestamp_parses_twelve_hour_clock() {
        let Wrapper(parsed) =
            serde_json::from_str(r#""2020-07-08 03:15:42 PM""#).expect("timestamp must parse");

        assert_eq!(parsed.hour(), 15);
        assert_eq!(parsed.minute(), 15);
        assert_eq!(parsed.second(), 42);
    }

    #[test]
    fn feed_timestamp_rejects_twenty_four_hour_clock() {
        let result: Result<Wrapper, _> = serde_json::from_str(r#""2020-07-08 15:15:42""#);
        assert!(result.is_err());
    }

    #[test]
    fn feed_timestamp_rejects_trailing_garbage() {
        let result: Result<Wrapper, _> = serde_json::from_str(r#""2020-07-08 03:15:42 PM UTC""#);
        assert!(result.is_err());
    }

    #[test]
    fn station_record_exposes_its_coordinate() {
        let station: StationRecord = serde_json::from_str(
            r#"{
                "id": 72,
                "stationName": "W 52 St & 11 Ave",
                "availableDocks": 10,
                "totalDocks": 39,
                "availableBikes": 29,
                "latitude": 40.76727216,
                "longitude": -73.99392888,
                "statusValue": "In Service",
                "lastCommunicationTime": "2020-07-08 11:02:03 AM"
            }"#,
        )
        .expect("station must decode");

        let coord = station.coordinate();
        assert_eq!(coord.latitude, 40.76727216);
        assert_eq!(coord.longitude, -73.99392888);
    }
}
