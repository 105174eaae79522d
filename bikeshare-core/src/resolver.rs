use tracing::debug;

use crate::distance::rank;
use crate::feed::{FetchError, StationFeed};
use crate::model::{Coordinate, RankedStation};

/// Fetches a station snapshot and ranks it by proximity to a coordinate.
///
/// Each call is independent: exactly one fetch and one rank, no caching, no
/// shared mutable state, so callers may issue concurrent resolutions.
#[derive(Debug)]
pub struct NearbyStationResolver {
    feed: Box<dyn StationFeed>,
}

impl NearbyStationResolver {
    pub fn new(feed: Box<dyn StationFeed>) -> Self {
        Self { feed }
    }

    /// Resolve the stations nearest to `from`, ascending by distance.
    ///
    /// Feed failures propagate unchanged; no ranking is attempted on failure.
    pub async fn resolve_nearby_stations(
        &self,
        from: Coordinate,
    ) -> Result<Vec<RankedStation>, FetchError> {
        let snapshot = self.feed.fetch_stations().await?;
        let ranked = rank(&snapshot, from);
        debug!(
            stations = ranked.len(),
            latitude = from.latitude,
            longitude = from.longitude,
            "resolved nearby stations"
        );
        Ok(ranked)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::{FeedSnapshot, StationRecord};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    pub(crate) fn station(id: i64, latitude: f64, longitude: f64) -> StationRecord {
        StationRecord {
            id,
            station_name: format!("Station {id}"),
            available_docks: 3,
            total_docks: 12,
            available_bikes: 9,
            latitude,
            longitude,
            status: "In Service".to_string(),
            last_communication_time: Utc.with_ymd_and_hms(2020, 7, 8, 10, 0, 0).unwrap(),
        }
    }

    /// Feed double that serves a fixed snapshot, or a canned failure.
    #[derive(Debug)]
    pub(crate) enum FakeFeed {
        Stations(Vec<StationRecord>),
        Fails(fn() -> FetchError),
    }

    #[async_trait]
    impl StationFeed for FakeFeed {
        async fn fetch_stations(&self) -> Result<FeedSnapshot, FetchError> {
            match self {
                FakeFeed::Stations(stations) => Ok(FeedSnapshot {
                    execution_time: Utc.with_ymd_and_hms(2020, 7, 8, 10, 0, 0).unwrap(),
                    stations: stations.clone(),
                }),
                FakeFeed::Fails(make) => Err(make()),
            }
        }
    }

    #[tokio::test]
    async fn resolves_ranked_stations_for_the_given_coordinate() {
        // North, middle, south of the user respectively
        let resolver = NearbyStationResolver::new(Box::new(FakeFeed::Stations(vec![
            station(1, 41.00, -74.00),
            station(2, 40.71, -74.00),
            station(3, 40.90, -74.00),
        ])));

        let ranked = resolver
            .resolve_nearby_stations(Coordinate::new(40.70, -74.00))
            .await
            .expect("resolution must succeed");

        let ids: Vec<i64> = ranked.iter().map(|r| r.station.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[tokio::test]
    async fn feed_errors_pass_through_unchanged() {
        let resolver =
            NearbyStationResolver::new(Box::new(FakeFeed::Fails(|| FetchError::EmptyBody)));

        let err = resolver
            .resolve_nearby_stations(Coordinate::new(40.70, -74.00))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::EmptyBody));
    }

    #[tokio::test]
    async fn concurrent_resolutions_are_independent() {
        let resolver = NearbyStationResolver::new(Box::new(FakeFeed::Stations(vec![
            station(1, 40.00, -74.00),
            station(2, 41.00, -74.00),
        ])));

        // One user near station 1, the other near station 2
        let near_south = Coordinate::new(40.01, -74.00);
        let near_north = Coordinate::new(40.99, -74.00);

        let (south, north) = tokio::join!(
            resolver.resolve_nearby_stations(near_south),
            resolver.resolve_nearby_stations(near_north),
        );

        let south = south.expect("south resolution must succeed");
        let north = north.expect("north resolution must succeed");

        assert_eq!(south[0].station.id, 1);
        assert_eq!(north[0].station.id, 2);
    }
}
