//! Great-circle distance and proximity ranking.

use crate::model::{Coordinate, FeedSnapshot, RankedStation};

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two coordinates in meters, by the haversine
/// formula.
pub fn haversine_distance_m(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}

/// Pair every station in the snapshot with its distance from `from` and sort
/// ascending by distance.
///
/// The sort is stable, so stations at equal distance keep their relative order
/// from the snapshot. Empty snapshots yield an empty result.
pub fn rank(snapshot: &FeedSnapshot, from: Coordinate) -> Vec<RankedStation> {
    let mut ranked: Vec<RankedStation> = snapshot
        .stations
        .iter()
        .map(|station| RankedStation {
            distance_m: haversine_distance_m(from, station.coordinate()),
            station: station.clone(),
        })
        .collect();

    // Vec::sort_by is stable and O(n log n); total_cmp gives a total order
    // over f64 so NaN cannot poison the sort.
    ranked.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
    ranked
}
