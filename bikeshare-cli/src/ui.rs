//! Terminal implementations of the core's collaborator traits.

use async_trait::async_trait;
use bikeshare_core::{
    AcquisitionState, AuthorizationStatus, Coordinate, Locator, LocatorError, Presenter,
    RankedStation,
};

/// Locator that serves a coordinate supplied on the command line or from
/// config. No device is involved, so authorization is always granted and a
/// fix never fails.
#[derive(Debug)]
pub struct FixedLocator {
    coordinate: Coordinate,
}

impl FixedLocator {
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

#[async_trait]
impl Locator for FixedLocator {
    fn authorization_status(&self) -> AuthorizationStatus {
        AuthorizationStatus::Granted
    }

    fn request_authorization(&self) {}

    async fn request_one_time_fix(&self) -> Result<Coordinate, LocatorError> {
        Ok(self.coordinate)
    }
}

/// Presenter that prints each state to the terminal and renders the final
/// station list as a table.
#[derive(Debug)]
pub struct TerminalPresenter {
    limit: usize,
}

impl TerminalPresenter {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    fn print_stations(&self, stations: &[RankedStation]) {
        if stations.is_empty() {
            println!("The feed listed no stations.");
            return;
        }

        println!(
            "{:>8}  {:<32} {:>5} {:>5} {:>5}  {:<14} {}",
            "Distance", "Station", "Bikes", "Docks", "Total", "Status", "Last seen"
        );
        for ranked in stations.iter().take(self.limit) {
            let station = &ranked.station;
            println!(
                "{:>8}  {:<32} {:>5} {:>5} {:>5}  {:<14} {}",
                format_distance(ranked.distance_m),
                station.station_name,
                station.available_bikes,
                station.available_docks,
                station.total_docks,
                station.status,
                station.last_communication_time.format("%Y-%m-%d %H:%M UTC"),
            );
        }

        if stations.len() > self.limit {
            println!("... and {} more", stations.len() - self.limit);
        }
    }
}

impl Presenter for TerminalPresenter {
    fn render(&mut self, state: &AcquisitionState) {
        match state {
            AcquisitionState::NotLocated => println!("Ready."),
            AcquisitionState::RequestingAuthorization => println!("Requesting authorization..."),
            AcquisitionState::Locating => println!("Locating..."),
            AcquisitionState::Downloading => println!("Getting bike share data..."),
            AcquisitionState::Error(cause) => eprintln!("Error: {cause}"),
            AcquisitionState::ViewingStations(stations) => self.print_stations(stations),
        }
    }
}

/// Meters below one kilometer, otherwise kilometers to one decimal.
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{} m", meters.round() as i64)
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_distances_format_as_meters() {
        assert_eq!(format_distance(0.0), "0 m");
        assert_eq!(format_distance(831.6), "832 m");
    }

    #[test]
    fn long_distances_format_as_kilometers() {
        assert_eq!(format_distance(1000.0), "1.0 km");
        assert_eq!(format_distance(12_345.0), "12.3 km");
    }

    #[tokio::test]
    async fn fixed_locator_serves_its_coordinate() {
        let locator = FixedLocator::new(Coordinate::new(40.7, -74.0));

        assert_eq!(locator.authorization_status(), AuthorizationStatus::Granted);
        let fix = locator.request_one_time_fix().await.expect("fix must succeed");
        assert_eq!(fix.latitude, 40.7);
        assert_eq!(fix.longitude, -74.0);
    }
}
