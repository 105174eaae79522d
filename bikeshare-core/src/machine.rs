//! The acquisition state machine: one linear workflow from "not located"
//! through permission, location fix, and feed download to either a ranked
//! station list or an error.
//!
//! The machine owns its state exclusively and every transition notifies the
//! presenter exactly once. All event methods take `&mut self`, so transitions
//! and presenter calls are serialized on whichever context drives the machine.

use std::fmt::Debug;
use thiserror::Error;
use tracing::debug;

use crate::feed::FetchError;
use crate::locate::{AuthorizationStatus, Locator, LocatorError};
use crate::model::{Coordinate, RankedStation};
use crate::resolver::NearbyStationResolver;

/// Why an acquisition attempt ended in the error state.
#[derive(Debug, Error)]
pub enum AcquisitionError {
    /// The user declined location access.
    #[error("location access denied; turn on location in settings")]
    PermissionDenied,

    /// The location service could not produce a fix.
    #[error(transparent)]
    Locator(#[from] LocatorError),

    /// The station feed could not be fetched or decoded.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Where the acquisition workflow currently stands.
///
/// Exactly one value is live at a time, owned by the machine. `Error` carries
/// its cause and `ViewingStations` carries the ranked result.
#[derive(Debug)]
pub enum AcquisitionState {
    NotLocated,
    RequestingAuthorization,
    Locating,
    Downloading,
    Error(AcquisitionError),
    ViewingStations(Vec<RankedStation>),
}

/// Renders acquisition states. Called once per transition, always from the
/// machine's own driving context.
pub trait Presenter: Send + Debug {
    fn render(&mut self, state: &AcquisitionState);
}

/// Drives location acquisition and nearby-station resolution.
///
/// Reusable: there is no terminal state, and a fresh request can be started
/// from `NotLocated` after any completed attempt.
#[derive(Debug)]
pub struct AcquisitionStateMachine {
    state: AcquisitionState,
    locator: Box<dyn Locator>,
    resolver: NearbyStationResolver,
    presenter: Box<dyn Presenter>,
}

impl AcquisitionStateMachine {
    /// Starts in `NotLocated`. The presenter is not notified until the first
    /// transition.
    pub fn new(
        locator: Box<dyn Locator>,
        resolver: NearbyStationResolver,
        presenter: Box<dyn Presenter>,
    ) -> Self {
        Self { state: AcquisitionState::NotLocated, locator, resolver, presenter }
    }

    pub fn state(&self) -> &AcquisitionState {
        &self.state
    }

    /// User-initiated request for nearby stations.
    ///
    /// Only meaningful in `NotLocated`; in any other state the trigger is
    /// ignored (the embedder disables it while a request is in flight).
    pub async fn locate(&mut self) {
        if !matches!(self.state, AcquisitionState::NotLocated) {
            debug!(state = ?self.state, "locate ignored outside NotLocated");
            return;
        }

        if self.locator.authorization_status() == AuthorizationStatus::Granted {
            self.acquire_and_resolve().await;
        } else {
            self.transition(AcquisitionState::RequestingAuthorization);
            self.locator.request_authorization();
        }
    }

    /// Authorization status change reported by the platform.
    ///
    /// While waiting on the prompt, a grant continues the workflow and a
    /// denial becomes an error. From the error state, any status change
    /// resets to `NotLocated` so the user can retry after visiting settings.
    /// In every other state the event arrived late and is ignored.
    pub async fn authorization_changed(&mut self, status: AuthorizationStatus) {
        match self.state {
            AcquisitionState::Error(_) => {
                self.transition(AcquisitionState::NotLocated);
            }
            AcquisitionState::RequestingAuthorization => match status {
                AuthorizationStatus::Granted => self.acquire_and_resolve().await,
                AuthorizationStatus::Denied => {
                    self.transition(AcquisitionState::Error(AcquisitionError::PermissionDenied));
                }
                AuthorizationStatus::NotDetermined => {}
            },
            _ => {
                debug!(state = ?self.state, ?status, "late authorization event ignored");
            }
        }
    }

    /// Locating → Downloading → ViewingStations | Error.
    async fn acquire_and_resolve(&mut self) {
        self.transition(AcquisitionState::Locating);

        let fix = match self.locator.request_one_time_fix().await {
            Ok(fix) => fix,
            Err(e) => {
                self.transition(AcquisitionState::Error(e.into()));
                return;
            }
        };

        self.download(fix).await;
    }

    async fn download(&mut self, fix: Coordinate) {
        self.transition(AcquisitionState::Downloading);

        match self.resolver.resolve_nearby_stations(fix).await {
            Ok(stations) => self.transition(AcquisitionState::ViewingStations(stations)),
            Err(e) => self.transition(AcquisitionState::Error(e.into())),
        }
    }

    fn transition(&mut self, next: AcquisitionState) {
        debug!(from = ?self.state, to = ?next, "state transition");
        self.state = next;
        self.presenter.render(&self.state);
    }
}
