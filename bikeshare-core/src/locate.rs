use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

use crate::model::Coordinate;

/// Whether the user has allowed access to their location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationStatus {
    NotDetermined,
    Granted,
    Denied,
}

/// A device or location-service failure while acquiring a fix.
#[derive(Debug, Clone, Error)]
#[error("location request failed: {message}")]
pub struct LocatorError {
    pub message: String,
}

impl LocatorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Source of one-time geographic fixes.
///
/// Authorization outcomes are not returned from [`request_authorization`]:
/// the platform reports them as discrete events, which the embedder forwards
/// to [`AcquisitionStateMachine::authorization_changed`].
///
/// [`request_authorization`]: Locator::request_authorization
/// [`AcquisitionStateMachine::authorization_changed`]: crate::machine::AcquisitionStateMachine::authorization_changed
#[async_trait]
pub trait Locator: Send + Sync + Debug {
    /// Current authorization status, without prompting.
    fn authorization_status(&self) -> AuthorizationStatus;

    /// Prompt the user for location access. Fire-and-forget.
    fn request_authorization(&self);

    /// Acquire a single best-effort fix.
    async fn request_one_time_fix(&self) -> Result<Coordinate, LocatorError>;
}
