use std::time::Duration;

use crate::error::NotifyError;
use crate::models::{AppIdentity, NotificationRequest};
use crate::watcher::DeliveryObserver;

pub mod desktop;
pub mod simulated;

pub use desktop::DesktopDeliveryService;
pub use simulated::{Confirmation, SimulatedDeliveryService};

/// A platform notification service that accepts one request and later
/// confirms its delivery.
///
/// Confirmations are only handed to the observer from inside
/// [`DeliveryService::drive_events`], so the caller decides when callbacks
/// run.
#[allow(async_fn_in_trait)]
pub trait DeliveryService {
    /// Submits `request` attributed to `identity`. A service instance
    /// accepts exactly one request.
    fn post(
        &mut self,
        request: &NotificationRequest,
        identity: &AppIdentity,
    ) -> Result<(), NotifyError>;

    /// Processes platform events for at most `interval`, reporting any
    /// delivery confirmation to `observer`.
    async fn drive_events(
        &mut self,
        interval: Duration,
        observer: &dyn DeliveryObserver,
    ) -> Result<(), NotifyError>;
}
