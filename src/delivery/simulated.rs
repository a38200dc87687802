use std::time::Duration;

use super::DeliveryService;
use crate::error::NotifyError;
use crate::models::{AppIdentity, NotificationRequest};
use crate::watcher::DeliveryObserver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// Confirm on the drive that follows `n` idle polls. `AfterPolls(0)`
    /// confirms on the first drive.
    AfterPolls(u64),
    Never,
}

/// In-process stand-in for the platform notification server.
#[derive(Debug)]
pub struct SimulatedDeliveryService {
    confirmation: Confirmation,
    posted: Option<(NotificationRequest, AppIdentity)>,
    polls: u64,
    confirmed: bool,
}

impl SimulatedDeliveryService {
    pub fn new(confirmation: Confirmation) -> Self {
        Self {
            confirmation,
            posted: None,
            polls: 0,
            confirmed: false,
        }
    }

    pub fn posted_request(&self) -> Option<&NotificationRequest> {
        self.posted.as_ref().map(|(request, _)| request)
    }

    pub fn posted_identity(&self) -> Option<&AppIdentity> {
        self.posted.as_ref().map(|(_, identity)| identity)
    }

    pub fn polls(&self) -> u64 {
        self.polls
    }

    fn confirmation_due(&self) -> bool {
        match self.confirmation {
            Confirmation::AfterPolls(n) => !self.confirmed && self.polls > n,
            Confirmation::Never => false,
        }
    }
}

impl DeliveryService for SimulatedDeliveryService {
    fn post(
        &mut self,
        request: &NotificationRequest,
        identity: &AppIdentity,
    ) -> Result<(), NotifyError> {
        if self.posted.is_some() {
            return Err(NotifyError::AlreadyPosted);
        }

        self.posted = Some((request.clone(), identity.clone()));
        Ok(())
    }

    async fn drive_events(
        &mut self,
        interval: Duration,
        observer: &dyn DeliveryObserver,
    ) -> Result<(), NotifyError> {
        if self.posted.is_none() {
            return Err(NotifyError::NotPosted);
        }

        self.polls += 1;
        if self.confirmation_due() {
            self.confirmed = true;
            if let Some((request, _)) = &self.posted {
                observer.on_delivered(request);
            }
            return Ok(());
        }

        tokio::time::sleep(interval).await;
        Ok(())
    }
}
