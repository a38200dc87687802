use std::time::Duration;

use notify_rust::Notification;
use tokio::sync::mpsc;

use super::DeliveryService;
use crate::error::NotifyError;
use crate::models::{AppIdentity, NotificationRequest};
use crate::watcher::DeliveryObserver;

#[derive(Debug)]
struct Submission {
    request: NotificationRequest,
    result: Result<(), String>,
}

/// Delivers through the desktop notification server via notify-rust.
///
/// The platform call blocks until the server has taken the notification,
/// so it runs on the blocking pool and its result is picked up by
/// [`DeliveryService::drive_events`]. The sender moves into that task, so
/// a task that dies without reporting closes the channel.
pub struct DesktopDeliveryService {
    sender: Option<mpsc::UnboundedSender<Submission>>,
    receiver: mpsc::UnboundedReceiver<Submission>,
}

impl DesktopDeliveryService {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            sender: Some(sender),
            receiver,
        }
    }
}

impl Default for DesktopDeliveryService {
    fn default() -> Self {
        Self::new()
    }
}

impl DeliveryService for DesktopDeliveryService {
    fn post(
        &mut self,
        request: &NotificationRequest,
        identity: &AppIdentity,
    ) -> Result<(), NotifyError> {
        let sender = self.sender.take().ok_or(NotifyError::AlreadyPosted)?;

        let notification = build_notification(request, identity);
        let request = request.clone();
        let submit = tokio::task::spawn_blocking(move || {
            let result = notification
                .show()
                .map(|_| ())
                .map_err(|err| err.to_string());
            let _ = sender.send(Submission { request, result });
        });
        drop(submit);

        Ok(())
    }

    async fn drive_events(
        &mut self,
        interval: Duration,
        observer: &dyn DeliveryObserver,
    ) -> Result<(), NotifyError> {
        if self.sender.is_some() {
            return Err(NotifyError::NotPosted);
        }

        match tokio::time::timeout(interval, self.receiver.recv()).await {
            Err(_elapsed) => Ok(()),
            Ok(None) => Err(NotifyError::DeliveryChannelClosed),
            Ok(Some(submission)) => {
                submission.result.map_err(NotifyError::Submit)?;
                observer.on_delivered(&submission.request);
                Ok(())
            }
        }
    }
}

pub(crate) fn build_notification(
    request: &NotificationRequest,
    identity: &AppIdentity,
) -> Notification {
    let mut notification = Notification::new();
    notification
        .summary(&request.title)
        .appname(identity.as_str());

    #[cfg(target_os = "macos")]
    {
        notification.subtitle(&request.subtitle);
    }

    #[cfg(not(target_os = "macos"))]
    {
        notification.body(&request.subtitle);
    }

    notification
}
