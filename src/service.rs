use crate::delivery::DeliveryService;
use crate::error::NotifyError;
use crate::models::{AppIdentity, DeliveryReport, NotificationRequest, WaitPolicy};
use crate::wait::wait_for_delivery;
use crate::watcher::DeliveryWatcher;

/// Hands `request` to `service` once and returns the watcher that will
/// observe its delivery.
pub fn post_notification<S>(
    service: &mut S,
    identity: &AppIdentity,
    request: NotificationRequest,
) -> Result<DeliveryWatcher, NotifyError>
where
    S: DeliveryService,
{
    log::debug!("[post] posting notification: {}", request.display_string());
    service.post(&request, identity)?;
    Ok(DeliveryWatcher::new(request))
}

pub async fn deliver_and_wait<S>(
    service: &mut S,
    identity: &AppIdentity,
    request: NotificationRequest,
    policy: &WaitPolicy,
) -> Result<DeliveryReport, NotifyError>
where
    S: DeliveryService,
{
    let watcher = post_notification(service, identity, request)?;
    wait_for_delivery(service, &watcher, policy).await
}
