use chrono::Utc;
use tokio::time::Instant;

use crate::delivery::DeliveryService;
use crate::error::NotifyError;
use crate::models::{DeliveryOutcome, DeliveryReport, WaitPolicy};
use crate::watcher::DeliveryWatcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitState {
    Waiting,
    Done,
    NotConfirmed,
}

/// Drives `service` in `policy.poll_interval` slices until `watcher` reports
/// delivery. Without a timeout this only returns once delivery is confirmed
/// or the service fails.
pub async fn wait_for_delivery<S>(
    service: &mut S,
    watcher: &DeliveryWatcher,
    policy: &WaitPolicy,
) -> Result<DeliveryReport, NotifyError>
where
    S: DeliveryService,
{
    // A deadline past what the clock can represent is no deadline at all.
    let deadline = policy
        .timeout
        .and_then(|timeout| Instant::now().checked_add(timeout));
    let mut polls: u64 = 0;

    loop {
        match next_state(watcher, deadline) {
            WaitState::Done => {
                return Ok(DeliveryReport {
                    outcome: DeliveryOutcome::Delivered,
                    polls,
                    delivered_at: Some(Utc::now()),
                });
            }
            WaitState::NotConfirmed => {
                log::warn!("[wait] delivery not confirmed after {polls} polls");
                return Ok(DeliveryReport {
                    outcome: DeliveryOutcome::NotConfirmed,
                    polls,
                    delivered_at: None,
                });
            }
            WaitState::Waiting => {}
        }

        let slice = match deadline {
            Some(deadline) => policy
                .poll_interval
                .min(deadline.saturating_duration_since(Instant::now())),
            None => policy.poll_interval,
        };

        log::debug!("[wait] waiting for delivery (poll {})", polls + 1);
        service.drive_events(slice, watcher).await?;
        polls += 1;
    }
}

fn next_state(watcher: &DeliveryWatcher, deadline: Option<Instant>) -> WaitState {
    if !watcher.is_pending() {
        return WaitState::Done;
    }

    match deadline {
        Some(deadline) if Instant::now() >= deadline => WaitState::NotConfirmed,
        _ => WaitState::Waiting,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use tokio::time::Instant;

    use super::wait_for_delivery;
    use crate::delivery::{Confirmation, DeliveryService, SimulatedDeliveryService};
    use crate::models::{AppIdentity, DeliveryOutcome, NotificationRequest, WaitPolicy};
    use crate::watcher::{DeliveryObserver, DeliveryWatcher};

    fn posted(confirmation: Confirmation) -> (SimulatedDeliveryService, DeliveryWatcher) {
        let request = NotificationRequest::default();
        let mut service = SimulatedDeliveryService::new(confirmation);
        service
            .post(&request, &AppIdentity::default())
            .expect("post");
        (service, DeliveryWatcher::new(request))
    }

    #[tokio::test(start_paused = true)]
    async fn immediate_confirmation_finishes_within_one_interval() {
        let (mut service, watcher) = posted(Confirmation::AfterPolls(0));
        let policy = WaitPolicy::default();
        let started = Instant::now();

        let report = wait_for_delivery(&mut service, &watcher, &policy)
            .await
            .expect("wait");

        assert_eq!(report.outcome, DeliveryOutcome::Delivered);
        assert_eq!(report.polls, 1);
        assert!(report.delivered_at.is_some());
        assert!(started.elapsed() <= policy.poll_interval);
    }

    #[tokio::test(start_paused = true)]
    async fn already_delivered_returns_without_polling() {
        let (mut service, watcher) = posted(Confirmation::Never);
        watcher.on_delivered(&NotificationRequest::default());

        let report = wait_for_delivery(&mut service, &watcher, &WaitPolicy::default())
            .await
            .expect("wait");

        assert_eq!(report.outcome, DeliveryOutcome::Delivered);
        assert_eq!(report.polls, 0);
        assert_eq!(service.polls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn keeps_polling_until_confirmation() {
        let (mut service, watcher) = posted(Confirmation::AfterPolls(5));

        let report = wait_for_delivery(&mut service, &watcher, &WaitPolicy::default())
            .await
            .expect("wait");

        assert_eq!(report.outcome, DeliveryOutcome::Delivered);
        assert_eq!(report.polls, 6);
    }

    #[tokio::test(start_paused = true)]
    async fn never_returns_while_pending_without_timeout() {
        let (mut service, watcher) = posted(Confirmation::Never);
        let policy = WaitPolicy::default();

        let result = tokio::time::timeout(
            Duration::from_secs(3600),
            wait_for_delivery(&mut service, &watcher, &policy),
        )
        .await;

        assert!(result.is_err(), "wait loop returned while still pending");
        assert!(watcher.is_pending());
        assert!(service.polls() >= 7000);
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_reports_not_confirmed() {
        let (mut service, watcher) = posted(Confirmation::Never);
        let policy = WaitPolicy {
            poll_interval: Duration::from_millis(500),
            timeout: Some(Duration::from_secs(2)),
        };
        let started = Instant::now();

        let report = wait_for_delivery(&mut service, &watcher, &policy)
            .await
            .expect("wait");

        assert_eq!(report.outcome, DeliveryOutcome::NotConfirmed);
        assert_eq!(report.polls, 4);
        assert_eq!(report.delivered_at, None);
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(2));
        assert!(elapsed < Duration::from_millis(2500));
    }

    #[tokio::test(start_paused = true)]
    async fn unrepresentable_timeout_waits_without_deadline() {
        let (mut service, watcher) = posted(Confirmation::AfterPolls(2));
        let policy = WaitPolicy {
            poll_interval: Duration::from_millis(500),
            timeout: Some(Duration::from_secs(u64::MAX)),
        };

        let report = wait_for_delivery(&mut service, &watcher, &policy)
            .await
            .expect("wait");

        assert_eq!(report.outcome, DeliveryOutcome::Delivered);
        assert_eq!(report.polls, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn confirmation_before_deadline_wins() {
        let (mut service, watcher) = posted(Confirmation::AfterPolls(1));
        let policy = WaitPolicy {
            poll_interval: Duration::from_millis(500),
            timeout: Some(Duration::from_secs(10)),
        };

        let report = wait_for_delivery(&mut service, &watcher, &policy)
            .await
            .expect("wait");

        assert_eq!(report.outcome, DeliveryOutcome::Delivered);
        assert_eq!(report.polls, 2);
    }
}
