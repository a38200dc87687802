use std::sync::atomic::{AtomicBool, Ordering};

use crate::models::NotificationRequest;

/// Receives delivery confirmations from a delivery service.
pub trait DeliveryObserver {
    fn on_delivered(&self, request: &NotificationRequest);
}

/// Tracks delivery of one request. The pending flag starts true and is
/// cleared at most once.
#[derive(Debug)]
pub struct DeliveryWatcher {
    request: NotificationRequest,
    pending: AtomicBool,
}

impl DeliveryWatcher {
    pub fn new(request: NotificationRequest) -> Self {
        Self {
            request,
            pending: AtomicBool::new(true),
        }
    }

    pub fn request(&self) -> &NotificationRequest {
        &self.request
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Clears the pending flag. Returns `true` only for the call that
    /// performed the transition.
    fn mark_delivered(&self) -> bool {
        self.pending
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

impl DeliveryObserver for DeliveryWatcher {
    fn on_delivered(&self, request: &NotificationRequest) {
        if request != &self.request {
            log::debug!(
                "[watcher] ignoring delivery of unrelated notification: {}",
                request.display_string()
            );
            return;
        }

        if self.mark_delivered() {
            log::debug!("[watcher] notification delivered");
        }
    }
}
