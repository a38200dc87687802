use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("invalid application identity '{identity}': {reason}")]
    InvalidIdentity { identity: String, reason: String },

    #[error("failed to override application identity with '{identity}': {reason}")]
    IdentityOverride { identity: String, reason: String },

    #[error("a notification was already posted through this delivery service")]
    AlreadyPosted,

    #[error("no notification has been posted yet")]
    NotPosted,

    #[error("notification submit failed: {0}")]
    Submit(String),

    #[error("delivery confirmation channel closed before the notification was confirmed")]
    DeliveryChannelClosed,
}
