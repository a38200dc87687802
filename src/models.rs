use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::NotifyError;

pub const DEFAULT_IDENTITY: &str = "com.apple.terminal";
pub const DEFAULT_TITLE: &str = "Testing title";
pub const DEFAULT_SUBTITLE: &str = "Testing subtitle";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub title: String,
    pub subtitle: String,
}

impl NotificationRequest {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
        }
    }

    pub fn display_string(&self) -> String {
        format!("{} : {}", self.title, self.subtitle)
    }
}

impl Default for NotificationRequest {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE, DEFAULT_SUBTITLE)
    }
}

/// Reverse-DNS identifier the notification subsystem attributes a
/// notification to, e.g. `com.apple.terminal`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppIdentity(String);

impl AppIdentity {
    pub fn parse(value: &str) -> Result<Self, NotifyError> {
        let value = value.trim();
        let invalid = |reason: &str| NotifyError::InvalidIdentity {
            identity: value.to_string(),
            reason: reason.to_string(),
        };

        if value.is_empty() {
            return Err(invalid("identity is empty"));
        }

        let segments: Vec<&str> = value.split('.').collect();
        if segments.len() < 2 {
            return Err(invalid("expected at least two dot-separated segments"));
        }

        for segment in segments {
            if segment.is_empty() {
                return Err(invalid("empty segment"));
            }
            if !segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            {
                return Err(invalid(
                    "segments may only contain ASCII letters, digits, '-' and '_'",
                ));
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AppIdentity {
    fn default() -> Self {
        Self(DEFAULT_IDENTITY.to_string())
    }
}

impl fmt::Display for AppIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub poll_interval: Duration,
    /// `None` blocks until the platform confirms delivery, however long that takes.
    pub timeout: Option<Duration>,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    NotConfirmed,
}

impl DeliveryOutcome {
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Delivered => 0,
            Self::NotConfirmed => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    pub outcome: DeliveryOutcome,
    pub polls: u64,
    pub delivered_at: Option<DateTime<Utc>>,
}
