use std::time::Duration;

use crate::error::NotifyError;
use crate::models::{AppIdentity, NotificationRequest, WaitPolicy};

pub const IDENTITY_ENV: &str = "NOTIFY_CONFIRM_IDENTITY";
pub const POLL_INTERVAL_ENV: &str = "NOTIFY_CONFIRM_POLL_INTERVAL_MS";
pub const TIMEOUT_ENV: &str = "NOTIFY_CONFIRM_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub identity: AppIdentity,
    pub request: NotificationRequest,
    pub wait: WaitPolicy,
}

/// Values given on the command line. Anything left `None` falls back to
/// the environment, then to the defaults.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub identity: Option<String>,
    pub poll_interval_ms: Option<u64>,
    pub timeout_secs: Option<u64>,
}

impl Settings {
    pub fn load(overrides: Overrides) -> Result<Self, NotifyError> {
        Self::resolve(overrides, |key| std::env::var(key).ok())
    }

    pub fn resolve<F>(overrides: Overrides, env: F) -> Result<Self, NotifyError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let identity = match overrides.identity.or_else(|| env(IDENTITY_ENV)) {
            Some(raw) => AppIdentity::parse(&raw)?,
            None => AppIdentity::default(),
        };

        let defaults = NotificationRequest::default();
        let request = NotificationRequest {
            title: overrides.title.unwrap_or(defaults.title),
            subtitle: overrides.subtitle.unwrap_or(defaults.subtitle),
        };

        let mut wait = WaitPolicy::default();
        if let Some(ms) = overrides
            .poll_interval_ms
            .or_else(|| parse_env(&env, POLL_INTERVAL_ENV))
            .filter(|ms| *ms > 0)
        {
            wait.poll_interval = Duration::from_millis(ms);
        }
        wait.timeout = overrides
            .timeout_secs
            .or_else(|| parse_env(&env, TIMEOUT_ENV))
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Ok(Self {
            identity,
            request,
            wait,
        })
    }
}

fn parse_env<F>(env: &F, key: &str) -> Option<u64>
where
    F: Fn(&str) -> Option<String>,
{
    env(key).and_then(|raw| raw.trim().parse().ok())
}
