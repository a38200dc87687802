use crate::error::NotifyError;
use crate::models::AppIdentity;

/// Makes the process present `identity` to the notification subsystem.
///
/// On macOS the notification center drops notifications from processes
/// without a bundle identifier, so the identity is installed process-wide.
/// Elsewhere the identity travels with each notification as its app name
/// and there is nothing to install.
pub fn install(identity: &AppIdentity) -> Result<(), NotifyError> {
    log::debug!("[identity] presenting as {identity}");
    install_platform(identity)
}

#[cfg(target_os = "macos")]
fn install_platform(identity: &AppIdentity) -> Result<(), NotifyError> {
    notify_rust::set_application(identity.as_str()).map_err(|err| {
        NotifyError::IdentityOverride {
            identity: identity.to_string(),
            reason: err.to_string(),
        }
    })
}

#[cfg(not(target_os = "macos"))]
fn install_platform(_identity: &AppIdentity) -> Result<(), NotifyError> {
    Ok(())
}
