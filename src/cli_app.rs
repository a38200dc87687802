use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use crate::config::{Overrides, Settings};
use crate::delivery::{
    Confirmation, DeliveryService, DesktopDeliveryService, SimulatedDeliveryService,
};
use crate::identity;
use crate::models::DeliveryOutcome;
use crate::service::deliver_and_wait;

#[derive(Debug, Parser)]
#[command(name = "notify-confirm")]
#[command(about = "Post a desktop notification and wait until it is delivered")]
struct Cli {
    /// Notification title
    #[arg(long)]
    title: Option<String>,
    /// Notification subtitle
    #[arg(long)]
    subtitle: Option<String>,
    /// Application identity to post as, e.g. com.apple.terminal
    #[arg(long)]
    identity: Option<String>,
    /// How long each event-processing slice lasts
    #[arg(long)]
    poll_interval_ms: Option<u64>,
    /// Give up after this many seconds instead of waiting forever (0 waits forever)
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Run against an in-process notification server that confirms at once
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            identity: self.identity.clone(),
            poll_interval_ms: self.poll_interval_ms,
            timeout_secs: self.timeout_secs,
        }
    }
}

pub async fn run_from_args<I, T>(args: I) -> anyhow::Result<ExitCode>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    init_logging();
    log::debug!("starting notify-confirm");

    let cli = Cli::parse_from(args);
    let settings = Settings::load(cli.overrides()).context("load settings")?;

    identity::install(&settings.identity).context("override application identity")?;

    let outcome = if cli.dry_run {
        let mut service = SimulatedDeliveryService::new(Confirmation::AfterPolls(0));
        run_delivery(&mut service, &settings).await?
    } else {
        let mut service = DesktopDeliveryService::new();
        run_delivery(&mut service, &settings).await?
    };

    log::debug!("exiting");
    Ok(ExitCode::from(outcome.exit_code()))
}

async fn run_delivery<S>(service: &mut S, settings: &Settings) -> anyhow::Result<DeliveryOutcome>
where
    S: DeliveryService,
{
    let report = deliver_and_wait(
        service,
        &settings.identity,
        settings.request.clone(),
        &settings.wait,
    )
    .await
    .context("deliver notification")?;

    match report.outcome {
        DeliveryOutcome::Delivered => {
            let delivered_at = report
                .delivered_at
                .map(|at| at.to_rfc3339())
                .unwrap_or_default();
            println!(
                "Delivered: {} (as {}, polls={}, at={})",
                settings.request.display_string(),
                settings.identity,
                report.polls,
                delivered_at
            );
        }
        DeliveryOutcome::NotConfirmed => {
            eprintln!(
                "Delivery not confirmed: {} (as {}, polls={})",
                settings.request.display_string(),
                settings.identity,
                report.polls
            );
        }
    }

    Ok(report.outcome)
}

fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
