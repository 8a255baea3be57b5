// src/pipeline/watch.rs

//! Watch entry points: assembling the monitor and running it.

#[cfg(feature = "server")]
use std::sync::Arc;

use crate::config::Environment;
use crate::error::Result;
use crate::models::{PollOutcome, Settings};
use crate::services::{HtmlTableExtractor, HttpFetcher, SmtpNotifier};

use super::monitor::Monitor;
use super::schedule::SleepPolicy;

/// Assemble a monitor with the production collaborators.
///
/// Every fallible piece of setup happens here, before the first poll.
pub fn build_monitor(settings: &Settings, environment: &Environment) -> Result<Monitor> {
    environment.target.validate()?;
    let fetcher = HttpFetcher::new(&settings.fetch)?;
    let extractor = HtmlTableExtractor::new()?;
    let notifier = SmtpNotifier::new(&settings.mail, &environment.credentials)?;
    let policy = SleepPolicy::from_config(&settings.schedule)?;

    log::debug!("Sleep policy: {:?}", policy);

    Ok(Monitor::new(
        environment.target.clone(),
        settings.mail.subject.clone(),
        Box::new(fetcher),
        Box::new(extractor),
        Box::new(notifier),
        policy,
    ))
}

/// Run the loop in the foreground. Never returns.
pub async fn run_watch(monitor: Monitor) -> Result<()> {
    monitor.run_forever().await;
    Ok(())
}

/// Run the loop as a background task and the liveness endpoint in the
/// foreground.
///
/// If the endpoint cannot be served, the failure is logged and the loop keeps
/// running on its own.
#[cfg(feature = "server")]
pub async fn run_watch_with_server(monitor: Monitor, bind: &str) -> Result<()> {
    let monitor = Arc::new(monitor);
    let poller = tokio::spawn({
        let monitor = Arc::clone(&monitor);
        async move { monitor.run_forever().await }
    });

    if let Err(e) = crate::server::serve(bind).await {
        log::error!("Liveness server stopped: {}", e);
    }

    if let Err(e) = poller.await {
        log::error!("Poll loop terminated: {}", e);
    }
    Ok(())
}

/// Poll exactly once and log the outcome.
pub async fn run_check(monitor: &Monitor) -> PollOutcome {
    log::info!(
        "Checking {} for program code {}",
        monitor.target().url,
        monitor.target().code
    );
    let outcome = monitor.poll_once().await;
    if outcome.is_error() {
        log::error!("{}", outcome);
    } else {
        log::info!("{}", outcome);
    }
    outcome
}
