// src/pipeline/monitor.rs

//! Poll / match / notify / sleep cycle.
//!
//! Each poll is independent: nothing is remembered between iterations, so a
//! row that stays on the page for a whole day is reported on every poll that
//! sees it.

use chrono::NaiveDate;

use crate::error::AppError;
use crate::models::{MonitorConfig, PollOutcome};
use crate::services::{Notifier, PageFetcher, TableExtractor};
use crate::utils::{format_result_date, local_today};

use super::schedule::SleepPolicy;

/// Drives the watch loop against injected collaborators.
pub struct Monitor {
    target: MonitorConfig,
    subject: String,
    fetcher: Box<dyn PageFetcher>,
    extractor: Box<dyn TableExtractor>,
    notifier: Box<dyn Notifier>,
    policy: SleepPolicy,
}

impl Monitor {
    pub fn new(
        target: MonitorConfig,
        subject: impl Into<String>,
        fetcher: Box<dyn PageFetcher>,
        extractor: Box<dyn TableExtractor>,
        notifier: Box<dyn Notifier>,
        policy: SleepPolicy,
    ) -> Self {
        Self {
            target,
            subject: subject.into(),
            fetcher,
            extractor,
            notifier,
            policy,
        }
    }

    pub fn target(&self) -> &MonitorConfig {
        &self.target
    }

    pub fn policy(&self) -> &SleepPolicy {
        &self.policy
    }

    /// Poll once, matching against today's local date.
    pub async fn poll_once(&self) -> PollOutcome {
        self.poll_on(local_today()).await
    }

    /// Poll once, matching result dates against `today`.
    pub async fn poll_on(&self, today: NaiveDate) -> PollOutcome {
        let url = &self.target.url;

        let page = match self.fetcher.fetch(url).await {
            Ok(page) => page,
            Err(e) => return PollOutcome::FetchError(e.to_string()),
        };
        if !page.is_success() {
            let error = AppError::fetch(url, format!("HTTP status {}", page.status));
            return PollOutcome::FetchError(error.to_string());
        }

        let rows = match self.extractor.first_table(&page.body) {
            Ok(Some(rows)) => rows,
            Ok(None) => return PollOutcome::ParseError("no table found".to_string()),
            Err(e) => return PollOutcome::ParseError(e.to_string()),
        };

        let today = format_result_date(today);
        log::debug!(
            "Scanning {} row(s) for {} on {}",
            rows.len().saturating_sub(1),
            self.target.code,
            today
        );

        // First row is the header.
        let Some(event) = rows
            .iter()
            .skip(1)
            .find_map(|row| row.matches(&self.target.code, &today))
        else {
            return PollOutcome::NoMatch;
        };

        let notified = match self
            .notifier
            .notify(&self.target.recipient, &self.subject, &event.body())
            .await
        {
            Ok(()) => true,
            Err(e) => {
                log::error!("Error sending email: {}", e);
                false
            }
        };

        PollOutcome::MatchFound { event, notified }
    }

    /// Poll, log, sleep, forever.
    ///
    /// Errors inside an iteration are logged and the loop carries on.
    pub async fn run_forever(&self) {
        log::info!(
            "Watching {} for program code {}",
            self.target.url,
            self.target.code
        );
        loop {
            log::info!("Monitoring started...");
            let outcome = self.poll_once().await;
            log_outcome(&outcome);

            let interval = self.policy.next_interval_now();
            log::info!("Sleeping for {} minutes...", interval.as_secs() / 60);
            tokio::time::sleep(interval).await;
        }
    }
}

fn log_outcome(outcome: &PollOutcome) {
    match outcome {
        PollOutcome::MatchFound { notified: true, .. } => log::info!("{}", outcome),
        PollOutcome::MatchFound { notified: false, .. } => log::warn!("{}", outcome),
        PollOutcome::NoMatch => log::info!("{}", outcome),
        PollOutcome::FetchError(_) | PollOutcome::ParseError(_) => log::error!("{}", outcome),
    }
}
