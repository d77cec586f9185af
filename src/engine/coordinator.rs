//! Engine coordinator - fan-out, collection and cancellation
//!
//! Each run owns its own result channel, so one `Engine` can be run several
//! times, even concurrently, without sharing any state between runs.

use crate::engine::report::{AdapterReport, AdapterStatus, RunReport};
use crate::model::Solicitation;
use crate::scraper::Scraper;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// How long a cancelled run keeps listening for adapters that are winding down
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

/// Message sent by an adapter task when its scrape ends
struct AdapterMessage {
    /// Registration index of the adapter
    index: usize,
    report: AdapterReport,
    solicitations: Vec<Solicitation>,
}

/// Accumulates adapter messages for one run
struct Collector {
    solicitations: Vec<Solicitation>,
    reports: Vec<Option<AdapterReport>>,
}

impl Collector {
    fn new(adapters: usize) -> Self {
        Self {
            solicitations: Vec::new(),
            reports: vec![None; adapters],
        }
    }

    fn accept(&mut self, message: AdapterMessage) {
        self.solicitations.extend(message.solicitations);
        self.reports[message.index] = Some(message.report);
    }
}

/// Runs registered scrapers in parallel and aggregates their results
pub struct Engine {
    scrapers: Vec<Arc<dyn Scraper>>,
    shutdown_grace: Duration,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine with no adapters
    pub fn new() -> Self {
        Self {
            scrapers: Vec::new(),
            shutdown_grace: DEFAULT_SHUTDOWN_GRACE,
        }
    }

    /// Sets how long a cancelled run waits for adapters to report partial results
    #[must_use]
    pub fn with_shutdown_grace(mut self, grace: Duration) -> Self {
        self.shutdown_grace = grace;
        self
    }

    /// Adds an adapter
    ///
    /// Names are not checked for duplicates; registering the same source
    /// twice scrapes it twice.
    pub fn register<S: Scraper + 'static>(&mut self, scraper: S) {
        self.scrapers.push(Arc::new(scraper));
    }

    /// Names of the registered adapters, in registration order
    pub fn adapter_names(&self) -> Vec<&str> {
        self.scrapers.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.scrapers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scrapers.is_empty()
    }

    /// Runs every registered adapter once
    ///
    /// # Flow
    ///
    /// 1. Spawn one task per adapter, each with a clone of `token`
    /// 2. Receive each task's records and status over the run's channel
    /// 3. Return once every task has reported, or once `token` is cancelled
    ///    and the shutdown grace period has passed
    ///
    /// Adapter errors and panics are recorded in the report and logged; they
    /// never abort siblings or the run.
    pub async fn run(&self, token: CancellationToken) -> RunReport {
        let start = Instant::now();
        tracing::info!(source_count = self.scrapers.len(), "Starting scraper engine");

        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = JoinSet::new();

        for (index, scraper) in self.scrapers.iter().enumerate() {
            let scraper = Arc::clone(scraper);
            let tx = tx.clone();
            let token = token.clone();
            tasks.spawn(async move {
                let (report, solicitations) = run_adapter(scraper, token).await;
                // The receiver only goes away once the run has returned.
                let _ = tx.send(AdapterMessage {
                    index,
                    report,
                    solicitations,
                });
            });
        }
        drop(tx);

        let mut collector = Collector::new(self.scrapers.len());

        // Cancellation wins a tie with the last message so the flag is stable.
        let cancelled = tokio::select! {
            biased;
            _ = token.cancelled() => true,
            _ = collect_all(&mut rx, &mut collector) => false,
        };

        if cancelled {
            tracing::warn!(
                grace_ms = self.shutdown_grace.as_millis() as u64,
                "Execution context cancelled; waiting briefly for adapters to wind down"
            );
            let _ = tokio::time::timeout(self.shutdown_grace, collect_all(&mut rx, &mut collector))
                .await;
            tasks.abort_all();
        }

        // Completion barrier: every task has finished or been aborted.
        while tasks.join_next().await.is_some() {}

        // A task that was mid-poll when aborted may still have sent its
        // message. Every sender is gone now, so this drains and ends.
        collect_all(&mut rx, &mut collector).await;

        let adapters = collector
            .reports
            .into_iter()
            .zip(&self.scrapers)
            .map(|(report, scraper)| {
                report.unwrap_or_else(|| {
                    tracing::warn!(scraper = scraper.name(), "Scraper did not finish before cancellation");
                    AdapterReport {
                        name: scraper.name().to_string(),
                        status: AdapterStatus::Cancelled,
                        elapsed: Duration::ZERO,
                    }
                })
            })
            .collect();

        let report = RunReport {
            solicitations: collector.solicitations,
            adapters,
            cancelled,
            elapsed: start.elapsed(),
        };

        tracing::info!(
            total_items = report.total_items(),
            failed_adapters = report.failed_adapters().len(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Scraper engine run complete"
        );

        report
    }

    /// Runs every adapter with a deadline
    ///
    /// The run is also cancelled if `parent` is cancelled (e.g. on Ctrl-C).
    pub async fn run_with_timeout(
        &self,
        parent: &CancellationToken,
        timeout: Duration,
    ) -> RunReport {
        let token = parent.child_token();
        let deadline = token.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            tracing::warn!(timeout_secs = timeout.as_secs_f64(), "Run deadline reached");
            deadline.cancel();
        });

        let report = self.run(token).await;
        timer.abort();
        report
    }
}

/// Receives adapter messages until every sender is gone
///
/// Cancel-safe: a message is either fully accepted or still in the channel.
async fn collect_all(
    rx: &mut mpsc::UnboundedReceiver<AdapterMessage>,
    collector: &mut Collector,
) {
    while let Some(message) = rx.recv().await {
        collector.accept(message);
    }
}

/// Runs one adapter, turning its result (or panic) into a report
async fn run_adapter(
    scraper: Arc<dyn Scraper>,
    token: CancellationToken,
) -> (AdapterReport, Vec<Solicitation>) {
    let name = scraper.name().to_string();
    tracing::info!(scraper = %name, "Running scraper");
    let started = Instant::now();

    let outcome = AssertUnwindSafe(scraper.scrape(token)).catch_unwind().await;
    let elapsed = started.elapsed();

    let (status, solicitations) = match outcome {
        Ok(Ok(solicitations)) => {
            tracing::info!(
                scraper = %name,
                items_found = solicitations.len(),
                "Scraper finished"
            );
            (
                AdapterStatus::Succeeded {
                    items: solicitations.len(),
                },
                solicitations,
            )
        }
        Ok(Err(e)) if e.is_cancelled() => {
            tracing::warn!(scraper = %name, "Scraper cancelled");
            (AdapterStatus::Cancelled, Vec::new())
        }
        Ok(Err(e)) => {
            tracing::error!(scraper = %name, error = %e, "Scraper failed");
            (
                AdapterStatus::Failed {
                    error: e.to_string(),
                },
                Vec::new(),
            )
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::error!(scraper = %name, panic = %message, "Scraper panicked");
            (AdapterStatus::Panicked { message }, Vec::new())
        }
    };

    (
        AdapterReport {
            name,
            status,
            elapsed,
        },
        solicitations,
    )
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
