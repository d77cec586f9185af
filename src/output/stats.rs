//! Statistics for a single engine run
//!
//! Operators see these after every run; a run where every adapter failed
//! is called out explicitly.

use crate::engine::{AdapterStatus, RunReport};

/// Summary counts derived from a run report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStatistics {
    /// Records in the aggregate
    pub total_items: usize,

    /// Documents attached across all records
    pub total_documents: usize,

    /// Records that had a detail URL but no documents
    pub items_without_documents: usize,

    pub adapters_succeeded: usize,
    pub adapters_failed: usize,
    pub adapters_cancelled: usize,
    pub adapters_panicked: usize,
}

impl RunStatistics {
    /// Computes statistics from a finished run
    pub fn from_report(report: &RunReport) -> Self {
        let mut stats = Self {
            total_items: report.total_items(),
            ..Self::default()
        };

        for sol in &report.solicitations {
            stats.total_documents += sol.documents.len();
            if sol.has_detail_url() && sol.documents.is_empty() {
                stats.items_without_documents += 1;
            }
        }

        for adapter in &report.adapters {
            match adapter.status {
                AdapterStatus::Succeeded { .. } => stats.adapters_succeeded += 1,
                AdapterStatus::Failed { .. } => stats.adapters_failed += 1,
                AdapterStatus::Cancelled => stats.adapters_cancelled += 1,
                AdapterStatus::Panicked { .. } => stats.adapters_panicked += 1,
            }
        }

        stats
    }

    pub fn adapters_total(&self) -> usize {
        self.adapters_succeeded + self.adapters_failed + self.adapters_cancelled + self.adapters_panicked
    }
}

/// Prints a run summary to stdout
pub fn print_statistics(report: &RunReport) {
    let stats = RunStatistics::from_report(report);

    println!("=== Scraper Run Summary ===\n");

    println!("Adapters ({}):", report.adapters.len());
    for adapter in &report.adapters {
        println!(
            "  - {}: {} in {:.1}s",
            adapter.name,
            adapter.status,
            adapter.elapsed.as_secs_f64()
        );
    }
    println!();

    println!("Results:");
    println!("  Solicitations found: {}", stats.total_items);
    println!("  Documents attached: {}", stats.total_documents);
    println!(
        "  Items with a detail page but no documents: {}",
        stats.items_without_documents
    );
    println!();

    if report.cancelled {
        println!("Run was cancelled before every adapter finished.");
    }
    if report.all_failed() {
        println!("Every adapter failed; no results were collected.");
    }

    println!(
        "Completed in {:.1}s ({} / {} adapters succeeded)",
        report.elapsed.as_secs_f64(),
        stats.adapters_succeeded,
        stats.adapters_total()
    );
}
