//! Per-run report returned by the engine
//!
//! A run never fails as a whole. What happened to each adapter is recorded
//! here so callers can tell "nothing found" apart from "every adapter failed".

use crate::model::Solicitation;
use std::fmt;
use std::time::Duration;

/// How one adapter's scrape ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterStatus {
    /// Scrape returned records (possibly none)
    Succeeded { items: usize },

    /// Scrape returned an error; no records were contributed
    Failed { error: String },

    /// The run was cancelled before this adapter reported
    Cancelled,

    /// The adapter panicked; the panic was contained
    Panicked { message: String },
}

impl AdapterStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    /// Items contributed to the aggregate
    pub fn items(&self) -> usize {
        match self {
            Self::Succeeded { items } => *items,
            _ => 0,
        }
    }
}

impl fmt::Display for AdapterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Succeeded { items } => write!(f, "ok ({} items)", items),
            Self::Failed { error } => write!(f, "failed: {}", error),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Panicked { message } => write!(f, "panicked: {}", message),
        }
    }
}

/// Outcome of one adapter within a run
#[derive(Debug, Clone)]
pub struct AdapterReport {
    /// The adapter's name
    pub name: String,

    pub status: AdapterStatus,

    /// Time the adapter ran for (zero if it never reported)
    pub elapsed: Duration,
}

/// Everything a single engine run produced
#[derive(Debug, Default)]
pub struct RunReport {
    /// Union of all records returned by successful adapters
    pub solicitations: Vec<Solicitation>,

    /// One entry per registered adapter, in registration order
    pub adapters: Vec<AdapterReport>,

    /// True if the execution context was cancelled before every adapter finished
    pub cancelled: bool,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl RunReport {
    pub fn total_items(&self) -> usize {
        self.solicitations.len()
    }

    /// Adapters that did not succeed
    pub fn failed_adapters(&self) -> Vec<&AdapterReport> {
        self.adapters
            .iter()
            .filter(|a| !a.status.is_success())
            .collect()
    }

    /// Returns true if at least one adapter ran and none succeeded
    pub fn all_failed(&self) -> bool {
        !self.adapters.is_empty() && self.adapters.iter().all(|a| !a.status.is_success())
    }

    /// Hands the aggregate to the caller
    pub fn into_solicitations(self) -> Vec<Solicitation> {
        self.solicitations
    }
}
