/// Adapter run state definitions
///
/// A reference adapter moves through these states once per scrape call.
use std::fmt;

/// Represents where an adapter is within a single scrape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdapterState {
    // ===== Active States =====
    /// Scrape has not issued any request yet
    Unstarted,

    /// Landing page fetched, session cookie retained
    SessionEstablished,

    /// Search request sent, waiting on or decoding the response
    Searching,

    /// Fetching a detail page for one item
    ItemEnriching,

    // ===== Terminal States =====
    /// All rows were turned into records
    Done,

    /// Session bootstrap or search failed; no records for this run
    Failed,
}

impl AdapterState {
    /// Returns true if no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Returns true if moving to `next` is a legal transition
    ///
    /// Enrichment failures degrade a single item and never lead to `Failed`,
    /// so `ItemEnriching` can only continue or finish.
    pub fn can_transition_to(&self, next: AdapterState) -> bool {
        use AdapterState::*;
        matches!(
            (self, next),
            (Unstarted, SessionEstablished)
                | (Unstarted, Failed)
                | (SessionEstablished, Searching)
                | (SessionEstablished, Failed)
                | (Searching, ItemEnriching)
                | (Searching, Done)
                | (Searching, Failed)
                | (ItemEnriching, ItemEnriching)
                | (ItemEnriching, Done)
        )
    }

    /// Short snake_case label used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unstarted => "unstarted",
            Self::SessionEstablished => "session_established",
            Self::Searching => "searching",
            Self::ItemEnriching => "item_enriching",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for AdapterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tracks the state of one scrape call
#[derive(Debug)]
pub struct RunState<'a> {
    adapter: &'a str,
    current: AdapterState,
}

impl<'a> RunState<'a> {
    pub fn new(adapter: &'a str) -> Self {
        Self {
            adapter,
            current: AdapterState::Unstarted,
        }
    }

    pub fn current(&self) -> AdapterState {
        self.current
    }

    /// Moves to `next`, ignoring (and logging) illegal transitions
    pub fn advance(&mut self, next: AdapterState) {
        if self.current.can_transition_to(next) {
            tracing::debug!(
                adapter = self.adapter,
                from = %self.current,
                to = %next,
                "Adapter state transition"
            );
            self.current = next;
        } else {
            tracing::warn!(
                adapter = self.adapter,
                from = %self.current,
                to = %next,
                "Ignoring invalid adapter state transition"
            );
        }
    }
}
