/// Poll loop engine for the vhosts endpoint
///
/// Pure state machine: the UI hands it fetch outcomes and gets back the
/// effects to apply (render list, notices, persistence). Keeping the
/// loop free of browser APIs lets the whole polling behavior run under
/// ordinary unit tests.
use std::fmt;

use crate::changes::{ChangeSet, detect_changes};
use crate::collapse::{CollapseState, crossed_threshold};
use crate::grouping::{extract_hostnames, group_hosts};
use crate::notify::{Notice, notices_for};
use crate::vhost::{DomainGroup, VhostEntry};

/// What the popup is currently showing
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Idle,
    Fetching,
    Rendered,
    Empty,
    Error(String),
}

/// Result of one bridge fetch, as handed back by the UI
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// 2xx response body
    Body(String),
    /// Non-2xx HTTP status
    HttpStatus(u16),
    /// Fetch rejected or timed out
    Network(String),
}

/// Why a poll cycle failed
#[derive(Debug, Clone, PartialEq)]
pub enum PollError {
    Network(String),
    HttpStatus(u16),
    MalformedPayload(String),
}

impl fmt::Display for PollError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollError::Network(msg) => write!(f, "fetch failed: {}", msg),
            PollError::HttpStatus(code) => write!(f, "unexpected HTTP status {}", code),
            PollError::MalformedPayload(msg) => write!(f, "malformed payload: {}", msg),
        }
    }
}

/// Everything the UI must do after a poll cycle
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CycleEffects {
    /// Groups to render; None means the current render stands
    pub render: Option<Vec<DomainGroup>>,
    /// Notifications to forward to the sink
    pub notices: Vec<Notice>,
    /// Collapse markers were reset and must be re-persisted
    pub collapse_reset: bool,
}

/// State owned by the poll loop across cycles
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    state: ViewState,
    last_entries: Option<Vec<VhostEntry>>,
    last_hostnames: Vec<String>,
    total_hosts: usize,
    collapse: CollapseState,
    primed: bool,
    next_seq: u64,
    in_flight: Option<u64>,
    last_applied: u64,
}

impl Session {
    pub fn new(collapse: CollapseState) -> Session {
        Session {
            state: ViewState::Idle,
            last_entries: None,
            last_hostnames: Vec::new(),
            total_hosts: 0,
            collapse,
            primed: false,
            next_seq: 0,
            in_flight: None,
            last_applied: 0,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn total_hosts(&self) -> usize {
        self.total_hosts
    }

    pub fn is_collapsed(&self, domain: &str) -> bool {
        self.collapse.is_collapsed(domain, self.total_hosts)
    }

    /// Flip a group's collapsed state; returns the encoded marker list
    /// for the caller to persist
    pub fn toggle_group(&mut self, domain: &str) -> Vec<String> {
        self.collapse.toggle(domain, self.total_hosts);
        self.collapse.encode()
    }

    pub fn encode_collapse(&self) -> Vec<String> {
        self.collapse.encode()
    }

    /// Claim the next fetch slot. Returns the sequence number to pass
    /// back to `apply`, or None while another fetch is in flight (the
    /// tick is skipped rather than overlapped).
    pub fn begin_fetch(&mut self) -> Option<u64> {
        if self.in_flight.is_some() {
            return None;
        }
        self.next_seq += 1;
        self.in_flight = Some(self.next_seq);
        if self.state == ViewState::Idle {
            self.state = ViewState::Fetching;
        }
        Some(self.next_seq)
    }

    /// Apply one fetch outcome. Completions older than the last applied
    /// one are discarded so a slow response can never clobber newer
    /// state.
    pub fn apply(&mut self, seq: u64, outcome: FetchOutcome) -> CycleEffects {
        if seq <= self.last_applied {
            return CycleEffects::default();
        }
        self.last_applied = seq;
        if self.in_flight == Some(seq) {
            self.in_flight = None;
        }

        match self.parse(outcome) {
            Ok(entries) if entries.is_empty() => self.apply_empty(),
            Ok(entries) => self.apply_entries(entries),
            Err(e) => {
                log::warn!("poll cycle failed: {}", e);
                self.state = ViewState::Error(e.to_string());
                CycleEffects::default()
            }
        }
    }

    fn parse(&self, outcome: FetchOutcome) -> Result<Vec<VhostEntry>, PollError> {
        match outcome {
            FetchOutcome::Body(body) => serde_json::from_str(&body)
                .map_err(|e| PollError::MalformedPayload(e.to_string())),
            FetchOutcome::HttpStatus(code) => Err(PollError::HttpStatus(code)),
            FetchOutcome::Network(msg) => Err(PollError::Network(msg)),
        }
    }

    fn apply_entries(&mut self, entries: Vec<VhostEntry>) -> CycleEffects {
        // Unchanged payload: success, but nothing to re-render or notify
        if self.last_entries.as_deref() == Some(entries.as_slice()) {
            self.state = ViewState::Rendered;
            return CycleEffects::default();
        }

        let outcome = group_hosts(&entries);
        for invalid in &outcome.invalid {
            log::warn!("skipping entry: {}", invalid);
        }

        let new_total = outcome.total_hosts();
        let collapse_reset = crossed_threshold(self.total_hosts, new_total);
        if collapse_reset {
            self.collapse.reset();
        }

        let hostnames = extract_hostnames(&entries);
        let changes = detect_changes(&self.last_hostnames, &hostnames);
        let notices = if self.primed && changes.has_changes() {
            notices_for(&changes)
        } else {
            // First load establishes the baseline silently
            Vec::new()
        };

        self.last_entries = Some(entries);
        self.last_hostnames = hostnames;
        self.total_hosts = new_total;
        self.primed = true;
        self.state = ViewState::Rendered;

        CycleEffects {
            render: Some(outcome.groups),
            notices,
            collapse_reset,
        }
    }

    fn apply_empty(&mut self) -> CycleEffects {
        let notices = if self.primed && !self.last_hostnames.is_empty() {
            notices_for(&ChangeSet::all_removed(&self.last_hostnames))
        } else {
            Vec::new()
        };

        let collapse_reset = crossed_threshold(self.total_hosts, 0);
        if collapse_reset {
            self.collapse.reset();
        }

        self.last_entries = Some(Vec::new());
        self.last_hostnames.clear();
        self.total_hosts = 0;
        self.primed = true;
        self.state = ViewState::Empty;

        CycleEffects {
            render: None,
            notices,
            collapse_reset,
        }
    }
}
