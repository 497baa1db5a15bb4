use chrono::{Local, TimeZone};

use crate::history::SessionEntry;
use crate::mvi::AppState;

/// Quota shown before the first successful response arrives.
pub const INITIAL_QUOTA: u32 = 100;

/// Where the controller is in its request lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Before the initial mount.
    #[default]
    Idle,
    /// A generation request is in flight (or markup is still settling).
    Loading,
    /// The current entry's result is displayed.
    Ready,
    /// The last request for the current entry failed.
    Failed,
}

/// Complete snapshot of the session, owned by the runtime and observed through
/// a watch subscription. Always reflects exactly the entry currently visible.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// The current navigable entry. `None` only while [`Phase::Idle`].
    pub entry: Option<SessionEntry>,
    pub phase: Phase,
    /// Markup of the most recent successful generation. Stays on screen while
    /// a newer request loads, matching how the preview behaves.
    pub markup: String,
    pub error: Option<String>,
    pub remaining_quota: u32,
    pub quota_reset_display: Option<String>,
    /// Provenance tag of the authoritative request. Bumped on every dispatched
    /// fetch; completions carrying an older tag are stale and discarded.
    pub generation: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            entry: None,
            phase: Phase::default(),
            markup: String::new(),
            error: None,
            remaining_quota: INITIAL_QUOTA,
            quota_reset_display: None,
            generation: 0,
        }
    }
}

impl AppState for SessionState {}

impl SessionState {
    /// Read-only view for the quota presenter.
    pub fn quota(&self) -> QuotaView {
        QuotaView {
            remaining: self.remaining_quota,
            reset_display: self.quota_reset_display.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaView {
    pub remaining: u32,
    pub reset_display: Option<String>,
}

/// Convert the service's epoch-seconds reset value to the viewer's local time
/// representation. `None` for epochs outside the representable range.
pub fn format_reset_display(epoch_seconds: f64) -> Option<String> {
    let secs = epoch_seconds.trunc() as i64;
    Local
        .timestamp_opt(secs, 0)
        .single()
        .map(|reset| reset.format("%Y-%m-%d %H:%M:%S").to_string())
}
