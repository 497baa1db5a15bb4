//! Entry identity and navigable history.
//!
//! Every displayed generation result gets a [`SessionEntry`] with a unique
//! opaque id. The id is mirrored into a navigable history stack so earlier
//! positions stay reachable via back/forward, and the current position is
//! observable as the address `/<entry-id>`.

mod memory;

pub use memory::InMemoryHistory;

use std::fmt;
use std::str::FromStr;
use std::time::Instant;
use uuid::Uuid;

/// Opaque unique identifier of one navigable generation result.
///
/// Random (UUID v4) rather than time-derived: ids minted within the same clock
/// tick must still be distinct, and rapid triggering makes that case real.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(Uuid);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for EntryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(EntryId(Uuid::parse_str(s)?))
    }
}

/// One navigable history position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionEntry {
    pub id: EntryId,
    /// Monotonic creation timestamp; orders entries within a session.
    pub created_at: Instant,
}

/// Mints fresh session entries.
pub struct HistoryIdentity;

impl HistoryIdentity {
    pub fn create_entry() -> SessionEntry {
        SessionEntry {
            id: EntryId(Uuid::new_v4()),
            created_at: Instant::now(),
        }
    }
}

/// The navigable history stack the session controller writes into.
///
/// `push` appends a new position reachable from the previous one via back;
/// `replace` overwrites the current position without adding one (the very
/// first load must not be back-able to a blank state). `address` is the
/// externally visible `/<entry-id>` form of the current position.
pub trait NavigationHistory: Send {
    fn push(&mut self, id: EntryId);
    fn replace(&mut self, id: EntryId);
    fn address(&self) -> String;
}
