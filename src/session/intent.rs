use crate::client::{GenerationResult, Style};
use crate::history::SessionEntry;
use crate::mvi::Intent;

/// Everything that can move the session state machine: user actions,
/// navigation events, and async completions.
///
/// Triggers that open a new history position carry a pre-minted entry, so the
/// reducer stays pure. Completions carry the generation tag of the request
/// they answer; the reducer discards tags that no longer match.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionIntent {
    /// Initial mount. The entry replaces the blank history position rather
    /// than pushing, so back never leads to an empty page.
    Mount { entry: SessionEntry },

    /// User asked for a fresh random site.
    RequestRandom { entry: SessionEntry },

    /// User submitted a custom prompt. No new entry: the result populates the
    /// current position.
    SubmitPrompt { prompt: String, style: Style },

    /// External back/forward navigation was observed. Revisiting never replays
    /// an old result; the pre-minted entry is pushed and a fresh random
    /// generation fetched.
    Navigated { entry: SessionEntry },

    GenerationSucceeded {
        generation: u64,
        result: GenerationResult,
    },

    GenerationFailed { generation: u64, message: String },

    /// The preview surface finished settling the markup rendered under this
    /// generation tag.
    PreviewSettled { generation: u64 },
}

impl Intent for SessionIntent {}
