use crate::client::GenerationRequest;
use crate::history::SessionEntry;
use crate::mvi::Reducer;

use super::intent::SessionIntent;
use super::state::{format_reset_display, Phase, SessionState};

/// Validation error for an empty or whitespace-only prompt.
pub const EMPTY_PROMPT_ERROR: &str = "Please enter a prompt";

/// Side effects the runtime executes after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Overwrite the current history position with this entry's id.
    ReplaceHistory { entry: SessionEntry },
    /// Append a new history position for this entry's id.
    PushHistory { entry: SessionEntry },
    /// Dispatch `GET /random`, tagged with the generation it answers to.
    FetchRandom { generation: u64 },
    /// Dispatch `POST /generate`, tagged likewise.
    FetchCustom {
        generation: u64,
        request: GenerationRequest,
    },
    /// Hand markup to the preview surface.
    Render { markup: String, generation: u64 },
}

pub struct SessionReducer;

impl Reducer for SessionReducer {
    type State = SessionState;
    type Intent = SessionIntent;
    type Effect = Effect;

    fn reduce(state: SessionState, intent: SessionIntent) -> (SessionState, Vec<Effect>) {
        match intent {
            SessionIntent::Mount { entry } => {
                if state.phase != Phase::Idle {
                    return (state, Vec::new());
                }
                let generation = state.generation + 1;
                (
                    SessionState {
                        entry: Some(entry),
                        phase: Phase::Loading,
                        error: None,
                        generation,
                        ..state
                    },
                    vec![
                        Effect::ReplaceHistory { entry },
                        Effect::FetchRandom { generation },
                    ],
                )
            }

            SessionIntent::RequestRandom { entry } | SessionIntent::Navigated { entry } => {
                if state.phase == Phase::Idle {
                    return (state, Vec::new());
                }
                let generation = state.generation + 1;
                (
                    SessionState {
                        entry: Some(entry),
                        phase: Phase::Loading,
                        error: None,
                        generation,
                        ..state
                    },
                    vec![
                        Effect::PushHistory { entry },
                        Effect::FetchRandom { generation },
                    ],
                )
            }

            SessionIntent::SubmitPrompt { prompt, style } => {
                if state.phase == Phase::Idle {
                    return (state, Vec::new());
                }
                if prompt.trim().is_empty() {
                    // Never reaches the network; everything but the error is
                    // left untouched.
                    return (
                        SessionState {
                            error: Some(EMPTY_PROMPT_ERROR.to_string()),
                            ..state
                        },
                        Vec::new(),
                    );
                }
                let generation = state.generation + 1;
                (
                    SessionState {
                        phase: Phase::Loading,
                        error: None,
                        generation,
                        ..state
                    },
                    vec![Effect::FetchCustom {
                        generation,
                        request: GenerationRequest { prompt, style },
                    }],
                )
            }

            SessionIntent::GenerationSucceeded { generation, result } => {
                if generation != state.generation {
                    // Stale: a newer request became authoritative meanwhile.
                    return (state, Vec::new());
                }
                let quota_reset_display = result
                    .reset_time
                    .and_then(format_reset_display)
                    .or_else(|| state.quota_reset_display.clone());
                (
                    SessionState {
                        phase: Phase::Ready,
                        markup: result.html.clone(),
                        error: None,
                        remaining_quota: result.remaining,
                        quota_reset_display,
                        ..state
                    },
                    vec![Effect::Render {
                        markup: result.html,
                        generation,
                    }],
                )
            }

            SessionIntent::GenerationFailed {
                generation,
                message,
            } => {
                if generation != state.generation {
                    return (state, Vec::new());
                }
                // Quota fields persist across failures.
                (
                    SessionState {
                        phase: Phase::Failed,
                        error: Some(message),
                        ..state
                    },
                    Vec::new(),
                )
            }

            SessionIntent::PreviewSettled { generation } => {
                if generation != state.generation || state.phase != Phase::Loading {
                    return (state, Vec::new());
                }
                (
                    SessionState {
                        phase: Phase::Ready,
                        ..state
                    },
                    Vec::new(),
                )
            }
        }
    }
}
