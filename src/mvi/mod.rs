//! State-machine primitives for unidirectional data flow.
//!
//! ```text
//! Intent ──→ Reducer ──→ (State, Effects) ──→ Runtime ──→ collaborators
//!    ↑                                           │
//!    └───────────── async completions ───────────┘
//! ```
//!
//! - **State**: self-contained snapshot of the session
//! - **Intent**: user actions, navigation events, async completions
//! - **Reducer**: pure function from `(State, Intent)` to the next state plus
//!   the effects the runtime must execute (history mutation, network fetches,
//!   preview rendering)
//!
//! Keeping effects out of the reducer is what makes every transition —
//! including stale-response discards — testable without a runtime.

/// Marker trait for state objects.
///
/// States should be:
/// - Immutable (Clone to create new states)
/// - Self-contained (all data needed to render a view of the session)
/// - Comparable (PartialEq for detecting changes)
pub trait AppState: Clone + PartialEq + Default + Send + 'static {}

/// Marker trait for intent objects.
///
/// Intents are processed by reducers to produce new states and effects.
pub trait Intent: Send + 'static {}

/// Reducer transforms state based on intents.
///
/// The reducer is the only place where state transitions happen. It must be a
/// pure function: effects are *described*, never performed, here.
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: AppState;

    /// The intent type this reducer handles.
    type Intent: Intent;

    /// The effect type the runtime executes after each transition.
    type Effect: Send + 'static;

    /// Process an intent and return the new state plus pending effects.
    fn reduce(state: Self::State, intent: Self::Intent) -> (Self::State, Vec<Self::Effect>);
}
