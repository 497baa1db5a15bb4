//! The session controller: a pure reducer over session state plus the async
//! runtime that executes its effects.

mod intent;
mod reducer;
mod runtime;
mod state;

pub use intent::SessionIntent;
pub use reducer::{Effect, SessionReducer, EMPTY_PROMPT_ERROR};
pub use runtime::{SessionClosed, SessionHandle, SessionRuntime};
pub use state::{format_reset_display, Phase, QuotaView, SessionState, INITIAL_QUOTA};
