use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, watch};

use crate::client::{GenerateService, Style};
use crate::history::{EntryId, HistoryIdentity, NavigationHistory};
use crate::mvi::Reducer;
use crate::preview::PreviewSurface;

use super::intent::SessionIntent;
use super::reducer::{Effect, SessionReducer};
use super::state::SessionState;

/// The runtime's intent channel has closed.
#[derive(Debug, Error)]
#[error("session runtime has shut down")]
pub struct SessionClosed;

/// Cheap, cloneable front door to the session runtime.
///
/// Methods mint entries where a trigger opens a new history position and post
/// the resulting intent; all state changes happen on the runtime's event loop.
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<SessionIntent>,
    shutdown: mpsc::UnboundedSender<()>,
}

impl SessionHandle {
    pub fn mount(&self) -> Result<(), SessionClosed> {
        self.send(SessionIntent::Mount {
            entry: HistoryIdentity::create_entry(),
        })
    }

    pub fn generate_random(&self) -> Result<(), SessionClosed> {
        self.send(SessionIntent::RequestRandom {
            entry: HistoryIdentity::create_entry(),
        })
    }

    pub fn submit_prompt(
        &self,
        prompt: impl Into<String>,
        style: Style,
    ) -> Result<(), SessionClosed> {
        self.send(SessionIntent::SubmitPrompt {
            prompt: prompt.into(),
            style,
        })
    }

    /// Echo of the tag passed to `PreviewSurface::set_markup`.
    pub fn settled(&self, generation: u64) -> Result<(), SessionClosed> {
        self.send(SessionIntent::PreviewSettled { generation })
    }

    pub fn shutdown(&self) {
        let _ = self.shutdown.send(());
    }

    fn send(&self, intent: SessionIntent) -> Result<(), SessionClosed> {
        self.tx.send(intent).map_err(|_| SessionClosed)
    }
}

/// Event loop owning the session state.
///
/// Single consumer of the intent channel: each intent is reduced to completion
/// before the next is taken, so no locking guards the state. Fetch effects run
/// as spawned tasks that post their completion back as intents, tagged with
/// the generation they answer to.
pub struct SessionRuntime {
    service: Arc<dyn GenerateService>,
    history: Box<dyn NavigationHistory>,
    preview: Box<dyn PreviewSurface>,
    rx: mpsc::UnboundedReceiver<SessionIntent>,
    tx: mpsc::UnboundedSender<SessionIntent>,
    navigation: mpsc::UnboundedReceiver<EntryId>,
    navigation_open: bool,
    shutdown: mpsc::UnboundedReceiver<()>,
    state: SessionState,
    observers: watch::Sender<SessionState>,
}

impl SessionRuntime {
    pub fn new(
        service: Arc<dyn GenerateService>,
        history: Box<dyn NavigationHistory>,
        preview: Box<dyn PreviewSurface>,
        navigation: mpsc::UnboundedReceiver<EntryId>,
    ) -> (Self, SessionHandle, watch::Receiver<SessionState>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = mpsc::unbounded_channel();
        let state = SessionState::default();
        let (observers, watch_rx) = watch::channel(state.clone());

        let handle = SessionHandle {
            tx: tx.clone(),
            shutdown: shutdown_tx,
        };
        let runtime = Self {
            service,
            history,
            preview,
            rx,
            tx,
            navigation,
            navigation_open: true,
            shutdown: shutdown_rx,
            state,
            observers,
        };
        (runtime, handle, watch_rx)
    }

    /// Run until shutdown is requested or every handle is gone.
    pub async fn run(mut self) {
        loop {
            let intent = tokio::select! {
                maybe = self.rx.recv() => match maybe {
                    Some(intent) => intent,
                    None => break,
                },
                maybe = self.navigation.recv(), if self.navigation_open => match maybe {
                    Some(target) => {
                        tracing::debug!(observed = %target, "navigation event, fetching fresh result");
                        SessionIntent::Navigated {
                            entry: HistoryIdentity::create_entry(),
                        }
                    }
                    None => {
                        self.navigation_open = false;
                        continue;
                    }
                },
                _ = self.shutdown.recv() => break,
            };
            self.step(intent);
        }
    }

    fn step(&mut self, intent: SessionIntent) {
        if let Some(stale) = stale_tag(&intent, self.state.generation) {
            tracing::debug!(
                stale,
                current = self.state.generation,
                "discarding superseded completion"
            );
        }
        let (next, effects) = SessionReducer::reduce(self.state.clone(), intent);
        self.state = next;
        let _ = self.observers.send(self.state.clone());
        for effect in effects {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::ReplaceHistory { entry } => self.history.replace(entry.id),
            Effect::PushHistory { entry } => self.history.push(entry.id),
            Effect::FetchRandom { generation } => {
                let service = Arc::clone(&self.service);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let intent = match service.generate_random().await {
                        Ok(result) => SessionIntent::GenerationSucceeded { generation, result },
                        Err(err) => {
                            tracing::warn!(%err, "random generation failed");
                            SessionIntent::GenerationFailed {
                                generation,
                                message: err.to_string(),
                            }
                        }
                    };
                    let _ = tx.send(intent);
                });
            }
            Effect::FetchCustom {
                generation,
                request,
            } => {
                let service = Arc::clone(&self.service);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let intent = match service.generate_custom(request).await {
                        Ok(result) => SessionIntent::GenerationSucceeded { generation, result },
                        Err(err) => {
                            tracing::warn!(%err, "custom generation failed");
                            SessionIntent::GenerationFailed {
                                generation,
                                message: err.to_string(),
                            }
                        }
                    };
                    let _ = tx.send(intent);
                });
            }
            Effect::Render { markup, generation } => {
                self.preview.set_markup(&markup, generation);
            }
        }
    }
}

fn stale_tag(intent: &SessionIntent, current: u64) -> Option<u64> {
    match intent {
        SessionIntent::GenerationSucceeded { generation, .. }
        | SessionIntent::GenerationFailed { generation, .. }
        | SessionIntent::PreviewSettled { generation }
            if *generation != current =>
        {
            Some(*generation)
        }
        _ => None,
    }
}
