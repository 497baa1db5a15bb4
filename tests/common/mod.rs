//! Shared test utilities and mock infrastructure.

#![allow(dead_code)]

pub mod mock_service;

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use sitewright::preview::PreviewSurface;
use sitewright::session::{Phase, SessionState};

/// Wait until the watched session state satisfies the predicate, with a
/// timeout so a wedged runtime fails the test instead of hanging it.
pub async fn wait_for_state(
    states: &mut watch::Receiver<SessionState>,
    predicate: impl Fn(&SessionState) -> bool,
) -> SessionState {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            {
                let snapshot = states.borrow_and_update();
                if predicate(&snapshot) {
                    return snapshot.clone();
                }
            }
            states
                .changed()
                .await
                .expect("session runtime dropped while waiting");
        }
    })
    .await
    .expect("timed out waiting for session state")
}

pub async fn wait_for_phase(
    states: &mut watch::Receiver<SessionState>,
    phase: Phase,
) -> SessionState {
    wait_for_state(states, |state| state.phase == phase).await
}

/// Preview surface that records every render it receives.
#[derive(Clone, Default)]
pub struct CapturePreview {
    renders: Arc<Mutex<Vec<(String, u64)>>>,
}

impl CapturePreview {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn renders(&self) -> Vec<(String, u64)> {
        self.renders.lock().clone()
    }
}

impl PreviewSurface for CapturePreview {
    fn set_markup(&mut self, markup: &str, generation: u64) {
        self.renders.lock().push((markup.to_string(), generation));
    }
}
