//! Scripted in-process generation service for controller-flow tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::oneshot;

use sitewright::client::{ClientError, GenerateService, GenerationRequest, GenerationResult};

type Outcome = Result<GenerationResult, ClientError>;

enum Scripted {
    Ready(Outcome),
    /// Held until the test releases the paired sender; lets tests control the
    /// order in which in-flight requests resolve.
    Gated(oneshot::Receiver<Outcome>),
}

/// FIFO-scripted [`GenerateService`]: each call (custom or random) consumes
/// the next scripted outcome in order.
#[derive(Default)]
pub struct MockService {
    script: Mutex<VecDeque<Scripted>>,
    custom_requests: Mutex<Vec<GenerationRequest>>,
    random_calls: Mutex<u32>,
}

impl MockService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_ok(&self, html: &str, remaining: u32, reset_time: Option<f64>) {
        self.script
            .lock()
            .push_back(Scripted::Ready(Ok(ok_result(html, remaining, reset_time))));
    }

    pub fn push_err(&self, status: u16, message: &str) {
        self.script.lock().push_back(Scripted::Ready(Err(
            ClientError::Service {
                status,
                message: message.to_string(),
            },
        )));
    }

    /// Script a response the test resolves manually.
    pub fn push_gated(&self) -> oneshot::Sender<Outcome> {
        let (tx, rx) = oneshot::channel();
        self.script.lock().push_back(Scripted::Gated(rx));
        tx
    }

    pub fn custom_requests(&self) -> Vec<GenerationRequest> {
        self.custom_requests.lock().clone()
    }

    pub fn custom_count(&self) -> usize {
        self.custom_requests.lock().len()
    }

    pub fn random_count(&self) -> u32 {
        *self.random_calls.lock()
    }

    async fn next(&self) -> Outcome {
        let scripted = self
            .script
            .lock()
            .pop_front()
            .expect("mock service script exhausted");
        match scripted {
            Scripted::Ready(outcome) => outcome,
            Scripted::Gated(rx) => rx.await.unwrap_or_else(|_| {
                Err(ClientError::Service {
                    status: 599,
                    message: "mock gate dropped".to_string(),
                })
            }),
        }
    }
}

#[async_trait]
impl GenerateService for MockService {
    async fn generate_custom(&self, request: GenerationRequest) -> Outcome {
        self.custom_requests.lock().push(request);
        self.next().await
    }

    async fn generate_random(&self) -> Outcome {
        *self.random_calls.lock() += 1;
        self.next().await
    }
}

pub fn ok_result(html: &str, remaining: u32, reset_time: Option<f64>) -> GenerationResult {
    GenerationResult {
        html: html.to_string(),
        remaining,
        reset_time,
    }
}
