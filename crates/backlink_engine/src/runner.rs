use std::collections::VecDeque;
use std::sync::Arc;

use backlink_core::{update, AppState, Effect, Msg, RunProgress};
use backlink_logging::{backlink_debug, backlink_warn};

use crate::{BatchGenerator, Describer, GenerateRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    Progress(RunProgress),
    ProgressCleared,
}

/// Receives progress while a run is driven.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: RunEvent);
}

/// Feeds messages through the reducer and executes the effects it returns.
///
/// Effects are awaited one at a time, and the outcome of a request is queued
/// as the next message, so a batch reply is always applied before the
/// following batch is issued.
pub struct RunDriver {
    generator: Option<Arc<dyn BatchGenerator>>,
    describer: Option<Arc<dyn Describer>>,
    sink: Arc<dyn ProgressSink>,
}

impl RunDriver {
    pub fn new(sink: Arc<dyn ProgressSink>) -> Self {
        Self {
            generator: None,
            describer: None,
            sink,
        }
    }

    pub fn with_generator(mut self, generator: Arc<dyn BatchGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_describer(mut self, describer: Arc<dyn Describer>) -> Self {
        self.describer = Some(describer);
        self
    }

    /// Apply `msg` and everything it causes until the state settles.
    pub async fn dispatch(&self, state: AppState, msg: Msg) -> AppState {
        let mut state = state;
        let mut queue = VecDeque::from([msg]);
        while let Some(msg) = queue.pop_front() {
            let (next, effects) = update(state, msg);
            state = next;
            for effect in effects {
                if let Some(reply) = self.execute(effect).await {
                    queue.push_back(reply);
                }
            }
        }
        state
    }

    async fn execute(&self, effect: Effect) -> Option<Msg> {
        match effect {
            Effect::ProgressChanged(progress) => {
                self.sink.emit(RunEvent::Progress(progress));
                None
            }
            Effect::ProgressCleared => {
                self.sink.emit(RunEvent::ProgressCleared);
                None
            }
            Effect::RequestBatch(request) => {
                let Some(generator) = &self.generator else {
                    return Some(Msg::BatchFailed {
                        message: "no generation service configured".to_string(),
                    });
                };
                let request = GenerateRequest::from(&request);
                backlink_debug!(
                    "batch start keyword={} size={}",
                    request.keyword,
                    request.batch_size
                );
                Some(match generator.generate(&request).await {
                    Ok(data) => {
                        backlink_debug!(
                            "batch done keyword={} items={}",
                            request.keyword,
                            data.items.len()
                        );
                        Msg::BatchSucceeded { items: data.items }
                    }
                    Err(err) => {
                        backlink_warn!("batch failed keyword={} error={}", request.keyword, err);
                        Msg::BatchFailed {
                            message: err.to_string(),
                        }
                    }
                })
            }
            Effect::RequestDescription { url, language } => {
                let Some(describer) = &self.describer else {
                    return Some(Msg::DescribeFailed {
                        message: "no description service configured".to_string(),
                    });
                };
                Some(match describer.describe(&url, language.as_deref()).await {
                    Ok(description) => Msg::DescribeSucceeded { description },
                    Err(err) => Msg::DescribeFailed {
                        message: err.to_string(),
                    },
                })
            }
        }
    }
}
