use crate::{BatchRequest, RunProgress};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Progress to show for the current run.
    ProgressChanged(RunProgress),
    /// The run ended; drop any progress display.
    ProgressCleared,
    /// Issue one generation call. Its outcome must come back as
    /// `Msg::BatchSucceeded` or `Msg::BatchFailed` before anything else is sent.
    RequestBatch(BatchRequest),
    /// Draft a business description from the page at `url`.
    RequestDescription {
        url: String,
        language: Option<String>,
    },
}
