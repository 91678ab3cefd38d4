//! Events the backend worker sends back to the UI thread.

use shared::protocol::{DisclosureResponse, HistoryItem};

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    DisclosureGenerated(DisclosureResponse),
    GenerateFailed(String),
    HistoryLoaded(Vec<HistoryItem>),
    HistoryFailed(String),
}
