//! Backend commands queued from UI to backend worker.

use shared::protocol::DisclosureRequest;

#[derive(Debug)]
pub enum BackendCommand {
    Generate { request: DisclosureRequest },
    RefreshHistory { limit: u32 },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Generate { .. } => "generate",
            BackendCommand::RefreshHistory { .. } => "refresh_history",
        }
    }
}
