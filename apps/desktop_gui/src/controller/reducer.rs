//! Applies backend events to the form controller and decides follow-up commands.

use client_core::FormController;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Turns a submit click into a generate command, or `None` if the controller refused it.
pub fn submit_command(controller: &mut FormController) -> Option<BackendCommand> {
    match controller.begin_submit() {
        Ok(request) => Some(BackendCommand::Generate { request }),
        Err(err) => {
            tracing::debug!("submit not dispatched: {err}");
            None
        }
    }
}

pub fn history_command(controller: &FormController) -> BackendCommand {
    BackendCommand::RefreshHistory {
        limit: controller.history_limit(),
    }
}

/// Applies one event. A successful generation yields the history refresh to queue next.
pub fn reduce(
    controller: &mut FormController,
    event: UiEvent,
    status: &mut String,
) -> Option<BackendCommand> {
    match event {
        UiEvent::Info(message) => {
            *status = message;
            None
        }
        UiEvent::DisclosureGenerated(response) => {
            controller.finish_submit_ok(response);
            *status = "Disclosure generated".to_string();
            Some(history_command(controller))
        }
        UiEvent::GenerateFailed(reason) => {
            tracing::debug!(reason, "generation failed");
            controller.finish_submit_err();
            status.clear();
            None
        }
        UiEvent::HistoryLoaded(items) => {
            controller.apply_history(items);
            None
        }
        UiEvent::HistoryFailed(reason) => {
            controller.history_refresh_failed(&reason);
            None
        }
    }
}
