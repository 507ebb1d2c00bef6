//! Main panel for user management: toolbar, banners and the users table.

use egui::{Button, Color32, Response, Ui};
use userdesk_business::{
    UsersActionCompute, UsersActionKind, UsersListCompute, UsersState, dismiss_action_error,
    poll_users_workflow, request_refresh, request_users_action, toggle_user,
};
use userdesk_states::{StateCtx, Time};
use ustr::Ustr;

use super::table::render_users_table;

/// What the user asked for during this frame, applied after rendering.
#[derive(Debug, Default)]
struct PanelIntents {
    refresh: bool,
    action: Option<UsersActionKind>,
    dismiss_action_error: bool,
    toggles: Vec<(Ustr, bool)>,
}

/// Displays the users panel.
///
/// Call after `sync_computes` and before `flush_commands`; commands queued
/// here are spawned by the flush at the end of the frame.
pub fn users_panel(state_ctx: &mut StateCtx, ui: &mut Ui) -> Response {
    poll_users_workflow(state_ctx);

    let mut intents = PanelIntents::default();
    let response = ui
        .vertical(|ui| {
            render_toolbar(state_ctx, ui, &mut intents);
            render_banners(state_ctx, ui, &mut intents);
            ui.add_space(8.0);

            let users = state_ctx.state::<UsersState>();
            let now = *state_ctx.state::<Time>().as_ref();
            if users.users().is_empty() {
                if users.last_loaded().is_some() {
                    ui.label("No users found.");
                }
            } else {
                intents.toggles =
                    render_users_table(ui, users.users(), users.selection(), now);
            }
        })
        .response;

    apply_intents(state_ctx, intents);
    response
}

fn render_toolbar(state_ctx: &StateCtx, ui: &mut Ui, intents: &mut PanelIntents) {
    let selected = state_ctx.state::<UsersState>().selected_count();
    let list_loading = state_ctx
        .cached::<UsersListCompute>()
        .is_some_and(UsersListCompute::is_loading);
    let action_in_flight = state_ctx
        .cached::<UsersActionCompute>()
        .is_some_and(UsersActionCompute::is_in_flight);

    ui.horizontal(|ui| {
        if ui
            .add_enabled(!list_loading, Button::new("🔄 Refresh"))
            .clicked()
        {
            intents.refresh = true;
        }

        ui.separator();
        ui.label(format!("{selected} Selected"));

        let enabled = selected > 0 && !action_in_flight;
        for kind in UsersActionKind::ALL {
            if ui.add_enabled(enabled, Button::new(kind.label())).clicked() {
                intents.action = Some(kind);
            }
        }

        if list_loading {
            ui.spinner();
            ui.label("Loading users...");
        } else if action_in_flight {
            ui.spinner();
            ui.label("Applying...");
        }
    });
}

fn render_banners(state_ctx: &StateCtx, ui: &mut Ui, intents: &mut PanelIntents) {
    if let Some(message) = state_ctx
        .cached::<UsersListCompute>()
        .and_then(UsersListCompute::error_message)
    {
        ui.horizontal(|ui| {
            ui.colored_label(Color32::RED, format!("Failed to load users: {message}"));
            if ui.button("Retry").clicked() {
                intents.refresh = true;
            }
        });
    }

    if let Some(message) = state_ctx
        .cached::<UsersActionCompute>()
        .and_then(UsersActionCompute::error_message)
    {
        ui.horizontal(|ui| {
            ui.colored_label(Color32::RED, message);
            if ui.button("Dismiss").clicked() {
                intents.dismiss_action_error = true;
            }
        });
    }
}

fn apply_intents(state_ctx: &mut StateCtx, intents: PanelIntents) {
    for (id, checked) in intents.toggles {
        toggle_user(state_ctx, &id, checked);
    }
    if intents.dismiss_action_error {
        dismiss_action_error(state_ctx);
    }
    if let Some(kind) = intents.action {
        request_users_action(state_ctx, kind);
    }
    if intents.refresh {
        request_refresh(state_ctx);
    }
}
