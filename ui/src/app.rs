use std::time::Duration;

use chrono::Utc;
use userdesk_business::request_refresh;
use userdesk_states::Time;

use crate::{state::State, widgets};

/// How often to repaint while commands are still running.
const TASK_POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct UserDeskApp {
    pub state: State,
}

impl UserDeskApp {
    /// Called once before the first frame. Queues the initial user fetch.
    pub fn new(mut state: State) -> Self {
        log::info!("queuing initial user fetch");
        request_refresh(&mut state.ctx);
        Self { state }
    }
}

impl eframe::App for UserDeskApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.ctx.update::<Time>(|t| *t.as_mut() = Utc::now());
        // Sync Compute for render
        self.state.ctx.sync_computes();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.strong("Users");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(concat!("v", env!("CARGO_PKG_VERSION")));
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            widgets::users_panel(&mut self.state.ctx, ui);
        });

        // Spawn whatever the panel queued this frame
        self.state.ctx.flush_commands();

        if self.state.ctx.has_running_tasks() {
            ctx.request_repaint_after(TASK_POLL_INTERVAL);
        }
    }
}
