#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::Context as _;
use userdesk_ui::UserDeskApp;
use userdesk_ui::state::State;

mod alloc {
    #[global_allocator]
    static MALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;
}

fn main() -> anyhow::Result<()> {
    // Log to stderr (if you run with `RUST_LOG=debug`).
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Commands are spawned on the ambient runtime from the UI thread.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("userdesk-io")
        .build()
        .context("failed to build Tokio runtime")?;
    let _guard = runtime.enter();

    let state = State::from_env()?;

    let native_options = eframe::NativeOptions {
        hardware_acceleration: eframe::HardwareAcceleration::Preferred,
        viewport: egui::ViewportBuilder::default()
            .with_title("Userdesk")
            .with_inner_size([1100.0, 600.0])
            .with_min_inner_size([640.0, 320.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Userdesk",
        native_options,
        Box::new(move |_cc| Ok(Box::new(UserDeskApp::new(state)))),
    )
    .map_err(|err| anyhow::anyhow!("failed to run eframe: {err}"))
}
