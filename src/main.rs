#![windows_subsystem = "windows"]

//! Demo host: a windowed process with no console that logs from several
//! threads and through the `log` facade, then exits.

use std::thread;

fn main() {
    let _guard = exelog::startup_current_exe();
    exelog::exelog!("STARTING {} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    if let Some(logger) = exelog::global() {
        if let Err(e) = exelog::bridge::install(logger) {
            exelog::exelog!("log facade unavailable: {e}");
        }
    }

    thread::scope(|s| {
        for worker in 0..4 {
            s.spawn(move || {
                for step in 0..8 {
                    exelog::exelog!("worker {worker} step {step}");
                }
            });
        }
    });

    log::info!("routed through the log facade");
    exelog::exelog!("done");
}
