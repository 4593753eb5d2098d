#![allow(clippy::similar_names)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
mod config;
mod dashboard;
mod driver;
mod logger;
mod vehicle_control;

use crate::config::{Config, RunMode};
use crate::dashboard::Dashboard;
use crate::driver::Driver;
use crate::vehicle_control::Vehicle;
use std::env;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() {
    let mode = env::args().nth(1).map_or(RunMode::Dashboard, |arg| RunMode::from(arg.as_str()));
    info!("Starting in {mode} mode");

    match mode {
        RunMode::Demo => {
            let mut driver = Driver::demo();
            let vehicle = driver.city_drive().full_stop().vehicle();
            info!("Demo finished in state {}", vehicle.drive_state());
        }
        RunMode::Dashboard => {
            let config = Config::from_env().unwrap_or_else(|e| fatal!("Invalid configuration: {e}"));
            run_dashboard(&config).await;
        }
    }
}

async fn run_dashboard(config: &Config) {
    let vehicle = Vehicle::new(config.model(), config.initial_fuel(), config.max_speed());
    let dashboard = Dashboard::new(vehicle, config.json_output());
    let (tx, rx) = mpsc::channel(Dashboard::COMMAND_BUFFER);
    let cancel = CancellationToken::new();

    let console_cancel = cancel.clone();
    tokio::spawn(async move {
        Dashboard::read_console(tx, console_cancel).await;
    });

    let parked = dashboard.run(rx, config.refresh_interval(), cancel.clone()).await;
    cancel.cancel();
    info!(
        "Final state of {}: {} at {:.1} km/h, {:.3} fuel left",
        parked.model(),
        parked.drive_state(),
        parked.speed(),
        parked.fuel_level()
    );
}
