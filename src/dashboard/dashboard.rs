use super::{
    command::DashCommand,
    gauge::{FuelGauge, FuelLevel, Notice, SpeedBand, Speedometer},
};
use crate::vehicle_control::{Vehicle, VehicleSnapshot};
use crate::{error, event, frame, info, log, warn};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;
use strum::IntoEnumIterator;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
    time::MissedTickBehavior,
};
use tokio_util::sync::CancellationToken;

/// Headless on-board dashboard.
///
/// The dashboard is the only writer of its [`Vehicle`]: commands are queued
/// through a channel and applied one at a time by [`Dashboard::run`], in
/// between the refresh ticks that apply ambient deceleration and render a frame.
pub struct Dashboard {
    vehicle: Vehicle,
    speedometer: Speedometer,
    notice: Option<Notice>,
    json_output: bool,
}

/// Everything shown on screen for one refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashFrame {
    pub vehicle: VehicleSnapshot,
    pub needle_angle: f64,
    pub speed_readout: (u32, u8),
    pub speed_band: SpeedBand,
    pub fuel_percent: u8,
    pub fuel_level: FuelLevel,
    pub fuel_warning: bool,
    pub notice: Option<&'static str>,
}

impl Dashboard {
    /// Speed above which a running vehicle coasts down between commands.
    const COAST_THRESHOLD: f64 = 10.0;
    /// Deceleration applied per tick while coasting.
    const COAST_DECAY: f64 = 0.2;
    /// Capacity of the command queue.
    pub const COMMAND_BUFFER: usize = 32;

    pub fn new(vehicle: Vehicle, json_output: bool) -> Self {
        Self { vehicle, speedometer: Speedometer::new(), notice: None, json_output }
    }

    pub fn vehicle(&self) -> &Vehicle { &self.vehicle }

    pub fn notice(&self) -> Option<&Notice> { self.notice.as_ref() }

    /// Forwards a user command into the vehicle. Returns `false` on `Quit`.
    #[allow(clippy::float_cmp)]
    pub fn handle(&mut self, cmd: DashCommand, now: DateTime<Utc>) -> bool {
        if cmd == DashCommand::Quit {
            return false;
        }
        let fuel_before = self.vehicle.fuel_level();
        cmd.apply(&mut self.vehicle);
        let outcome = self.vehicle.last_outcome();
        if outcome.is_applied() {
            event!("Command {cmd} applied");
        } else {
            log!("Command {cmd} ignored: {outcome}");
        }
        match cmd {
            DashCommand::Honk => self.notice = Some(Notice::honk(now)),
            DashCommand::Refuel => {
                let capacity = self.vehicle.fuel_capacity();
                if self.vehicle.fuel_level() == capacity && fuel_before < capacity {
                    self.notice = Some(Notice::tank_full(now));
                }
            }
            _ => {}
        }
        true
    }

    /// One refresh step: ambient coasting, needle easing, notice expiry.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        if self.vehicle.is_engine_running() && self.vehicle.speed() > Self::COAST_THRESHOLD {
            self.vehicle.brake(Self::COAST_DECAY);
        }
        self.speedometer.advance(self.vehicle.speed(), self.vehicle.max_speed());
        if self.notice.as_ref().is_some_and(|n| !n.is_active(now)) {
            self.notice = None;
        }
    }

    pub fn frame(&self) -> DashFrame {
        let vehicle = self.vehicle.snapshot();
        DashFrame {
            needle_angle: self.speedometer.angle(),
            speed_readout: Speedometer::readout(vehicle.speed),
            speed_band: Speedometer::band(vehicle.speed, vehicle.max_speed),
            fuel_percent: FuelGauge::percent(vehicle.fuel_fraction),
            fuel_level: FuelGauge::level(vehicle.fuel_fraction),
            fuel_warning: vehicle.fuel_critical,
            notice: self.notice().map(Notice::text),
            vehicle,
        }
    }

    /// Renders a frame as one status line, or as JSON when configured.
    pub fn render(&self, dash_frame: &DashFrame) -> Result<String, serde_json::Error> {
        if self.json_output {
            return serde_json::to_string(dash_frame);
        }
        let (whole, tenth) = dash_frame.speed_readout;
        Ok(format!(
            "[{}] {:>3}.{} km/h / {} ({}) | needle {:6.1}° | engine {} | fuel {:>3}% ({}){} | {}",
            dash_frame.vehicle.model,
            whole,
            tenth,
            dash_frame.vehicle.max_speed,
            dash_frame.speed_band,
            dash_frame.needle_angle,
            if dash_frame.vehicle.engine_running { "on " } else { "off" },
            dash_frame.fuel_percent,
            dash_frame.fuel_level,
            if dash_frame.fuel_warning { " LOW" } else { "" },
            dash_frame.notice.unwrap_or("")
        ))
    }

    /// Drives the dashboard until `Quit`, a closed command channel or
    /// cancellation. Returns the vehicle in its final state.
    pub async fn run(
        mut self,
        mut commands: mpsc::Receiver<DashCommand>,
        refresh: Duration,
        cancel: CancellationToken,
    ) -> Vehicle {
        let mut ticker = tokio::time::interval(refresh);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!("Dashboard online for {}, refreshing every {}ms", self.vehicle().model(), refresh.as_millis());
        loop {
            tokio::select! {
                () = cancel.cancelled() => break,
                received = commands.recv() => {
                    let Some(cmd) = received else { break };
                    if !self.handle(cmd, Utc::now()) {
                        break;
                    }
                    self.emit();
                }
                _ = ticker.tick() => {
                    self.tick(Utc::now());
                    self.emit();
                }
            }
        }
        info!("Dashboard shutting down");
        self.vehicle
    }

    fn emit(&self) {
        match self.render(&self.frame()) {
            Ok(line) => frame!("{line}"),
            Err(e) => error!("Failed to render frame: {e}"),
        }
    }

    /// Reads commands line by line from stdin and queues them for the dashboard.
    pub async fn read_console(tx: mpsc::Sender<DashCommand>, cancel: CancellationToken) {
        let keywords: Vec<&str> = DashCommand::iter().map(DashCommand::keyword).collect();
        info!("Commands: {}", keywords.join(", "));
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            let read = tokio::select! {
                () = cancel.cancelled() => return,
                read = lines.next_line() => read,
            };
            match read {
                Ok(Some(line)) if line.trim().is_empty() => {}
                Ok(Some(line)) => match DashCommand::parse(&line) {
                    Some(cmd) => {
                        if tx.send(cmd).await.is_err() || cmd == DashCommand::Quit {
                            return;
                        }
                    }
                    None => warn!("Unknown command '{}', expected one of: {}", line.trim(), keywords.join(", ")),
                },
                Ok(None) => {
                    let _ = tx.send(DashCommand::Quit).await;
                    return;
                }
                Err(e) => {
                    error!("Failed to read console input: {e}");
                    return;
                }
            }
        }
    }
}
