use super::{
    command::DashCommand,
    dashboard::Dashboard,
    gauge::{FuelGauge, FuelLevel, Notice, SpeedBand, Speedometer},
};
use crate::vehicle_control::{DriveState, Vehicle};
use chrono::{TimeDelta, Utc};
use std::time::Duration;
use strum::IntoEnumIterator;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

const EPS: f64 = 1e-9;

fn dashboard(fuel: f64) -> Dashboard { Dashboard::new(Vehicle::new("VW Golf", fuel, 220), false) }

#[test]
fn test_command_keywords_parse_back() {
    for cmd in DashCommand::iter() {
        assert_eq!(DashCommand::parse(cmd.keyword()), Some(cmd));
    }
    assert_eq!(DashCommand::parse("  GAS \n"), Some(DashCommand::Accelerate));
    assert_eq!(DashCommand::parse("exit"), Some(DashCommand::Quit));
    assert_eq!(DashCommand::parse("warp"), None);
}

#[test]
fn test_button_steps() {
    let mut dash = dashboard(10.0);
    let now = Utc::now();
    for cmd in [DashCommand::StartEngine, DashCommand::DriveOff, DashCommand::Accelerate] {
        assert!(dash.handle(cmd, now));
    }
    assert!((dash.vehicle().speed() - 31.0).abs() < EPS);
    dash.handle(DashCommand::Brake, now);
    assert!((dash.vehicle().speed() - 11.0).abs() < EPS);
    dash.handle(DashCommand::Refuel, now);
    assert!((dash.vehicle().fuel_level() - (20.0 - 0.031)).abs() < EPS);
    assert!(!dash.handle(DashCommand::Quit, now));
}

#[test]
fn test_toggle_engine() {
    let mut dash = dashboard(10.0);
    let now = Utc::now();
    dash.handle(DashCommand::ToggleEngine, now);
    assert!(dash.vehicle().is_engine_running());
    dash.handle(DashCommand::DriveOff, now);
    dash.handle(DashCommand::ToggleEngine, now);
    assert_eq!(dash.vehicle().drive_state(), DriveState::Idle);

    let mut empty = dashboard(0.0);
    empty.handle(DashCommand::ToggleEngine, now);
    assert!(!empty.vehicle().is_engine_running());
}

#[test]
fn test_ambient_coasting() {
    let mut dash = dashboard(10.0);
    let now = Utc::now();
    dash.handle(DashCommand::StartEngine, now);
    dash.handle(DashCommand::DriveOff, now);
    dash.tick(now);
    assert!((dash.vehicle().speed() - 1.0).abs() < EPS);

    dash.handle(DashCommand::Accelerate, now);
    for _ in 0..5 {
        dash.tick(now);
    }
    assert!((dash.vehicle().speed() - 30.0).abs() < 1e-6);
}

#[test]
#[allow(clippy::float_cmp)]
fn test_coasting_threshold() {
    // top speed 10 caps the vehicle at exactly the threshold
    let mut capped = Dashboard::new(Vehicle::new("Kart", 10.0, 10), false);
    let now = Utc::now();
    capped.handle(DashCommand::StartEngine, now);
    capped.handle(DashCommand::Accelerate, now);
    assert_eq!(capped.vehicle().speed(), 10.0);
    capped.tick(now);
    assert_eq!(capped.vehicle().speed(), 10.0);

    let mut dash = Dashboard::new(Vehicle::new("Kart", 10.0, 11), false);
    dash.handle(DashCommand::StartEngine, now);
    dash.handle(DashCommand::Accelerate, now);
    assert_eq!(dash.vehicle().speed(), 11.0);
    dash.tick(now);
    assert!((dash.vehicle().speed() - 10.8).abs() < EPS);
}

#[test]
fn test_no_coasting_with_engine_off() {
    let mut dash = dashboard(10.0);
    let now = Utc::now();
    dash.tick(now);
    assert!(dash.vehicle().speed().abs() < EPS);
    assert!(!dash.vehicle().is_engine_running());
}

#[test]
fn test_honk_notice_expires() {
    let mut dash = dashboard(10.0);
    let now = Utc::now();
    dash.handle(DashCommand::Honk, now);
    assert_eq!(dash.frame().notice, Some(Notice::HONK_TEXT));
    dash.tick(now + TimeDelta::milliseconds(1100));
    assert!(dash.notice().is_some());
    dash.tick(now + TimeDelta::milliseconds(1200));
    assert!(dash.notice().is_none());
}

#[test]
fn test_tank_full_notice() {
    let mut dash = dashboard(45.0);
    let now = Utc::now();
    dash.handle(DashCommand::Refuel, now);
    assert_eq!(dash.notice().map(Notice::text), Some(Notice::TANK_FULL_TEXT));
    dash.tick(now + TimeDelta::seconds(2));
    assert!(dash.notice().is_none());

    // already full: no notice
    dash.handle(DashCommand::Refuel, now);
    assert!(dash.notice().is_none());
}

#[test]
fn test_speedometer_easing() {
    let mut meter = Speedometer::new();
    assert!(meter.angle().abs() < EPS);
    let first = meter.advance(0.0, 200);
    assert!((first - 24.0).abs() < EPS);
    for _ in 0..200 {
        meter.advance(100.0, 200);
    }
    assert!((meter.angle() - 240.0).abs() < 1e-6);
    assert!((Speedometer::target_angle(500.0, 200) - 360.0).abs() < EPS);
}

#[test]
fn test_speed_readout() {
    assert_eq!(Speedometer::readout(31.0), (31, 0));
    assert_eq!(Speedometer::readout(30.85), (30, 8));
    assert_eq!(Speedometer::readout(0.0), (0, 0));
}

#[test]
fn test_speed_bands() {
    assert_eq!(Speedometer::band(0.0, 200), SpeedBand::Safe);
    assert_eq!(Speedometer::band(110.0, 200), SpeedBand::Safe);
    assert_eq!(Speedometer::band(110.5, 200), SpeedBand::Elevated);
    assert_eq!(Speedometer::band(150.0, 200), SpeedBand::Elevated);
    assert_eq!(Speedometer::band(151.0, 200), SpeedBand::Danger);
    assert_eq!(Speedometer::band(200.0, 200), SpeedBand::Danger);
}

#[test]
fn test_fuel_gauge_bands() {
    assert_eq!(FuelGauge::level(0.05), FuelLevel::Empty);
    assert_eq!(FuelGauge::level(0.1), FuelLevel::Critical);
    assert_eq!(FuelGauge::level(0.3), FuelLevel::Medium);
    assert_eq!(FuelGauge::level(0.5), FuelLevel::Full);
    assert_eq!(FuelGauge::percent(0.499), 50);
    assert_eq!(FuelGauge::percent(1.0), 100);
}

#[test]
fn test_render_text_and_json() {
    let mut dash = dashboard(4.0);
    dash.handle(DashCommand::StartEngine, Utc::now());
    let line = dash.render(&dash.frame()).unwrap();
    assert!(line.starts_with("[VW Golf]"));
    assert!(line.contains("engine on"));
    assert!(line.contains("/ 220 (safe)"));
    assert!(line.contains("(empty) LOW"));

    let json_dash = Dashboard::new(Vehicle::new("VW Golf", 30.0, 200), true);
    let json = json_dash.render(&json_dash.frame()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["vehicle"]["model"], "VW Golf");
    assert_eq!(value["vehicle"]["drive_state"], "idle");
    assert_eq!(value["fuel_level"], "full");
    assert_eq!(value["speed_band"], "safe");
    assert_eq!(value["fuel_percent"], 60);
    assert_eq!(value["notice"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_run_applies_queued_commands() {
    let (tx, rx) = mpsc::channel(Dashboard::COMMAND_BUFFER);
    for cmd in [
        DashCommand::StartEngine,
        DashCommand::DriveOff,
        DashCommand::Accelerate,
        DashCommand::Quit,
        DashCommand::StopEngine,
    ] {
        tx.send(cmd).await.unwrap();
    }
    let vehicle = dashboard(10.0)
        .run(rx, Duration::from_secs(3600), CancellationToken::new())
        .await;
    assert!(vehicle.is_engine_running());
    assert!(vehicle.speed() <= 31.0 && vehicle.speed() >= 30.8 - EPS);
}

#[tokio::test]
async fn test_run_stops_on_cancel_and_closed_channel() {
    let (_tx, rx) = mpsc::channel(Dashboard::COMMAND_BUFFER);
    let cancel = CancellationToken::new();
    cancel.cancel();
    let vehicle = dashboard(10.0).run(rx, Duration::from_secs(3600), cancel).await;
    assert_eq!(vehicle.drive_state(), DriveState::Idle);

    let (tx, rx) = mpsc::channel(Dashboard::COMMAND_BUFFER);
    tx.send(DashCommand::StartEngine).await.unwrap();
    drop(tx);
    let vehicle = dashboard(10.0)
        .run(rx, Duration::from_secs(3600), CancellationToken::new())
        .await;
    assert!(vehicle.is_engine_running());
}
