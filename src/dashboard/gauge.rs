use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use strum_macros::Display;

/// Analog speedometer whose needle eases toward the current speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Speedometer {
    angle: f64,
}

impl Speedometer {
    /// Needle angle in degrees at zero speed.
    pub const ZERO_ANGLE: f64 = 120.0;
    /// Degrees swept between zero and the maximum speed.
    pub const SCALE_SWEEP: f64 = 240.0;
    /// Share of the remaining gap the needle covers per frame.
    const EASING: f64 = 0.2;

    pub fn new() -> Self { Self { angle: 0.0 } }

    pub fn angle(&self) -> f64 { self.angle }

    pub fn target_angle(speed: f64, max_speed: u32) -> f64 {
        let shown = speed.clamp(0.0, f64::from(max_speed));
        Self::ZERO_ANGLE + shown / f64::from(max_speed.max(1)) * Self::SCALE_SWEEP
    }

    /// Moves the needle one frame toward `speed` and returns the new angle.
    pub fn advance(&mut self, speed: f64, max_speed: u32) -> f64 {
        let target = Self::target_angle(speed, max_speed);
        self.angle += (target - self.angle) * Self::EASING;
        self.angle
    }

    /// Digital readout: whole part and the truncated first decimal.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn readout(speed: f64) -> (u32, u8) {
        let shown = speed.max(0.0);
        let whole = shown.trunc();
        (whole as u32, ((shown - whole) * 10.0) as u8)
    }

    /// Scale color band the given speed falls into.
    pub fn band(speed: f64, max_speed: u32) -> SpeedBand {
        let max = f64::from(max_speed);
        if speed <= max * SpeedBand::SAFE_FRACTION {
            SpeedBand::Safe
        } else if speed <= max * SpeedBand::ELEVATED_FRACTION {
            SpeedBand::Elevated
        } else {
            SpeedBand::Danger
        }
    }
}

impl Default for Speedometer {
    fn default() -> Self { Self::new() }
}

/// Color band of the speedometer scale: lime, yellow, red.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SpeedBand {
    Safe,
    Elevated,
    Danger,
}

impl SpeedBand {
    /// Upper end of the safe band as a fraction of the top speed.
    const SAFE_FRACTION: f64 = 0.55;
    const ELEVATED_FRACTION: f64 = 0.75;
}

/// Color band of the large tank display.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FuelLevel {
    Empty,
    Critical,
    Medium,
    Full,
}

pub struct FuelGauge;

impl FuelGauge {
    pub fn level(fraction: f64) -> FuelLevel {
        if fraction < 0.1 {
            FuelLevel::Empty
        } else if fraction < 0.25 {
            FuelLevel::Critical
        } else if fraction < 0.5 {
            FuelLevel::Medium
        } else {
            FuelLevel::Full
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percent(fraction: f64) -> u8 { (fraction.clamp(0.0, 1.0) * 100.0).round() as u8 }
}

/// Short-lived status text, such as the horn indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    text: &'static str,
    expires_at: DateTime<Utc>,
}

impl Notice {
    pub const HONK_TEXT: &'static str = "HONK!";
    pub const HONK_DURATION: TimeDelta = TimeDelta::milliseconds(1200);
    pub const TANK_FULL_TEXT: &'static str = "Tank full!";
    pub const TANK_FULL_DURATION: TimeDelta = TimeDelta::seconds(2);

    pub fn new(text: &'static str, duration: TimeDelta, now: DateTime<Utc>) -> Self {
        Self { text, expires_at: now + duration }
    }

    pub fn honk(now: DateTime<Utc>) -> Self { Self::new(Self::HONK_TEXT, Self::HONK_DURATION, now) }

    pub fn tank_full(now: DateTime<Utc>) -> Self {
        Self::new(Self::TANK_FULL_TEXT, Self::TANK_FULL_DURATION, now)
    }

    pub fn text(&self) -> &'static str { self.text }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool { now < self.expires_at }
}
