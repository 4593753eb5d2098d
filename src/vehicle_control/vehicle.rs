use super::{
    drive_state::DriveState,
    outcome::{IgnoreReason, Outcome},
};
use crate::{event, warn};
use serde::Serialize;

/// State machine of a single vehicle: engine, fuel and speed.
///
/// All mutating operations are chainable and never fail. A call whose
/// precondition does not hold leaves the state as it was and records an
/// [`Outcome::Ignored`] that can be read through [`Vehicle::last_outcome`].
#[derive(Debug, Clone)]
pub struct Vehicle {
    model: String,
    fuel_level: f64,
    speed: f64,
    max_speed: u32,
    engine_running: bool,
    last_outcome: Outcome,
}

/// Serializable copy of everything the dashboard reads from a [`Vehicle`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleSnapshot {
    pub model: String,
    pub fuel_level: f64,
    pub fuel_capacity: f64,
    pub fuel_fraction: f64,
    pub speed: f64,
    pub max_speed: u32,
    pub engine_running: bool,
    pub drive_state: DriveState,
    pub fuel_critical: bool,
}

impl Vehicle {
    /// Tank size shared by every vehicle.
    pub const FUEL_CAPACITY: f64 = 50.0;
    /// Fuel burned per unit of speed gained.
    const CONSUMPTION_PER_UNIT: f64 = 0.001;
    /// Fraction of the tank below which the fuel level counts as critical.
    const CRITICAL_FUEL_FRACTION: f64 = 0.1;
    /// Speed set by `drive_off`, also the fuel-accounting delta for it.
    const DRIVE_OFF_SPEED: f64 = 1.0;

    /// Lowest accepted top speed.
    const MIN_MAX_SPEED: u32 = 1;

    /// Creates a standing vehicle with the engine off. `initial_fuel` is
    /// capped at [`Vehicle::FUEL_CAPACITY`]; values below zero (or NaN) start empty.
    /// A top speed of zero is raised to 1.
    pub fn new(name: impl Into<String>, initial_fuel: f64, max_speed: u32) -> Self {
        let model = name.into();
        let fuel_level = if initial_fuel > 0.0 { initial_fuel.min(Self::FUEL_CAPACITY) } else { 0.0 };
        if max_speed < Self::MIN_MAX_SPEED {
            warn!("{model}: max speed {max_speed} is not positive, using {}", Self::MIN_MAX_SPEED);
        }
        Self {
            model,
            fuel_level,
            speed: 0.0,
            max_speed: max_speed.max(Self::MIN_MAX_SPEED),
            engine_running: false,
            last_outcome: Outcome::Applied,
        }
    }

    pub fn model(&self) -> &str { &self.model }
    pub fn fuel_level(&self) -> f64 { self.fuel_level }
    pub fn fuel_capacity(&self) -> f64 { Self::FUEL_CAPACITY }
    pub fn speed(&self) -> f64 { self.speed }
    pub fn max_speed(&self) -> u32 { self.max_speed }
    pub fn is_engine_running(&self) -> bool { self.engine_running }
    pub fn last_outcome(&self) -> Outcome { self.last_outcome }
    pub fn drive_state(&self) -> DriveState { DriveState::derive(self.engine_running, self.speed) }

    /// True while less than a tenth of the tank is left.
    pub fn is_fuel_critical(&self) -> bool {
        self.fuel_level < Self::FUEL_CAPACITY * Self::CRITICAL_FUEL_FRACTION
    }

    pub fn snapshot(&self) -> VehicleSnapshot {
        VehicleSnapshot {
            model: self.model.clone(),
            fuel_level: self.fuel_level,
            fuel_capacity: Self::FUEL_CAPACITY,
            fuel_fraction: self.fuel_level / Self::FUEL_CAPACITY,
            speed: self.speed,
            max_speed: self.max_speed,
            engine_running: self.engine_running,
            drive_state: self.drive_state(),
            fuel_critical: self.is_fuel_critical(),
        }
    }

    pub fn start_engine(&mut self) -> &mut Self {
        if self.fuel_level > 0.0 {
            self.engine_running = true;
            event!("{}: engine started", self.model);
            self.finish(Outcome::Applied)
        } else {
            self.finish(Outcome::Ignored(IgnoreReason::NoFuel))
        }
    }

    /// Engine off, vehicle halted. Idempotent.
    pub fn stop_engine(&mut self) -> &mut Self {
        self.halt();
        event!("{}: engine stopped", self.model);
        self.finish(Outcome::Applied)
    }

    /// Adds fuel up to the tank capacity, regardless of engine state.
    pub fn refuel(&mut self, amount: f64) -> &mut Self {
        if !Self::valid_magnitude("refuel", amount) {
            return self.finish(Outcome::Ignored(IgnoreReason::InvalidMagnitude));
        }
        self.fuel_level = (self.fuel_level + amount).min(Self::FUEL_CAPACITY);
        event!("{}: refueled {amount}, tank at {:.3}", self.model, self.fuel_level);
        self.finish(Outcome::Applied)
    }

    /// Speeds up by `delta` (capped at the maximum speed) and burns fuel for it.
    pub fn accelerate(&mut self, delta: f64) -> &mut Self {
        if !Self::valid_magnitude("accelerate", delta) {
            return self.finish(Outcome::Ignored(IgnoreReason::InvalidMagnitude));
        }
        if let Some(reason) = self.drive_blocker() {
            return self.finish(Outcome::Ignored(reason));
        }
        self.speed = (self.speed + delta).min(f64::from(self.max_speed));
        self.consume(delta);
        self.finish(Outcome::Applied)
    }

    /// Slows down by `delta`, never below zero. Works with the engine off.
    pub fn brake(&mut self, delta: f64) -> &mut Self {
        if !Self::valid_magnitude("brake", delta) {
            return self.finish(Outcome::Ignored(IgnoreReason::InvalidMagnitude));
        }
        self.speed = (self.speed - delta).max(0.0);
        self.finish(Outcome::Applied)
    }

    /// Pulls away from standstill at the minimum driving speed.
    #[allow(clippy::float_cmp)]
    pub fn drive_off(&mut self) -> &mut Self {
        if let Some(reason) = self.drive_blocker() {
            return self.finish(Outcome::Ignored(reason));
        }
        if self.speed != 0.0 {
            return self.finish(Outcome::Ignored(IgnoreReason::AlreadyMoving));
        }
        self.speed = Self::DRIVE_OFF_SPEED;
        self.consume(Self::DRIVE_OFF_SPEED);
        self.finish(Outcome::Applied)
    }

    /// Horn hook. Sound and display are up to the caller.
    pub fn honk(&mut self) -> &mut Self {
        event!("{}: honk", self.model);
        self.finish(Outcome::Applied)
    }

    /// Passthrough for observers that want to look at the state mid-chain.
    pub fn report_state(&mut self) -> &mut Self {
        event!(
            "{}: {} at {:.1}/{} with {:.3}/{} fuel",
            self.model,
            self.drive_state(),
            self.speed,
            self.max_speed,
            self.fuel_level,
            Self::FUEL_CAPACITY
        );
        self
    }

    fn drive_blocker(&self) -> Option<IgnoreReason> {
        if !self.engine_running {
            Some(IgnoreReason::EngineOff)
        } else if self.fuel_level <= 0.0 {
            Some(IgnoreReason::NoFuel)
        } else {
            None
        }
    }

    /// Burns fuel proportional to `delta`. Running dry stalls the engine
    /// within the same call.
    #[allow(clippy::float_cmp)]
    fn consume(&mut self, delta: f64) {
        let consumed = Self::CONSUMPTION_PER_UNIT * delta;
        self.fuel_level = (self.fuel_level - consumed).max(0.0);
        if self.fuel_level == 0.0 {
            warn!("{}: tank empty, engine stalled", self.model);
            self.halt();
        }
    }

    fn halt(&mut self) {
        self.engine_running = false;
        self.speed = 0.0;
    }

    fn valid_magnitude(op: &str, value: f64) -> bool {
        let valid = value.is_finite() && value >= 0.0;
        if !valid {
            warn!("Ignoring {op} with invalid magnitude {value}");
        }
        valid
    }

    fn finish(&mut self, outcome: Outcome) -> &mut Self {
        if let Outcome::Ignored(reason) = outcome {
            event!("{}: operation ignored ({reason})", self.model);
        }
        self.last_outcome = outcome;
        self
    }
}
