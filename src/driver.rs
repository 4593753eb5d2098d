use crate::vehicle_control::Vehicle;
use crate::{info, log};

/// Scripted demonstration of the chainable vehicle interface.
pub struct Driver {
    vehicle: Vehicle,
}

impl Driver {
    pub fn new(vehicle: Vehicle) -> Self { Self { vehicle } }

    /// The demo car: nearly empty, 200 km/h top speed.
    pub fn demo() -> Self { Self::new(Vehicle::new("VW Golf", 5.0, 200)) }

    pub fn vehicle(&self) -> &Vehicle { &self.vehicle }

    /// Normal drive: top up, start, pull away, speed up, slow down, honk.
    pub fn city_drive(&mut self) -> &mut Self {
        info!("Scenario 1: city drive with refuel");
        Self::report(self.vehicle.report_state());
        self.vehicle
            .refuel(20.0)
            .start_engine()
            .drive_off()
            .accelerate(50.0)
            .brake(20.0)
            .honk();
        Self::report(self.vehicle.report_state());
        self
    }

    /// Stress run: near top speed, hard stop, engine off.
    pub fn full_stop(&mut self) -> &mut Self {
        info!("Scenario 2: high speed and full stop");
        self.vehicle.accelerate(150.0);
        Self::report(self.vehicle.report_state());
        self.vehicle.brake(180.0).stop_engine();
        Self::report(self.vehicle.report_state());
        self
    }

    fn report(vehicle: &Vehicle) {
        log!(
            "{} [{}] speed {:.1}/{} km/h, fuel {:.3}/{:.1}{}, last op {}",
            vehicle.model(),
            vehicle.drive_state(),
            vehicle.speed(),
            vehicle.max_speed(),
            vehicle.fuel_level(),
            vehicle.fuel_capacity(),
            if vehicle.is_fuel_critical() { " (critical)" } else { "" },
            vehicle.last_outcome()
        );
    }
}
