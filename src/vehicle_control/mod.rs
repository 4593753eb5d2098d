mod drive_state;
mod outcome;
mod vehicle;

#[cfg(test)]
pub use drive_state::DriveState;
pub use vehicle::{Vehicle, VehicleSnapshot};
