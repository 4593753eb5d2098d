use serde::Serialize;
use strum_macros::{Display, EnumIter};

/// Coarse operating state derived from the engine flag and the current speed.
///
/// Engine off while moving is unreachable, so three states cover every
/// vehicle the state machine can produce.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Display, EnumIter, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DriveState {
    Idle,
    RunningStationary,
    RunningMoving,
}

impl DriveState {
    /// Derives the state from the raw engine flag and speed.
    pub fn derive(engine_running: bool, speed: f64) -> Self {
        match (engine_running, speed > 0.0) {
            (false, _) => DriveState::Idle,
            (true, false) => DriveState::RunningStationary,
            (true, true) => DriveState::RunningMoving,
        }
    }
}

impl From<&str> for DriveState {
    fn from(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "running_stationary" => DriveState::RunningStationary,
            "running_moving" => DriveState::RunningMoving,
            _ => DriveState::Idle,
        }
    }
}
