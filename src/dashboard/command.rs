use crate::vehicle_control::Vehicle;
use strum_macros::{Display, EnumIter};

/// Discrete user commands the dashboard forwards into the vehicle.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Display, EnumIter)]
pub enum DashCommand {
    StartEngine,
    StopEngine,
    ToggleEngine,
    DriveOff,
    Accelerate,
    Brake,
    Refuel,
    Honk,
    Quit,
}

impl DashCommand {
    const ACCELERATE_STEP: f64 = 30.0;
    const BRAKE_STEP: f64 = 20.0;
    const REFUEL_STEP: f64 = 10.0;

    /// Parses a console line, `None` for anything unknown.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_lowercase().as_str() {
            "start" => Some(DashCommand::StartEngine),
            "stop" => Some(DashCommand::StopEngine),
            "engine" => Some(DashCommand::ToggleEngine),
            "go" => Some(DashCommand::DriveOff),
            "gas" => Some(DashCommand::Accelerate),
            "brake" => Some(DashCommand::Brake),
            "fuel" => Some(DashCommand::Refuel),
            "honk" => Some(DashCommand::Honk),
            "quit" | "exit" => Some(DashCommand::Quit),
            _ => None,
        }
    }

    /// Console keyword for this command.
    pub fn keyword(self) -> &'static str {
        match self {
            DashCommand::StartEngine => "start",
            DashCommand::StopEngine => "stop",
            DashCommand::ToggleEngine => "engine",
            DashCommand::DriveOff => "go",
            DashCommand::Accelerate => "gas",
            DashCommand::Brake => "brake",
            DashCommand::Refuel => "fuel",
            DashCommand::Honk => "honk",
            DashCommand::Quit => "quit",
        }
    }

    /// Applies the command to `vehicle`. `Quit` is handled by the dashboard loop.
    pub fn apply(self, vehicle: &mut Vehicle) {
        match self {
            DashCommand::StartEngine => {
                vehicle.start_engine();
            }
            DashCommand::StopEngine => {
                vehicle.stop_engine();
            }
            DashCommand::ToggleEngine => {
                if vehicle.is_engine_running() {
                    vehicle.stop_engine();
                } else {
                    vehicle.start_engine();
                }
            }
            DashCommand::DriveOff => {
                vehicle.drive_off();
            }
            DashCommand::Accelerate => {
                vehicle.accelerate(Self::ACCELERATE_STEP);
            }
            DashCommand::Brake => {
                vehicle.brake(Self::BRAKE_STEP);
            }
            DashCommand::Refuel => {
                vehicle.refuel(Self::REFUEL_STEP);
            }
            DashCommand::Honk => {
                vehicle.honk();
            }
            DashCommand::Quit => {}
        }
    }
}
