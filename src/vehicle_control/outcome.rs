use std::fmt;
use strum_macros::Display;

/// Why an operation left the vehicle untouched.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Display)]
pub enum IgnoreReason {
    /// The tank is empty.
    NoFuel,
    /// The operation needs a running engine.
    EngineOff,
    /// Driving off requires a standing vehicle.
    AlreadyMoving,
    /// Negative, NaN or infinite amount or delta.
    InvalidMagnitude,
}

/// Result tag of the most recent vehicle operation.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Outcome {
    Applied,
    Ignored(IgnoreReason),
}

impl Outcome {
    pub fn is_applied(self) -> bool { matches!(self, Outcome::Applied) }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Applied => write!(f, "Applied"),
            Outcome::Ignored(reason) => write!(f, "Ignored({reason})"),
        }
    }
}
