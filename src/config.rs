use std::{env, time::Duration};
use strum_macros::Display;

/// Run mode picked from the first command line argument.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Display)]
pub enum RunMode {
    Dashboard,
    Demo,
}

impl From<&str> for RunMode {
    fn from(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "demo" => RunMode::Demo,
            _ => RunMode::Dashboard,
        }
    }
}

#[derive(Debug, PartialEq, Display)]
pub enum ConfigError {
    #[strum(to_string = "InvalidNumber: {var} = {value}")]
    InvalidNumber { var: &'static str, value: String },
    NonPositiveMaxSpeed,
    ZeroRefreshInterval,
}

/// Startup settings, read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    model: String,
    initial_fuel: f64,
    max_speed: u32,
    refresh_interval: Duration,
    json_output: bool,
}

impl Config {
    const MODEL_VAR: &'static str = "VEHICLE_MODEL";
    const FUEL_VAR: &'static str = "VEHICLE_INITIAL_FUEL";
    const MAX_SPEED_VAR: &'static str = "VEHICLE_MAX_SPEED";
    const REFRESH_VAR: &'static str = "DASH_REFRESH_MS";
    const JSON_VAR: &'static str = "DASH_JSON";

    const DEFAULT_MODEL: &'static str = "VW Golf";
    const DEFAULT_FUEL: f64 = 10.0;
    const DEFAULT_MAX_SPEED: u32 = 220;
    const DEFAULT_REFRESH_MS: u64 = 100;

    pub fn from_env() -> Result<Self, ConfigError> { Self::from_lookup(|key| env::var(key).ok()) }

    /// Builds the config from an arbitrary key lookup, unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where F: Fn(&'static str) -> Option<String> {
        let model = lookup(Self::MODEL_VAR).unwrap_or_else(|| Self::DEFAULT_MODEL.to_string());
        let initial_fuel = Self::parse(&lookup, Self::FUEL_VAR)?.unwrap_or(Self::DEFAULT_FUEL);
        let max_speed = Self::parse(&lookup, Self::MAX_SPEED_VAR)?.unwrap_or(Self::DEFAULT_MAX_SPEED);
        if max_speed == 0 {
            return Err(ConfigError::NonPositiveMaxSpeed);
        }
        let refresh_ms = Self::parse(&lookup, Self::REFRESH_VAR)?.unwrap_or(Self::DEFAULT_REFRESH_MS);
        if refresh_ms == 0 {
            return Err(ConfigError::ZeroRefreshInterval);
        }
        Ok(Self {
            model,
            initial_fuel,
            max_speed,
            refresh_interval: Duration::from_millis(refresh_ms),
            json_output: lookup(Self::JSON_VAR).is_some(),
        })
    }

    fn parse<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
        T: std::str::FromStr,
    {
        match lookup(var) {
            None => Ok(None),
            Some(raw) => raw
                .trim()
                .parse::<T>()
                .map(Some)
                .map_err(|_| ConfigError::InvalidNumber { var, value: raw }),
        }
    }

    pub fn model(&self) -> &str { &self.model }
    pub fn initial_fuel(&self) -> f64 { self.initial_fuel }
    pub fn max_speed(&self) -> u32 { self.max_speed }
    pub fn refresh_interval(&self) -> Duration { self.refresh_interval }
    pub fn json_output(&self) -> bool { self.json_output }
}
