#![warn(missing_docs)]
//! A single-zone thermal environment.
//!
//! A deliberately small building model: one thermal zone with leakage to a
//! sinusoidal outdoor temperature, a heater and a cooler driven by setpoint
//! actions, and a reward that trades energy use against comfort violation.
//! It exists so the evaluation loop has a fast, deterministic environment for
//! integration tests and demos; real studies plug an external simulator into
//! [`kelvin_core::Env`] instead.
mod config;
mod env;

pub use config::ZoneEnvConfig;
pub use env::{ZoneAct, ZoneEnv, ZoneObs};
