//! Configuration of [`ZoneEnv`](crate::ZoneEnv).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`ZoneEnv`](crate::ZoneEnv).
///
/// Defaults describe a mildly leaky zone over three simulated days at a
/// 15-minute control interval.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct ZoneEnvConfig {
    /// Steps per episode; the environment terminates after this many.
    pub horizon_steps: usize,

    /// Control interval in minutes.
    pub step_minutes: f64,

    /// Lower edge of the comfort band.
    pub comfort_low_c: f64,

    /// Upper edge of the comfort band.
    pub comfort_high_c: f64,

    /// Daily mean outdoor temperature.
    pub outdoor_mean_c: f64,

    /// Amplitude of the diurnal outdoor cycle.
    pub outdoor_swing_c: f64,

    /// Half-width of the uniform noise on the outdoor temperature.
    pub weather_noise_c: f64,

    /// Fraction of the indoor-outdoor gap closed per hour by leakage.
    pub leakage_per_hour: f64,

    /// Maximum heating power.
    pub heating_power_kw: f64,

    /// Maximum cooling power.
    pub cooling_power_kw: f64,

    /// Proportional thermostat gain, kW per degree of setpoint error.
    pub thermostat_gain_kw_per_c: f64,

    /// Zone temperature change per kWh delivered or removed.
    pub thermal_gain_c_per_kwh: f64,

    /// Reward weight on energy use, per kWh.
    pub energy_weight: f64,

    /// Reward weight on comfort violation, per degree-hour.
    pub comfort_weight: f64,
}

impl Default for ZoneEnvConfig {
    fn default() -> Self {
        Self {
            horizon_steps: 288,
            step_minutes: 15.0,
            comfort_low_c: 20.0,
            comfort_high_c: 23.5,
            outdoor_mean_c: 10.0,
            outdoor_swing_c: 8.0,
            weather_noise_c: 0.5,
            leakage_per_hour: 0.3,
            heating_power_kw: 8.0,
            cooling_power_kw: 6.0,
            thermostat_gain_kw_per_c: 4.0,
            thermal_gain_c_per_kwh: 0.8,
            energy_weight: 0.1,
            comfort_weight: 1.0,
        }
    }
}

impl ZoneEnvConfig {
    /// Sets the episode horizon.
    pub fn horizon_steps(mut self, v: usize) -> Self {
        self.horizon_steps = v;
        self
    }

    /// Sets the control interval.
    pub fn step_minutes(mut self, v: f64) -> Self {
        self.step_minutes = v;
        self
    }

    /// Sets the comfort band.
    pub fn comfort_band_c(mut self, low: f64, high: f64) -> Self {
        self.comfort_low_c = low;
        self.comfort_high_c = high;
        self
    }

    /// Constructs [`ZoneEnvConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`ZoneEnvConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
