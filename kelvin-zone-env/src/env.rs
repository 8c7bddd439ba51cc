//! The environment itself.
use crate::config::ZoneEnvConfig;
use anyhow::{ensure, Result};
use kelvin_core::{Act, Env, EnvStep, Info, Obs, EPISODE_METRICS_KEY};
use log::{debug, info};
use ndarray::Array1;
use std::collections::BTreeMap;
use std::f64::consts::TAU;

/// Observation: `[indoor_temp_c, outdoor_temp_c, sin(hour), cos(hour)]`.
#[derive(Clone, Debug)]
pub struct ZoneObs(Array1<f64>);

impl Obs for ZoneObs {}

impl AsRef<[f64]> for ZoneObs {
    fn as_ref(&self) -> &[f64] {
        self.0.as_slice().expect("1-d observation is contiguous")
    }
}

/// Action: `[heating_setpoint_c, cooling_setpoint_c]`.
#[derive(Clone, Debug)]
pub struct ZoneAct(Array1<f64>);

impl Act for ZoneAct {}

impl From<Vec<f64>> for ZoneAct {
    fn from(v: Vec<f64>) -> Self {
        Self(Array1::from(v))
    }
}

impl ZoneAct {
    /// Builds an action from explicit setpoints.
    pub fn new(heating_setpoint_c: f64, cooling_setpoint_c: f64) -> Self {
        Self(Array1::from(vec![heating_setpoint_c, cooling_setpoint_c]))
    }
}

/// A single thermal zone with leakage, a heater, a cooler, and a diurnal
/// outdoor temperature.
///
/// The zone follows a first-order model: each control interval, leakage pulls
/// the indoor temperature toward outdoors while the heater and cooler push it
/// toward the commanded setpoints under a proportional thermostat. Reward is
/// the negated weighted sum of energy use and comfort violation. The episode
/// terminates after the configured horizon; the environment never truncates.
///
/// The weather noise stream is seeded on the first reset (from the build
/// seed, or from an explicit reset seed) and continues across unseeded
/// resets, so episodes within one seed group see different weather.
pub struct ZoneEnv {
    config: ZoneEnvConfig,
    rng: fastrand::Rng,
    initial_seed: Option<u64>,
    closed: bool,

    step_count: usize,
    indoor_c: f64,

    energy_kwh: f64,
    violation_hours: f64,
    indoor_sum_c: f64,
}

impl ZoneEnv {
    const SETPOINT_MIN_C: f64 = 10.0;
    const SETPOINT_MAX_C: f64 = 35.0;
    const INDOOR_START_C: f64 = 21.0;

    fn dt_hours(&self) -> f64 {
        self.config.step_minutes / 60.0
    }

    fn hour_of_day(&self) -> f64 {
        (self.step_count as f64 * self.config.step_minutes / 60.0) % 24.0
    }

    fn outdoor_c(&mut self) -> f64 {
        let phase = TAU * self.hour_of_day() / 24.0;
        let noise = (self.rng.f64() * 2.0 - 1.0) * self.config.weather_noise_c;
        // coldest at midnight, warmest at noon
        self.config.outdoor_mean_c - self.config.outdoor_swing_c * phase.cos() + noise
    }

    fn observation(&self, outdoor_c: f64) -> ZoneObs {
        let phase = TAU * self.hour_of_day() / 24.0;
        ZoneObs(Array1::from(vec![
            self.indoor_c,
            outdoor_c,
            phase.sin(),
            phase.cos(),
        ]))
    }

    fn comfort_violation_c(&self) -> f64 {
        (self.config.comfort_low_c - self.indoor_c)
            .max(self.indoor_c - self.config.comfort_high_c)
            .max(0.0)
    }
}

impl Env for ZoneEnv {
    type Config = ZoneEnvConfig;
    type Obs = ZoneObs;
    type Act = ZoneAct;

    fn build(config: &Self::Config, seed: u64) -> Result<Self> {
        ensure!(config.horizon_steps > 0, "horizon must be positive");
        ensure!(config.step_minutes > 0.0, "control interval must be positive");
        Ok(Self {
            config: config.clone(),
            rng: fastrand::Rng::with_seed(seed),
            initial_seed: Some(seed),
            closed: false,
            step_count: 0,
            indoor_c: Self::INDOOR_START_C,
            energy_kwh: 0.0,
            violation_hours: 0.0,
            indoor_sum_c: 0.0,
        })
    }

    fn reset(&mut self, seed: Option<u64>) -> Result<Self::Obs> {
        ensure!(!self.closed, "environment is closed");
        // the build seed backs only the first reset, however that reset is
        // seeded
        let stored = self.initial_seed.take();
        match seed.or(stored) {
            Some(s) => {
                debug!("resetting zone with seed {}", s);
                self.rng = fastrand::Rng::with_seed(s);
            }
            None => debug!("resetting zone, weather stream continues"),
        }
        self.step_count = 0;
        self.indoor_c = Self::INDOOR_START_C;
        self.energy_kwh = 0.0;
        self.violation_hours = 0.0;
        self.indoor_sum_c = 0.0;
        let outdoor = self.outdoor_c();
        Ok(self.observation(outdoor))
    }

    fn step(&mut self, act: &Self::Act) -> Result<EnvStep<Self>> {
        ensure!(!self.closed, "environment is closed");
        ensure!(
            act.0.len() == 2,
            "expected [heating_setpoint, cooling_setpoint], got {} values",
            act.0.len()
        );
        let dt_h = self.dt_hours();
        let heat_sp = act.0[0].max(Self::SETPOINT_MIN_C).min(Self::SETPOINT_MAX_C);
        let cool_sp = act.0[1].max(Self::SETPOINT_MIN_C).min(Self::SETPOINT_MAX_C);

        let outdoor = self.outdoor_c();

        // proportional thermostat against each setpoint
        let heat_kw = ((heat_sp - self.indoor_c) * self.config.thermostat_gain_kw_per_c)
            .max(0.0)
            .min(self.config.heating_power_kw);
        let cool_kw = ((self.indoor_c - cool_sp) * self.config.thermostat_gain_kw_per_c)
            .max(0.0)
            .min(self.config.cooling_power_kw);

        let step_energy_kwh = (heat_kw + cool_kw) * dt_h;
        self.indoor_c += dt_h * self.config.leakage_per_hour * (outdoor - self.indoor_c)
            + (heat_kw - cool_kw) * dt_h * self.config.thermal_gain_c_per_kwh;

        self.step_count += 1;
        let violation_c = self.comfort_violation_c();
        if violation_c > 0.0 {
            self.violation_hours += dt_h;
        }
        self.energy_kwh += step_energy_kwh;
        self.indoor_sum_c += self.indoor_c;

        let reward = -(self.config.energy_weight * step_energy_kwh
            + self.config.comfort_weight * violation_c * dt_h);

        let mut info = Info::empty();
        info.insert_scalar("indoor_temp_c", self.indoor_c);
        info.insert_scalar("outdoor_temp_c", outdoor);
        info.insert_scalar("hvac_power_kw", heat_kw + cool_kw);
        info.insert_scalar("comfort_violation_c", violation_c);

        let terminated = self.step_count >= self.config.horizon_steps;
        if terminated {
            let mut kpis = BTreeMap::new();
            kpis.insert("energy_kwh".to_string(), self.energy_kwh);
            kpis.insert("comfort_violation_hours".to_string(), self.violation_hours);
            kpis.insert(
                "mean_indoor_temp_c".to_string(),
                self.indoor_sum_c / self.step_count as f64,
            );
            kpis.insert("episode_steps".to_string(), self.step_count as f64);
            info.insert_map(EPISODE_METRICS_KEY, kpis);
        }

        Ok(EnvStep::new(
            self.observation(outdoor),
            reward,
            terminated,
            false,
            info,
        ))
    }

    fn close(&mut self) {
        info!("closing single-zone environment");
        self.closed = true;
    }
}
