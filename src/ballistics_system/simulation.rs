use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::results::{SimDataPoint, SimResults};
use super::settings::SimSettings;
use super::solver::{isp, InternalBallisticsSim};
use crate::constants::MAX_BURN_TIME;
use crate::design::motor::Motor;
use crate::errors::{SimulationError, SimulationResult};

/// Cooperative cancellation flag, checked before every time step.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimulationState {
    Running,
    Success,
    Failure,
}

impl InternalBallisticsSim {
    /// Regresses `motor` until every grain burns out.
    pub fn run(&self, motor: &Motor, settings: &SimSettings) -> SimulationResult<SimResults> {
        self.run_with(motor, settings, |_| {}, None)
    }

    /// Like [`run`](Self::run), calling `observer` once per completed data
    /// point and stopping with `Cancelled` once `cancel` is set.
    ///
    /// Any error discards the partial series.
    pub fn run_with<F>(
        &self,
        motor: &Motor,
        settings: &SimSettings,
        mut observer: F,
        cancel: Option<&CancellationToken>,
    ) -> SimulationResult<SimResults>
    where
        F: FnMut(&SimDataPoint),
    {
        settings.validate()?;
        motor.validate()?;

        let time_step = settings.time_step;
        let mut data: Vec<SimDataPoint> = Vec::new();
        let mut burn_time = 0.0;
        let mut total_impulse = 0.0;
        let mut state = SimulationState::Running;

        while state == SimulationState::Running {
            if cancel.is_some_and(|token| token.is_cancelled()) {
                return Err(SimulationError::Cancelled { elapsed: burn_time });
            }

            let previous = data.last().map_or(motor, |point| &point.motor);
            let step = data.len() + 1;
            let point = self.step(previous, settings, step as f64 * time_step)?;

            total_impulse += point.thrust * time_step;
            burn_time += time_step;

            state = if point.motor.is_burned_out() {
                SimulationState::Success
            } else if burn_time > MAX_BURN_TIME {
                SimulationState::Failure
            } else {
                SimulationState::Running
            };

            observer(&point);
            data.push(point);
        }

        match state {
            SimulationState::Success => Ok(SimResults::new(data, burn_time, total_impulse)),
            _ => Err(SimulationError::TimeExceeded {
                limit: MAX_BURN_TIME,
            }),
        }
    }

    /// Clones `previous`, regresses every burning grain by one time step and
    /// measures the result.
    ///
    /// Chamber pressure is solved once from the pre-step geometry and drives
    /// every grain's burn rate for the whole step.
    pub fn step(
        &self,
        previous: &Motor,
        settings: &SimSettings,
        time_stamp: f64,
    ) -> SimulationResult<SimDataPoint> {
        let mut motor = previous.clone();
        let chamber_pressure = self.calc_chamber_pressure(&motor)?;

        let mut burn_rate = 0.0;
        for grain in motor.grains_mut() {
            if grain.is_burned_out() {
                continue;
            }
            burn_rate = grain.propellant.burn_rate(chamber_pressure);
            grain.regress(burn_rate, settings.time_step);
        }

        self.measure(motor, settings, burn_rate, time_stamp)
    }

    fn measure(
        &self,
        motor: Motor,
        settings: &SimSettings,
        burn_rate: f64,
        time_stamp: f64,
    ) -> SimulationResult<SimDataPoint> {
        let kn = motor.get_kn();

        // a fully consumed motor can be left with no burning surface at all
        if motor.is_burned_out() && kn <= 0.0 {
            return Ok(SimDataPoint {
                mass_flux: motor.get_core_mass_flux(),
                motor,
                pressure: 0.0,
                thrust: 0.0,
                isp: 0.0,
                kn,
                burn_rate,
                time_stamp,
            });
        }

        let pressure = self.calc_chamber_pressure(&motor)?;
        let cf = self.calc_real_thrust_coeff(&motor, settings, pressure)?;
        let thrust = cf * motor.nozzle.get_throat_area() * pressure;

        Ok(SimDataPoint {
            pressure,
            mass_flux: self.calc_core_mass_flux(&motor),
            thrust,
            isp: isp(thrust, motor.get_mass_flow()),
            kn,
            burn_rate,
            time_stamp,
            motor,
        })
    }
}
