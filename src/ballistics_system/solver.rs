//! Steady-state chamber pressure and isentropic nozzle performance.
//!
//! Pressures are in psi, areas in in², thrust in lbf and mass flow in lb/s,
//! so specific impulse comes out in seconds.

use super::settings::SimSettings;
use crate::constants::{AREA_RATIO_TOLERANCE, MAX_MACH_ITERATIONS, SUPERSONIC_MACH_GUESS};
use crate::design::{grain::Grain, motor::Motor};
use crate::errors::{SimulationError, SimulationResult};
use crate::utils::units::UnitConverter;

/// The internal ballistics solver set and time-stepping driver.
///
/// Holds no per-run state; the unit converter is only read.
#[derive(Debug, Clone, Default)]
pub struct InternalBallisticsSim {
    units: UnitConverter,
}

impl InternalBallisticsSim {
    pub fn new(units: UnitConverter) -> Self {
        InternalBallisticsSim { units }
    }

    pub fn units(&self) -> &UnitConverter {
        &self.units
    }

    /// Steady-state chamber pressure, `Pc = (Kn * a * rho * c*)^(1 / (1 - n))`,
    /// from the motor's averaged propellant.
    pub fn calc_chamber_pressure(&self, motor: &Motor) -> SimulationResult<f64> {
        let propellant = motor.average_propellant()?;

        if !(propellant.n < 1.0) {
            return Err(SimulationError::Configuration(format!(
                "average pressure exponent n = {} leaves the pressure exponent 1/(1-n) undefined",
                propellant.n
            )));
        }
        if !(motor.nozzle.get_throat_area() > 0.0) {
            return Err(SimulationError::Configuration(
                "nozzle throat area must be positive".to_string(),
            ));
        }

        let kn = motor.get_kn();
        if !(kn > 0.0) {
            return Err(SimulationError::Configuration(format!(
                "Kn must be positive, got {}",
                kn
            )));
        }

        let rho = self
            .units
            .convert(propellant.rho, "lb_per_cubic_inch", "slug_per_cubic_inch")?;
        let base = kn * propellant.a * rho * propellant.cstar;
        Ok(base.powf(1.0 / (1.0 - propellant.n)))
    }

    /// Burn rate of one grain, in/s: its own propellant against the motor-wide pressure.
    pub fn calc_steady_state_burn_rate(&self, motor: &Motor, grain: &Grain) -> SimulationResult<f64> {
        let chamber_pressure = self.calc_chamber_pressure(motor)?;
        Ok(grain.propellant.burn_rate(chamber_pressure))
    }

    pub fn calc_exit_mach(&self, motor: &Motor) -> SimulationResult<f64> {
        if motor.nozzle.is_sonic() {
            return Ok(1.0);
        }
        let (mach, _) = solve_exit_mach(motor.nozzle.get_expansion_ratio(), motor.get_gamma()?)?;
        Ok(mach)
    }

    pub fn calc_exit_pressure(&self, motor: &Motor, chamber_pressure: f64) -> SimulationResult<f64> {
        let gamma = motor.get_gamma()?;
        let exit_mach = self.calc_exit_mach(motor)?;

        let pressure_ratio =
            (1.0 + 0.5 * (gamma - 1.0) * exit_mach.powi(2)).powf(-gamma / (gamma - 1.0));
        Ok(chamber_pressure * pressure_ratio)
    }

    /// Ideal thrust coefficient from the isentropic flow equations
    /// (Rocket Propulsion Elements, eq. 3-29).
    pub fn calc_ideal_thrust_coeff(
        &self,
        motor: &Motor,
        settings: &SimSettings,
        chamber_pressure: f64,
    ) -> SimulationResult<f64> {
        let k = motor.get_gamma()?;
        let exit_pressure = self.calc_exit_pressure(motor, chamber_pressure)?;
        let expansion_ratio = motor.nozzle.get_expansion_ratio();

        let k_square = 2.0 * k * k / (k - 1.0);
        let two_over_k = (2.0 / (k + 1.0)).powf((k + 1.0) / (k - 1.0));
        let pressure_term = 1.0 - (exit_pressure / chamber_pressure).powf((k - 1.0) / k);

        let momentum_thrust = (k_square * two_over_k * pressure_term).sqrt();
        let pressure_thrust =
            (exit_pressure - settings.ambient_pressure) * expansion_ratio / chamber_pressure;
        Ok(momentum_thrust + pressure_thrust)
    }

    /// Applies divergence, two-phase flow and skin friction losses:
    /// `Cf = Nd * Nt * (Nf * Cf_ideal + (1 - Nf))`.
    pub fn calc_real_thrust_coeff(
        &self,
        motor: &Motor,
        settings: &SimSettings,
        chamber_pressure: f64,
    ) -> SimulationResult<f64> {
        let ideal = self.calc_ideal_thrust_coeff(motor, settings, chamber_pressure)?;
        Ok(real_thrust_coeff(
            ideal,
            motor.nozzle.get_divergence_loss(),
            settings.two_phase_flow_efficiency,
            settings.skin_friction_efficiency,
        ))
    }

    /// Thrust in lbf.
    pub fn calc_thrust(&self, motor: &Motor, settings: &SimSettings) -> SimulationResult<f64> {
        let chamber_pressure = self.calc_chamber_pressure(motor)?;
        let cf = self.calc_real_thrust_coeff(motor, settings, chamber_pressure)?;
        Ok(cf * motor.nozzle.get_throat_area() * chamber_pressure)
    }

    /// Specific impulse in seconds; zero while nothing is burning.
    pub fn calc_isp(&self, motor: &Motor, settings: &SimSettings) -> SimulationResult<f64> {
        let thrust = self.calc_thrust(motor, settings)?;
        Ok(isp(thrust, motor.get_mass_flow()))
    }

    /// Mass flux out of the aft end of the grain stack, lb/s/in².
    pub fn calc_core_mass_flux(&self, motor: &Motor) -> f64 {
        motor.get_core_mass_flux()
    }
}

pub(crate) fn real_thrust_coeff(
    ideal: f64,
    divergence_loss: f64,
    two_phase_flow_efficiency: f64,
    skin_friction_efficiency: f64,
) -> f64 {
    divergence_loss
        * two_phase_flow_efficiency
        * (skin_friction_efficiency * ideal + (1.0 - skin_friction_efficiency))
}

pub(crate) fn isp(thrust: f64, mass_flow: f64) -> f64 {
    if mass_flow > 0.0 {
        thrust / mass_flow
    } else {
        0.0
    }
}

/// Isentropic area ratio `A/A*` at a given Mach number.
pub fn area_ratio_at(mach: f64, gamma: f64) -> f64 {
    let exponent = (gamma + 1.0) / (2.0 * (gamma - 1.0));
    let base = (1.0 + 0.5 * (gamma - 1.0) * mach * mach) / ((gamma + 1.0) / 2.0);
    base.powf(exponent) / mach
}

/// Supersonic Mach number whose area ratio matches `area_ratio`, with the
/// number of Newton iterations taken.
///
/// Iterates on `ln(A/A*)`, which is close to linear in Mach on the
/// supersonic branch, so large expansion ratios converge in a few steps.
pub fn solve_exit_mach(area_ratio: f64, gamma: f64) -> SimulationResult<(f64, usize)> {
    solve_exit_mach_with(area_ratio, gamma, MAX_MACH_ITERATIONS)
}

/// As [`solve_exit_mach`], giving up after `max_iterations` Newton steps.
pub fn solve_exit_mach_with(
    area_ratio: f64,
    gamma: f64,
    max_iterations: usize,
) -> SimulationResult<(f64, usize)> {
    if !(area_ratio > 1.0) || !(gamma > 1.0) {
        return Err(SimulationError::Configuration(format!(
            "supersonic exit needs an area ratio above 1 and gamma above 1 (got {}, {})",
            area_ratio, gamma
        )));
    }

    let target = area_ratio.ln();
    let mut mach = SUPERSONIC_MACH_GUESS;
    let mut residual = f64::INFINITY;

    for iteration in 0..max_iterations {
        let guess_ratio = area_ratio_at(mach, gamma);
        if !guess_ratio.is_finite() {
            // overflowed; no finite residual to iterate on
            return Err(SimulationError::NumericDivergence {
                iterations: iteration,
                residual: f64::INFINITY,
            });
        }

        residual = area_ratio - guess_ratio;
        if residual.abs() < AREA_RATIO_TOLERANCE {
            return Ok((mach, iteration));
        }

        let slope = (mach * mach - 1.0) / (mach * (1.0 + 0.5 * (gamma - 1.0) * mach * mach));
        let mut next = mach - (guess_ratio.ln() - target) / slope;

        // stay on the supersonic branch
        if !next.is_finite() || next <= 1.0 {
            next = 0.5 * (mach + 1.0);
        }
        mach = next;
    }

    Err(SimulationError::NumericDivergence {
        iterations: max_iterations,
        residual: residual.abs(),
    })
}
