use crate::design::motor::Motor;
use crate::errors::SimulationResult;
use crate::utils::motor_class::{motor_class, MotorClass};
use crate::utils::units::UnitConverter;

/// Snapshot of the motor at the end of one time step.
#[derive(Debug, Clone)]
pub struct SimDataPoint {
    pub motor: Motor,
    pub pressure: f64,  // psi
    pub mass_flux: f64, // lb/s/in²
    pub thrust: f64,    // lbf
    pub isp: f64,       // s
    pub kn: f64,
    pub burn_rate: f64,  // in/s
    pub time_stamp: f64, // s
}

/// The time series produced by one simulation run.
#[derive(Debug, Clone)]
pub struct SimResults {
    data: Vec<SimDataPoint>,
    burn_time: f64,
    total_impulse: f64,
}

impl SimResults {
    pub(crate) fn new(data: Vec<SimDataPoint>, burn_time: f64, total_impulse: f64) -> Self {
        SimResults {
            data,
            burn_time,
            total_impulse,
        }
    }

    pub fn data(&self) -> &[SimDataPoint] {
        &self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SimDataPoint> {
        self.data.iter()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn last(&self) -> Option<&SimDataPoint> {
        self.data.last()
    }

    pub fn get_burn_time(&self) -> f64 {
        self.burn_time
    }

    /// Total impulse in lbf·s.
    pub fn get_total_impulse(&self) -> f64 {
        self.total_impulse
    }

    pub fn get_max_pressure(&self) -> f64 {
        self.max_of(|p| p.pressure)
    }

    pub fn get_avg_pressure(&self) -> f64 {
        self.avg_of(|p| p.pressure)
    }

    pub fn get_max_thrust(&self) -> f64 {
        self.max_of(|p| p.thrust)
    }

    pub fn get_avg_thrust(&self) -> f64 {
        self.avg_of(|p| p.thrust)
    }

    pub fn get_max_isp(&self) -> f64 {
        self.max_of(|p| p.isp)
    }

    pub fn get_avg_isp(&self) -> f64 {
        self.avg_of(|p| p.isp)
    }

    pub fn get_max_mass_flux(&self) -> f64 {
        self.max_of(|p| p.mass_flux)
    }

    pub fn get_avg_mass_flux(&self) -> f64 {
        self.avg_of(|p| p.mass_flux)
    }

    /// `(min, max)` of Kn over the run.
    pub fn get_kn_range(&self) -> (f64, f64) {
        if self.data.is_empty() {
            return (0.0, 0.0);
        }
        self.data
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(low, high), p| {
                (low.min(p.kn), high.max(p.kn))
            })
    }

    pub fn get_total_impulse_ns(&self, units: &UnitConverter) -> SimulationResult<f64> {
        Ok(units.convert(self.total_impulse, "lbf_second", "newton_second")?)
    }

    pub fn motor_class(&self, units: &UnitConverter) -> SimulationResult<MotorClass> {
        Ok(motor_class(self.get_total_impulse_ns(units)?))
    }

    fn max_of(&self, field: impl Fn(&SimDataPoint) -> f64) -> f64 {
        self.data.iter().map(field).fold(0.0, f64::max)
    }

    fn avg_of(&self, field: impl Fn(&SimDataPoint) -> f64) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data.iter().map(field).sum::<f64>() / self.data.len() as f64
    }
}

impl<'a> IntoIterator for &'a SimResults {
    type Item = &'a SimDataPoint;
    type IntoIter = std::slice::Iter<'a, SimDataPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
