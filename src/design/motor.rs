use std::f64::consts::PI;

use super::{grain::Grain, nozzle::Nozzle, propellant::Propellant};
use crate::errors::{SimulationError, SimulationResult};

/// Grains stacked head end first, plus the nozzle.
///
/// Cloning a motor deep-copies its grains and nozzle; propellants are shared
/// read-only between clones.
#[derive(Debug, Clone)]
pub struct Motor {
    grains: Vec<Grain>,
    pub nozzle: Nozzle,
    average_propellant: Option<Propellant>,
}

impl Motor {
    pub fn new(grains: Vec<Grain>, nozzle: Nozzle) -> Self {
        let mut motor = Motor {
            grains: Vec::new(),
            nozzle,
            average_propellant: None,
        };
        motor.set_grains(grains);
        motor
    }

    pub fn grains(&self) -> &[Grain] {
        &self.grains
    }

    pub(crate) fn grains_mut(&mut self) -> &mut [Grain] {
        &mut self.grains
    }

    pub fn set_grains(&mut self, grains: Vec<Grain>) {
        self.grains = grains;
        self.update_average_propellant();
    }

    pub fn add_grain(&mut self, grain: Grain) {
        self.grains.push(grain);
        self.update_average_propellant();
    }

    pub fn remove_grain(&mut self, index: usize) -> Option<Grain> {
        if index >= self.grains.len() {
            return None;
        }
        let removed = self.grains.remove(index);
        self.update_average_propellant();
        Some(removed)
    }

    pub fn set_nozzle(&mut self, nozzle: Nozzle) {
        self.nozzle = nozzle;
    }

    fn update_average_propellant(&mut self) {
        self.average_propellant = Propellant::average(self.grains.iter().map(|g| &*g.propellant));
    }

    pub fn validate(&self) -> SimulationResult<()> {
        if self.grains.is_empty() {
            return Err(SimulationError::Configuration(
                "motor has no grains".to_string(),
            ));
        }
        for grain in &self.grains {
            grain.validate()?;
        }
        self.nozzle.validate()
    }

    pub fn average_propellant(&self) -> SimulationResult<&Propellant> {
        self.average_propellant.as_ref().ok_or_else(|| {
            SimulationError::Configuration("motor has no grains to average".to_string())
        })
    }

    pub fn get_ballistic_a(&self) -> SimulationResult<f64> {
        Ok(self.average_propellant()?.a)
    }

    pub fn get_ballistic_n(&self) -> SimulationResult<f64> {
        Ok(self.average_propellant()?.n)
    }

    pub fn get_cstar(&self) -> SimulationResult<f64> {
        Ok(self.average_propellant()?.cstar)
    }

    pub fn get_propellant_density(&self) -> SimulationResult<f64> {
        Ok(self.average_propellant()?.rho)
    }

    pub fn get_gamma(&self) -> SimulationResult<f64> {
        Ok(self.average_propellant()?.gamma)
    }

    pub fn get_num_grains(&self) -> usize {
        self.grains.len()
    }

    pub fn get_num_burned_out(&self) -> usize {
        self.grains.iter().filter(|g| g.is_burned_out()).count()
    }

    pub fn is_burned_out(&self) -> bool {
        self.grains.iter().all(|g| g.is_burned_out())
    }

    pub fn get_propellant_length(&self) -> f64 {
        self.grains.iter().map(|g| g.length).sum()
    }

    pub fn get_max_diameter(&self) -> f64 {
        self.grains.iter().map(|g| g.diameter).fold(0.0, f64::max)
    }

    pub fn get_propellant_mass(&self) -> f64 {
        self.grains.iter().map(|g| g.get_mass()).sum()
    }

    pub fn get_propellant_volume(&self) -> f64 {
        self.grains.iter().map(|g| g.get_volume()).sum()
    }

    pub fn get_port_to_throat_ratio(&self) -> f64 {
        self.grains
            .last()
            .map_or(0.0, |g| g.get_port_area() / self.nozzle.get_throat_area())
    }

    /// Fraction of the chamber (max diameter by total propellant length) filled with propellant.
    pub fn get_volume_loading(&self) -> f64 {
        let chamber_volume =
            (self.get_max_diameter() / 2.0).powi(2) * PI * self.get_propellant_length();
        if chamber_volume <= 0.0 {
            return 0.0;
        }
        self.get_propellant_volume() / chamber_volume
    }

    pub fn get_total_burning_area(&self) -> f64 {
        self.grains.iter().map(|g| g.get_burning_area()).sum()
    }

    pub fn get_kn(&self) -> f64 {
        self.get_total_burning_area() / self.nozzle.get_throat_area()
    }

    /// Total mass generation, lb/s, using each grain's own last burn rate.
    pub fn get_mass_flow(&self) -> f64 {
        self.grains.iter().map(|g| g.get_mass_flow()).sum()
    }

    /// Mass generated upstream of axial station `position`, measured in
    /// inches from the head end.
    ///
    /// Grains ending at or before the station count in full, grains starting
    /// at or after it not at all. Only a grain strictly straddling the station
    /// contributes a partial area.
    pub fn get_upstream_mass_flow(&self, position: f64) -> f64 {
        let mut mass_flow = 0.0;
        let mut grain_start = 0.0;

        for grain in &self.grains {
            if grain_start >= position {
                break;
            }
            let grain_end = grain_start + grain.length;
            let rate = grain.propellant.rho * grain.burn_rate;

            if grain_end <= position {
                mass_flow += grain.get_burning_area() * rate;
            } else {
                mass_flow += grain.get_upstream_burning_area(position - grain_start) * rate;
            }
            grain_start = grain_end;
        }

        mass_flow
    }

    /// Mass flux through the aft grain's port, lb/s/in².
    pub fn get_core_mass_flux(&self) -> f64 {
        let port_area = self.grains.last().map_or(0.0, |g| g.get_port_area());
        if port_area <= 0.0 {
            return 0.0;
        }
        self.get_upstream_mass_flow(self.get_propellant_length()) / port_area
    }
}
