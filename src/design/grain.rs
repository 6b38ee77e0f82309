use std::f64::consts::PI;
use std::sync::Arc;

use super::propellant::Propellant;
use crate::errors::{SimulationError, SimulationResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrainKind {
    CylindricalCore,
}

/// Port shape extruded through the length of a grain.
#[derive(Debug, Clone, PartialEq)]
pub enum GrainGeometry {
    /// BATES segment: a concentric cylindrical core.
    CylindricalCore { core_diameter: f64 },
}

/// A cylindrical propellant segment. All lengths in inches.
#[derive(Debug, Clone)]
pub struct Grain {
    pub diameter: f64,
    pub length: f64,
    pub burning_faces: f64, // two is typical, zero when both ends are inhibited
    pub propellant: Arc<Propellant>,
    pub burn_rate: f64, // last applied regression rate, in/s
    pub geometry: GrainGeometry,
}

impl Grain {
    pub fn cylindrical_core(
        diameter: f64,
        length: f64,
        burning_faces: f64,
        core_diameter: f64,
        propellant: Arc<Propellant>,
    ) -> SimulationResult<Self> {
        if !(core_diameter >= 0.0 && core_diameter < diameter) {
            return Err(SimulationError::Configuration(format!(
                "core diameter {} must be non-negative and smaller than grain diameter {}",
                core_diameter, diameter
            )));
        }

        let grain = Grain {
            diameter,
            length,
            burning_faces,
            propellant,
            burn_rate: 0.0,
            geometry: GrainGeometry::CylindricalCore { core_diameter },
        };
        grain.validate()?;
        Ok(grain)
    }

    pub fn validate(&self) -> SimulationResult<()> {
        if !(self.diameter > 0.0) || !(self.length > 0.0) {
            return Err(SimulationError::Configuration(format!(
                "grain diameter ({}) and length ({}) must be positive",
                self.diameter, self.length
            )));
        }
        if !(self.burning_faces >= 0.0) {
            return Err(SimulationError::Configuration(format!(
                "burning face count {} cannot be negative",
                self.burning_faces
            )));
        }
        self.propellant.validate()
    }

    pub fn kind(&self) -> GrainKind {
        match self.geometry {
            GrainGeometry::CylindricalCore { .. } => GrainKind::CylindricalCore,
        }
    }

    pub fn core_diameter(&self) -> f64 {
        match self.geometry {
            GrainGeometry::CylindricalCore { core_diameter } => core_diameter,
        }
    }

    pub fn get_port_area(&self) -> f64 {
        match self.geometry {
            GrainGeometry::CylindricalCore { core_diameter } => (core_diameter / 2.0).powi(2) * PI,
        }
    }

    /// Uninhibited burning surface, in²: the core wall plus one annulus per burning face.
    pub fn get_burning_area(&self) -> f64 {
        match self.geometry {
            GrainGeometry::CylindricalCore { core_diameter } => {
                let core_area = PI * core_diameter * self.length;
                core_area + self.burning_faces * self.face_area()
            }
        }
    }

    /// Burning surface lying within `depth` inches of the grain's upstream end.
    ///
    /// Counts the port wall up to `depth` and the upstream face when at least
    /// one face burns. `depth` is clamped to the grain length.
    pub fn get_upstream_burning_area(&self, depth: f64) -> f64 {
        if depth <= 0.0 {
            return 0.0;
        }
        if depth >= self.length {
            return self.get_burning_area();
        }

        match self.geometry {
            GrainGeometry::CylindricalCore { core_diameter } => {
                let upstream_faces = self.burning_faces.min(1.0);
                PI * core_diameter * depth + upstream_faces * self.face_area()
            }
        }
    }

    pub fn get_volume(&self) -> f64 {
        let grain_volume = (self.diameter / 2.0).powi(2) * PI * self.length;
        let port_volume = self.get_port_area() * self.length;
        grain_volume - port_volume
    }

    pub fn get_mass(&self) -> f64 {
        self.get_volume() * self.propellant.rho
    }

    /// Mass generation rate, lb/s, at the last applied burn rate.
    pub fn get_mass_flow(&self) -> f64 {
        self.get_burning_area() * self.propellant.rho * self.burn_rate
    }

    /// Regresses the grain at `burn_rate` (in/s) for `time_step` seconds.
    /// Returns false without touching the grain if it is already burned out.
    pub fn regress(&mut self, burn_rate: f64, time_step: f64) -> bool {
        if self.is_burned_out() {
            return false;
        }
        self.burn_rate = burn_rate;

        let burn_distance = burn_rate * time_step;
        match &mut self.geometry {
            GrainGeometry::CylindricalCore { core_diameter } => {
                *core_diameter += 2.0 * burn_distance;
            }
        }
        self.length = (self.length - self.burning_faces * burn_distance).max(0.0);
        true
    }

    pub fn is_burned_out(&self) -> bool {
        match self.geometry {
            GrainGeometry::CylindricalCore { core_diameter } => {
                core_diameter >= self.diameter || self.length <= 0.0
            }
        }
    }

    fn face_area(&self) -> f64 {
        0.25 * PI * (self.diameter.powi(2) - self.core_diameter().powi(2))
    }
}
