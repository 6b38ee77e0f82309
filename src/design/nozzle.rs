use std::f64::consts::PI;

use crate::errors::{SimulationError, SimulationResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NozzleKind {
    Conical,
}

/// Shape of the divergent section.
#[derive(Debug, Clone, PartialEq)]
pub enum NozzleContour {
    /// Straight cone; 15° is typical.
    Conical {
        half_angle: f64, // degrees
        throat_length: f64, // in
    },
}

/// Convergent-divergent nozzle. Diameters in inches.
#[derive(Debug, Clone, PartialEq)]
pub struct Nozzle {
    pub throat_diameter: f64,
    pub exit_diameter: f64,
    pub contour: NozzleContour,
}

impl Nozzle {
    pub fn conical(
        throat_diameter: f64,
        exit_diameter: f64,
        half_angle: f64,
        throat_length: f64,
    ) -> SimulationResult<Self> {
        if !(0.0..90.0).contains(&half_angle) {
            return Err(SimulationError::Configuration(format!(
                "nozzle half angle {}° must lie in [0, 90)",
                half_angle
            )));
        }

        let nozzle = Nozzle {
            throat_diameter,
            exit_diameter,
            contour: NozzleContour::Conical {
                half_angle,
                throat_length,
            },
        };
        nozzle.validate()?;
        Ok(nozzle)
    }

    pub fn validate(&self) -> SimulationResult<()> {
        if !(self.throat_diameter > 0.0) {
            return Err(SimulationError::Configuration(format!(
                "nozzle throat diameter {} must be positive",
                self.throat_diameter
            )));
        }
        if !(self.exit_diameter > 0.0) {
            return Err(SimulationError::Configuration(format!(
                "nozzle exit diameter {} must be positive",
                self.exit_diameter
            )));
        }
        Ok(())
    }

    pub fn kind(&self) -> NozzleKind {
        match self.contour {
            NozzleContour::Conical { .. } => NozzleKind::Conical,
        }
    }

    pub fn get_throat_area(&self) -> f64 {
        0.25 * PI * self.throat_diameter.powi(2)
    }

    pub fn get_exit_area(&self) -> f64 {
        0.25 * PI * self.exit_diameter.powi(2)
    }

    pub fn get_expansion_ratio(&self) -> f64 {
        self.get_exit_area() / self.get_throat_area()
    }

    /// True when the exit is no wider than the throat, so the flow leaves at Mach 1.
    pub fn is_sonic(&self) -> bool {
        self.exit_diameter <= self.throat_diameter
    }

    /// Fraction of momentum kept after divergence losses, between 0 and 1.
    pub fn get_divergence_loss(&self) -> f64 {
        match self.contour {
            NozzleContour::Conical { half_angle, .. } => (1.0 + half_angle.to_radians().cos()) / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_areas() {
        let nozzle = Nozzle::conical(0.5, 2.0, 15.0, 0.25).unwrap();
        assert_relative_eq!(nozzle.get_throat_area(), 0.0625 * PI, epsilon = EPSILON);
        assert_relative_eq!(nozzle.get_exit_area(), PI, epsilon = EPSILON);
        assert_relative_eq!(nozzle.get_expansion_ratio(), 16.0, epsilon = EPSILON);
        assert_eq!(nozzle.kind(), NozzleKind::Conical);
    }

    #[test]
    fn test_divergence_loss() {
        let nozzle = Nozzle::conical(0.5, 2.0, 15.0, 0.25).unwrap();
        assert_relative_eq!(nozzle.get_divergence_loss(), 0.982_962_913_144_534, epsilon = 1e-12);

        let straight = Nozzle::conical(0.5, 2.0, 0.0, 0.25).unwrap();
        assert_eq!(straight.get_divergence_loss(), 1.0);
    }

    #[test]
    fn test_sonic_nozzle() {
        assert!(Nozzle::conical(0.5, 0.5, 15.0, 0.0).unwrap().is_sonic());
        assert!(Nozzle::conical(0.5, 0.4, 15.0, 0.0).unwrap().is_sonic());
        assert!(!Nozzle::conical(0.5, 0.6, 15.0, 0.0).unwrap().is_sonic());
    }

    #[test]
    fn test_invalid_nozzle() {
        assert!(Nozzle::conical(0.0, 2.0, 15.0, 0.25).is_err());
        assert!(Nozzle::conical(0.5, 0.0, 15.0, 0.25).is_err());
        assert!(Nozzle::conical(0.5, 2.0, 90.0, 0.25).is_err());
    }
}
