use crate::constants::{
    AMBIENT_TEMPERATURE, SEA_LEVEL_PRESSURE, SKIN_FRICTION_EFFICIENCY, TIME_STEP,
    TWO_PHASE_FLOW_EFFICIENCY,
};
use crate::errors::{SimulationError, SimulationResult};

/// Parameters that control how a simulation runs.
#[derive(Debug, Clone, PartialEq)]
pub struct SimSettings {
    pub ambient_pressure: f64,    // psi
    pub ambient_temperature: f64, // °F
    pub two_phase_flow_efficiency: f64,
    pub skin_friction_efficiency: f64,
    pub time_step: f64, // s
}

impl SimSettings {
    pub fn new(
        ambient_pressure: f64,
        ambient_temperature: f64,
        two_phase_flow_efficiency: f64,
        skin_friction_efficiency: f64,
        time_step: f64,
    ) -> SimulationResult<Self> {
        let settings = SimSettings {
            ambient_pressure,
            ambient_temperature,
            two_phase_flow_efficiency,
            skin_friction_efficiency,
            time_step,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_two_phase_flow_efficiency(mut self, efficiency: f64) -> Self {
        self.two_phase_flow_efficiency = efficiency;
        self
    }

    pub fn with_skin_friction_efficiency(mut self, efficiency: f64) -> Self {
        self.skin_friction_efficiency = efficiency;
        self
    }

    pub fn with_ambient_pressure(mut self, pressure: f64) -> Self {
        self.ambient_pressure = pressure;
        self
    }

    pub fn validate(&self) -> SimulationResult<()> {
        let is_fraction = |value: f64| value > 0.0 && value <= 1.0;

        if !(self.time_step > 0.0) || !self.time_step.is_finite() {
            return Err(SimulationError::Configuration(format!(
                "time step {} must be positive",
                self.time_step
            )));
        }
        if !is_fraction(self.two_phase_flow_efficiency) {
            return Err(SimulationError::Configuration(format!(
                "two-phase flow efficiency {} must lie in (0, 1]",
                self.two_phase_flow_efficiency
            )));
        }
        if !is_fraction(self.skin_friction_efficiency) {
            return Err(SimulationError::Configuration(format!(
                "skin friction efficiency {} must lie in (0, 1]",
                self.skin_friction_efficiency
            )));
        }
        if !(self.ambient_pressure >= 0.0) {
            return Err(SimulationError::Configuration(format!(
                "ambient pressure {} cannot be negative",
                self.ambient_pressure
            )));
        }
        Ok(())
    }
}

impl Default for SimSettings {
    fn default() -> Self {
        SimSettings {
            ambient_pressure: SEA_LEVEL_PRESSURE,
            ambient_temperature: AMBIENT_TEMPERATURE,
            two_phase_flow_efficiency: TWO_PHASE_FLOW_EFFICIENCY,
            skin_friction_efficiency: SKIN_FRICTION_EFFICIENCY,
            time_step: TIME_STEP,
        }
    }
}
