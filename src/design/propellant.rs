use crate::constants::DEFAULT_GAMMA;
use crate::errors::{SimulationError, SimulationResult};

/// Propellant following Saint Robert's burn law, `r = a * P^n`.
///
/// Units follow the rest of the design model: `a` in in/s/psi^n, `cstar` in
/// ft/s and `rho` in lb/in³.
#[derive(Debug, Clone, PartialEq)]
pub struct Propellant {
    pub name: String,
    pub a: f64,
    pub n: f64,
    pub cstar: f64,
    pub rho: f64,
    pub gamma: f64,
}

impl Propellant {
    pub fn new(
        name: impl Into<String>,
        a: f64,
        n: f64,
        cstar: f64,
        rho: f64,
        gamma: f64,
    ) -> SimulationResult<Self> {
        let propellant = Propellant {
            name: name.into(),
            a,
            n,
            cstar,
            rho,
            gamma,
        };
        propellant.validate()?;
        Ok(propellant)
    }

    pub fn with_default_gamma(
        name: impl Into<String>,
        a: f64,
        n: f64,
        cstar: f64,
        rho: f64,
    ) -> SimulationResult<Self> {
        Self::new(name, a, n, cstar, rho, DEFAULT_GAMMA)
    }

    pub fn validate(&self) -> SimulationResult<()> {
        let problem = if !(self.a > 0.0) {
            Some("burn rate coefficient a must be positive")
        } else if !(self.n > 0.0 && self.n < 1.0) {
            Some("pressure exponent n must lie strictly between 0 and 1")
        } else if !(self.cstar > 0.0) {
            Some("characteristic velocity must be positive")
        } else if !(self.rho > 0.0) {
            Some("density must be positive")
        } else if !(self.gamma > 1.0) {
            Some("ratio of specific heats must exceed 1")
        } else {
            None
        };

        match problem {
            Some(msg) => Err(SimulationError::Configuration(format!(
                "propellant '{}': {}",
                self.name, msg
            ))),
            None => Ok(()),
        }
    }

    pub fn burn_rate(&self, pressure: f64) -> f64 {
        self.a * pressure.powf(self.n)
    }

    /// Arithmetic mean of every ballistic parameter.
    ///
    /// Uses a running mean so a set of identical propellants averages back to
    /// exactly the same values.
    pub fn average<'a, I>(propellants: I) -> Option<Propellant>
    where
        I: IntoIterator<Item = &'a Propellant>,
    {
        let mut iter = propellants.into_iter();
        let first = iter.next()?;
        let mut mean = Propellant {
            name: "Average".to_string(),
            ..first.clone()
        };

        for (index, prop) in iter.enumerate() {
            let count = (index + 2) as f64;
            mean.a += (prop.a - mean.a) / count;
            mean.n += (prop.n - mean.n) / count;
            mean.cstar += (prop.cstar - mean.cstar) / count;
            mean.rho += (prop.rho - mean.rho) / count;
            mean.gamma += (prop.gamma - mean.gamma) / count;
        }

        Some(mean)
    }
}
