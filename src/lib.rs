pub mod ballistics_system;
pub mod constants;
pub mod design;
pub mod errors;
pub mod telemetry_system;
pub mod utils;

pub use constants::*;
pub use design::grain::{Grain, GrainGeometry, GrainKind};
pub use design::motor::Motor;
pub use design::nozzle::{Nozzle, NozzleContour, NozzleKind};
pub use design::propellant::Propellant;
pub use errors::{SimulationError, SimulationResult};

// Re-export commonly used items from ballistics_system
pub use ballistics_system::results::{SimDataPoint, SimResults};
pub use ballistics_system::settings::SimSettings;
pub use ballistics_system::simulation::{CancellationToken, SimulationState};
pub use ballistics_system::solver::{
    area_ratio_at, solve_exit_mach, solve_exit_mach_with, InternalBallisticsSim,
};

// Re-export commonly used items from telemetry_system
pub use telemetry_system::telemetry::Telemetry;

// Re-export commonly used utilities
pub use utils::motor_class::{motor_class, MotorClass};
pub use utils::units::{QuantityKind, UnitConverter, UnitError};
