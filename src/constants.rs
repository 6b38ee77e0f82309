// Simulation Parameters
pub const TIME_STEP: f64 = 0.01; // s
pub const MAX_BURN_TIME: f64 = 50.0; // s, regression must finish before this

// Default Ambient Conditions
pub const SEA_LEVEL_PRESSURE: f64 = 14.7; // psi
pub const AMBIENT_TEMPERATURE: f64 = 70.0; // °F

// Efficiency Factors
pub const TWO_PHASE_FLOW_EFFICIENCY: f64 = 0.85; // fraction of combustion products that are gaseous
pub const SKIN_FRICTION_EFFICIENCY: f64 = 0.98; // 98-99% is typical

// Propellant Defaults
pub const DEFAULT_GAMMA: f64 = 1.25;

// Exit Mach Solver
pub const SUPERSONIC_MACH_GUESS: f64 = 2.2;
pub const AREA_RATIO_TOLERANCE: f64 = 1e-4;
pub const MAX_MACH_ITERATIONS: usize = 100;
