pub mod results;
pub mod settings;
pub mod simulation;
pub mod solver;
