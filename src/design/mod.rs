pub mod grain;
pub mod motor;
pub mod nozzle;
pub mod propellant;
