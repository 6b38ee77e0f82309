pub mod motor_class;
pub mod units;
