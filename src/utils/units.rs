//! Unit conversion service.
//!
//! Unit names map onto `uom` quantities, so a conversion is a typed
//! `new::<unit>` / `get::<unit>` pair and mismatched dimensions never
//! meet. Compound units without a `uom` counterpart are built from
//! their factors.

use thiserror::Error;
use uom::si::area::{square_inch, square_meter};
use uom::si::f64::{
    Area, Force, Length, Mass, MassDensity, MassRate, Momentum, Pressure,
    ThermodynamicTemperature, Time, Velocity, Volume,
};
use uom::si::force::{newton, pound_force};
use uom::si::length::{foot, inch, meter, millimeter};
use uom::si::mass::{kilogram, pound, slug};
use uom::si::mass_density::{kilogram_per_cubic_meter, pound_per_cubic_inch};
use uom::si::mass_rate::{kilogram_per_second, pound_per_second};
use uom::si::pressure::{pascal, pound_force_per_square_inch};
use uom::si::thermodynamic_temperature::{degree_celsius, degree_fahrenheit, kelvin};
use uom::si::time::second;
use uom::si::velocity::{foot_per_second, inch_per_second, meter_per_second, millimeter_per_second};
use uom::si::volume::cubic_inch;
use uom::si::{Quantity, ISQ, SI};
use uom::typenum::{N1, N2, P1, Z0};

/// Mass flow rate per unit area.
type MassFlux = Quantity<ISQ<N2, P1, N1, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

#[derive(Debug, Error, PartialEq)]
pub enum UnitError {
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    #[error("Cannot convert from {from} to {to}: incompatible dimensions")]
    IncompatibleUnits { from: String, to: String },
}

/// Physical quantity a unit measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityKind {
    Length,
    Time,
    Mass,
    Force,
    Pressure,
    Temperature,
    Density,
    Velocity,
    MassFlux,
    Impulse,
}

#[derive(Debug, Clone, Copy)]
enum Measure {
    Length(Length),
    Time(Time),
    Mass(Mass),
    Force(Force),
    Pressure(Pressure),
    Temperature(ThermodynamicTemperature),
    Density(MassDensity),
    Velocity(Velocity),
    MassFlux(MassFlux),
    Impulse(Momentum),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Meter,
    Millimeter,
    Inch,
    Foot,
    Second,
    Kilogram,
    Pound,
    Slug,
    Newton,
    PoundForce,
    Pascal,
    Psi,
    Kelvin,
    DegreeCelsius,
    DegreeFahrenheit,
    KilogramPerCubicMeter,
    PoundPerCubicInch,
    SlugPerCubicInch,
    MeterPerSecond,
    FootPerSecond,
    InchPerSecond,
    MillimeterPerSecond,
    KilogramPerSecondPerSquareMeter,
    PoundPerSecondPerSquareInch,
    NewtonSecond,
    PoundForceSecond,
}

impl Unit {
    fn parse(name: &str) -> Option<Unit> {
        let unit = match name {
            "meter" | "m" => Unit::Meter,
            "millimeter" | "mm" => Unit::Millimeter,
            "inch" | "in" => Unit::Inch,
            "foot" | "ft" => Unit::Foot,
            "second" | "s" => Unit::Second,
            "kg" => Unit::Kilogram,
            "lb" => Unit::Pound,
            "slug" => Unit::Slug,
            "newton" | "N" => Unit::Newton,
            "lbf" => Unit::PoundForce,
            "pascal" | "Pa" => Unit::Pascal,
            "psi" => Unit::Psi,
            "kelvin" | "K" => Unit::Kelvin,
            "degC" => Unit::DegreeCelsius,
            "degF" => Unit::DegreeFahrenheit,
            "kg_per_cubic_meter" | "kg/m3" => Unit::KilogramPerCubicMeter,
            "lb_per_cubic_inch" | "lb/in3" => Unit::PoundPerCubicInch,
            "slug_per_cubic_inch" | "slug/in3" => Unit::SlugPerCubicInch,
            "meters_per_second" | "mps" => Unit::MeterPerSecond,
            "feet_per_second" | "fps" => Unit::FootPerSecond,
            "inch_per_second" | "ips" => Unit::InchPerSecond,
            "mm_per_second" | "mmps" => Unit::MillimeterPerSecond,
            "kg_per_sec_per_sq_m" => Unit::KilogramPerSecondPerSquareMeter,
            "lb_per_sec_per_sq_in" => Unit::PoundPerSecondPerSquareInch,
            "newton_second" | "N*s" => Unit::NewtonSecond,
            "lbf_second" | "lbf*s" => Unit::PoundForceSecond,
            _ => return None,
        };
        Some(unit)
    }

    fn measure(self, value: f64) -> Measure {
        match self {
            Unit::Meter => Measure::Length(Length::new::<meter>(value)),
            Unit::Millimeter => Measure::Length(Length::new::<millimeter>(value)),
            Unit::Inch => Measure::Length(Length::new::<inch>(value)),
            Unit::Foot => Measure::Length(Length::new::<foot>(value)),
            Unit::Second => Measure::Time(Time::new::<second>(value)),
            Unit::Kilogram => Measure::Mass(Mass::new::<kilogram>(value)),
            Unit::Pound => Measure::Mass(Mass::new::<pound>(value)),
            Unit::Slug => Measure::Mass(Mass::new::<slug>(value)),
            Unit::Newton => Measure::Force(Force::new::<newton>(value)),
            Unit::PoundForce => Measure::Force(Force::new::<pound_force>(value)),
            Unit::Pascal => Measure::Pressure(Pressure::new::<pascal>(value)),
            Unit::Psi => Measure::Pressure(Pressure::new::<pound_force_per_square_inch>(value)),
            Unit::Kelvin => Measure::Temperature(ThermodynamicTemperature::new::<kelvin>(value)),
            Unit::DegreeCelsius => {
                Measure::Temperature(ThermodynamicTemperature::new::<degree_celsius>(value))
            }
            Unit::DegreeFahrenheit => {
                Measure::Temperature(ThermodynamicTemperature::new::<degree_fahrenheit>(value))
            }
            Unit::KilogramPerCubicMeter => {
                Measure::Density(MassDensity::new::<kilogram_per_cubic_meter>(value))
            }
            Unit::PoundPerCubicInch => {
                Measure::Density(MassDensity::new::<pound_per_cubic_inch>(value))
            }
            Unit::SlugPerCubicInch => {
                let density: MassDensity = Mass::new::<slug>(value) / Volume::new::<cubic_inch>(1.0);
                Measure::Density(density)
            }
            Unit::MeterPerSecond => Measure::Velocity(Velocity::new::<meter_per_second>(value)),
            Unit::FootPerSecond => Measure::Velocity(Velocity::new::<foot_per_second>(value)),
            Unit::InchPerSecond => Measure::Velocity(Velocity::new::<inch_per_second>(value)),
            Unit::MillimeterPerSecond => {
                Measure::Velocity(Velocity::new::<millimeter_per_second>(value))
            }
            Unit::KilogramPerSecondPerSquareMeter => {
                let flux: MassFlux =
                    MassRate::new::<kilogram_per_second>(value) / Area::new::<square_meter>(1.0);
                Measure::MassFlux(flux)
            }
            Unit::PoundPerSecondPerSquareInch => {
                let flux: MassFlux =
                    MassRate::new::<pound_per_second>(value) / Area::new::<square_inch>(1.0);
                Measure::MassFlux(flux)
            }
            Unit::NewtonSecond => {
                let impulse: Momentum = Force::new::<newton>(value) * Time::new::<second>(1.0);
                Measure::Impulse(impulse)
            }
            Unit::PoundForceSecond => {
                let impulse: Momentum = Force::new::<pound_force>(value) * Time::new::<second>(1.0);
                Measure::Impulse(impulse)
            }
        }
    }

    /// Reads `measure` in this unit, or `None` when the quantities differ.
    fn read(self, measure: Measure) -> Option<f64> {
        let value = match (self, measure) {
            (Unit::Meter, Measure::Length(l)) => l.get::<meter>(),
            (Unit::Millimeter, Measure::Length(l)) => l.get::<millimeter>(),
            (Unit::Inch, Measure::Length(l)) => l.get::<inch>(),
            (Unit::Foot, Measure::Length(l)) => l.get::<foot>(),
            (Unit::Second, Measure::Time(t)) => t.get::<second>(),
            (Unit::Kilogram, Measure::Mass(m)) => m.get::<kilogram>(),
            (Unit::Pound, Measure::Mass(m)) => m.get::<pound>(),
            (Unit::Slug, Measure::Mass(m)) => m.get::<slug>(),
            (Unit::Newton, Measure::Force(f)) => f.get::<newton>(),
            (Unit::PoundForce, Measure::Force(f)) => f.get::<pound_force>(),
            (Unit::Pascal, Measure::Pressure(p)) => p.get::<pascal>(),
            (Unit::Psi, Measure::Pressure(p)) => p.get::<pound_force_per_square_inch>(),
            (Unit::Kelvin, Measure::Temperature(t)) => t.get::<kelvin>(),
            (Unit::DegreeCelsius, Measure::Temperature(t)) => t.get::<degree_celsius>(),
            (Unit::DegreeFahrenheit, Measure::Temperature(t)) => t.get::<degree_fahrenheit>(),
            (Unit::KilogramPerCubicMeter, Measure::Density(d)) => d.get::<kilogram_per_cubic_meter>(),
            (Unit::PoundPerCubicInch, Measure::Density(d)) => d.get::<pound_per_cubic_inch>(),
            (Unit::SlugPerCubicInch, Measure::Density(d)) => {
                let per_cubic_inch: Mass = d * Volume::new::<cubic_inch>(1.0);
                per_cubic_inch.get::<slug>()
            }
            (Unit::MeterPerSecond, Measure::Velocity(v)) => v.get::<meter_per_second>(),
            (Unit::FootPerSecond, Measure::Velocity(v)) => v.get::<foot_per_second>(),
            (Unit::InchPerSecond, Measure::Velocity(v)) => v.get::<inch_per_second>(),
            (Unit::MillimeterPerSecond, Measure::Velocity(v)) => v.get::<millimeter_per_second>(),
            (Unit::KilogramPerSecondPerSquareMeter, Measure::MassFlux(f)) => {
                let rate: MassRate = f * Area::new::<square_meter>(1.0);
                rate.get::<kilogram_per_second>()
            }
            (Unit::PoundPerSecondPerSquareInch, Measure::MassFlux(f)) => {
                let rate: MassRate = f * Area::new::<square_inch>(1.0);
                rate.get::<pound_per_second>()
            }
            (Unit::NewtonSecond, Measure::Impulse(i)) => {
                let force: Force = i / Time::new::<second>(1.0);
                force.get::<newton>()
            }
            (Unit::PoundForceSecond, Measure::Impulse(i)) => {
                let force: Force = i / Time::new::<second>(1.0);
                force.get::<pound_force>()
            }
            _ => return None,
        };
        Some(value)
    }

    fn kind(self) -> QuantityKind {
        match self.measure(0.0) {
            Measure::Length(_) => QuantityKind::Length,
            Measure::Time(_) => QuantityKind::Time,
            Measure::Mass(_) => QuantityKind::Mass,
            Measure::Force(_) => QuantityKind::Force,
            Measure::Pressure(_) => QuantityKind::Pressure,
            Measure::Temperature(_) => QuantityKind::Temperature,
            Measure::Density(_) => QuantityKind::Density,
            Measure::Velocity(_) => QuantityKind::Velocity,
            Measure::MassFlux(_) => QuantityKind::MassFlux,
            Measure::Impulse(_) => QuantityKind::Impulse,
        }
    }
}

/// String-keyed front end over `uom` conversions.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitConverter;

impl UnitConverter {
    pub fn new() -> Self {
        UnitConverter
    }

    pub fn is_known(&self, unit: &str) -> bool {
        Unit::parse(unit).is_some()
    }

    pub fn quantity_of(&self, unit: &str) -> Result<QuantityKind, UnitError> {
        lookup(unit).map(Unit::kind)
    }

    /// Converts `value` expressed in `from` into `to`.
    pub fn convert(&self, value: f64, from: &str, to: &str) -> Result<f64, UnitError> {
        let source = lookup(from)?;
        let target = lookup(to)?;

        target
            .read(source.measure(value))
            .ok_or_else(|| UnitError::IncompatibleUnits {
                from: from.to_string(),
                to: to.to_string(),
            })
    }
}

fn lookup(unit: &str) -> Result<Unit, UnitError> {
    Unit::parse(unit).ok_or_else(|| UnitError::UnknownUnit(unit.to_string()))
}
