use crate::ballistics_system::results::{SimDataPoint, SimResults};
use crate::errors::SimulationResult;
use crate::utils::units::UnitConverter;

/// Collects a log line per data point and renders a run summary.
pub struct Telemetry {
    pub log: Vec<String>,
    max_pressure: f64,
    max_thrust: f64,
    max_mass_flux: f64,
    min_kn: f64,
    max_kn: f64,
    burned_out_at: Vec<(usize, f64)>, // (grain index, time)
}

impl Telemetry {
    pub fn new() -> Self {
        Telemetry {
            log: Vec::new(),
            max_pressure: 0.0,
            max_thrust: 0.0,
            max_mass_flux: 0.0,
            min_kn: f64::INFINITY,
            max_kn: 0.0,
            burned_out_at: Vec::new(),
        }
    }

    fn format_time(elapsed_time: f64) -> String {
        if elapsed_time >= 60.0 {
            let minutes = (elapsed_time / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}m {:.2}s", minutes, seconds)
        } else {
            format!("{:.2}s", elapsed_time)
        }
    }

    fn format_impulse(impulse_ns: f64) -> String {
        if impulse_ns >= 1000.0 {
            format!("{:.2} kN·s", impulse_ns / 1000.0)
        } else {
            format!("{:.2} N·s", impulse_ns)
        }
    }

    pub fn collect_data(&mut self, point: &SimDataPoint) {
        self.max_pressure = self.max_pressure.max(point.pressure);
        self.max_thrust = self.max_thrust.max(point.thrust);
        self.max_mass_flux = self.max_mass_flux.max(point.mass_flux);
        self.min_kn = self.min_kn.min(point.kn);
        self.max_kn = self.max_kn.max(point.kn);

        let data = format!(
            "Time: {}\n\
                 Pressure: {:.2} psi\n\
                 Thrust: {:.2} lbf\n\
                 Isp: {:.1} s\n\
                 Kn: {:.1}\n\
                 Mass Flux: {:.4} lb/s/in²\n\
                 Burn Rate: {:.4} in/s\n\
                 Grains Burning: {}/{}\n",
            Self::format_time(point.time_stamp),
            point.pressure,
            point.thrust,
            point.isp,
            point.kn,
            point.mass_flux,
            point.burn_rate,
            point.motor.get_num_grains() - point.motor.get_num_burned_out(),
            point.motor.get_num_grains(),
        );
        self.log.push(data);

        // Track grain burnouts
        for (index, grain) in point.motor.grains().iter().enumerate() {
            let already_logged = self.burned_out_at.iter().any(|(i, _)| *i == index);
            if grain.is_burned_out() && !already_logged {
                self.burned_out_at.push((index, point.time_stamp));
            }
        }
    }

    pub fn summary(&self, results: &SimResults, units: &UnitConverter) -> SimulationResult<String> {
        let impulse_ns = results.get_total_impulse_ns(units)?;
        let class = results.motor_class(units)?;
        let (kn_low, kn_high) = results.get_kn_range();

        let mut lines = vec![
            "--- Simulation Summary ---".to_string(),
            format!("Motor Class: {} ({:.0}%)", class.designation, class.percent),
            format!("Burn Time: {}", Self::format_time(results.get_burn_time())),
            format!(
                "Total Impulse: {:.2} lbf·s ({})",
                results.get_total_impulse(),
                Self::format_impulse(impulse_ns)
            ),
            format!("Kn Range: {:.1} - {:.1}", kn_low, kn_high),
            format!(
                "Max Pressure: {:.2} psi (avg {:.2} psi)",
                results.get_max_pressure(),
                results.get_avg_pressure()
            ),
            format!(
                "Max Thrust: {:.2} lbf (avg {:.2} lbf)",
                results.get_max_thrust(),
                results.get_avg_thrust()
            ),
            format!(
                "Max Isp: {:.1} s (avg {:.1} s)",
                results.get_max_isp(),
                results.get_avg_isp()
            ),
            format!("Max Mass Flux: {:.4} lb/s/in²", results.get_max_mass_flux()),
        ];

        if !self.burned_out_at.is_empty() {
            lines.push("\n--- Grain Burnouts ---".to_string());
            for (index, time) in &self.burned_out_at {
                lines.push(format!(
                    "Grain {} burned out at: {}",
                    index + 1,
                    Self::format_time(*time)
                ));
            }
        }

        Ok(lines.join("\n"))
    }

    pub fn display_data(&self) {
        println!("--- Telemetry Data ---");
        for entry in &self.log {
            println!("{}", entry);
        }
        println!("--- End of Telemetry ---");
        println!("{}", self.peaks());
    }

    fn peaks(&self) -> String {
        if self.log.is_empty() {
            return "Observed peaks: -".to_string();
        }
        format!(
            "Observed peaks: {:.2} psi, {:.2} lbf, {:.4} lb/s/in², Kn {:.1}-{:.1}",
            self.max_pressure, self.max_thrust, self.max_mass_flux, self.min_kn, self.max_kn
        )
    }
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ballistics_system::{settings::SimSettings, solver::InternalBallisticsSim};
    use crate::design::{grain::Grain, motor::Motor, nozzle::Nozzle, propellant::Propellant};
    use std::sync::Arc;

    fn create_test_motor() -> Motor {
        let propellant =
            Arc::new(Propellant::new("68/10", 0.0341, 0.2249, 4706.0, 0.058, 1.226).unwrap());
        let grains = vec![
            Grain::cylindrical_core(2.0, 4.0, 2.0, 1.0, propellant.clone()).unwrap(),
            Grain::cylindrical_core(2.0, 4.0, 2.0, 1.2, propellant).unwrap(),
        ];
        Motor::new(grains, Nozzle::conical(0.5, 2.0, 15.0, 0.25).unwrap())
    }

    #[test]
    fn test_format_time() {
        assert_eq!(Telemetry::format_time(3.456), "3.46s");
        assert_eq!(Telemetry::format_time(75.0), "1m 15.00s");
    }

    #[test]
    fn test_collects_one_entry_per_point() {
        let sim = InternalBallisticsSim::default();
        let mut telemetry = Telemetry::new();
        let results = sim
            .run_with(
                &create_test_motor(),
                &SimSettings::default(),
                |p| telemetry.collect_data(p),
                None,
            )
            .unwrap();

        assert_eq!(telemetry.log.len(), results.len());
        assert_eq!(telemetry.max_pressure, results.get_max_pressure());

        // the thinner-webbed second grain burns out first
        assert_eq!(telemetry.burned_out_at.len(), 2);
        assert_eq!(telemetry.burned_out_at[0].0, 1);
        assert!(telemetry.burned_out_at[0].1 < telemetry.burned_out_at[1].1);
    }

    #[test]
    fn test_peaks_before_and_after_data() {
        let mut telemetry = Telemetry::new();
        assert_eq!(telemetry.peaks(), "Observed peaks: -");

        let sim = InternalBallisticsSim::default();
        let point = sim
            .step(&create_test_motor(), &SimSettings::default(), 0.01)
            .unwrap();
        telemetry.collect_data(&point);

        let peaks = telemetry.peaks();
        assert!(peaks.contains(&format!("Kn {:.1}-{:.1}", point.kn, point.kn)), "{}", peaks);
        assert!(!peaks.contains("inf"));
    }

    #[test]
    fn test_summary() {
        let sim = InternalBallisticsSim::default();
        let mut telemetry = Telemetry::new();
        let results = sim
            .run_with(
                &create_test_motor(),
                &SimSettings::default(),
                |p| telemetry.collect_data(p),
                None,
            )
            .unwrap();

        let summary = telemetry.summary(&results, sim.units()).unwrap();
        assert!(summary.contains("Motor Class:"));
        assert!(summary.contains("Kn Range:"));
        assert!(summary.contains("Grain 2 burned out at:"));
    }
}
