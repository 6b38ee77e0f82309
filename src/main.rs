use std::sync::Arc;

use clap::Parser;
use srm_simulation::*;

#[derive(Parser)]
#[command(author, version, about = "Solid rocket motor internal ballistics simulator")]
struct Cli {
    /// Number of identical BATES grains in the stack
    #[arg(long, default_value_t = 4)]
    grains: usize,

    /// Simulation time step in seconds
    #[arg(long, default_value_t = TIME_STEP)]
    time_step: f64,

    /// Ambient pressure in psi
    #[arg(long, default_value_t = SEA_LEVEL_PRESSURE)]
    ambient_pressure: f64,

    /// Two-phase flow efficiency, (0, 1]
    #[arg(long, default_value_t = TWO_PHASE_FLOW_EFFICIENCY)]
    two_phase: f64,

    /// Skin friction efficiency, (0, 1]
    #[arg(long, default_value_t = SKIN_FRICTION_EFFICIENCY)]
    skin_friction: f64,

    /// Nozzle divergence half angle in degrees
    #[arg(long, default_value_t = 15.0)]
    half_angle: f64,

    /// Print every time step
    #[arg(long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let propellant = Arc::new(Propellant::new("68/10", 0.0341, 0.2249, 4706.0, 0.058, 1.226)?);
    let grains = (0..cli.grains)
        .map(|_| Grain::cylindrical_core(2.0, 4.0, 2.0, 1.0, propellant.clone()))
        .collect::<Result<Vec<_>, _>>()?;
    let nozzle = Nozzle::conical(0.5, 2.0, cli.half_angle, 0.25)?;
    let motor = Motor::new(grains, nozzle);

    let settings = SimSettings::default()
        .with_time_step(cli.time_step)
        .with_ambient_pressure(cli.ambient_pressure)
        .with_two_phase_flow_efficiency(cli.two_phase)
        .with_skin_friction_efficiency(cli.skin_friction);

    println!(
        "Simulating {} grain(s): {:.3} lb of propellant, Kn {:.1}, port/throat {:.2}, volume loading {:.1}%",
        motor.get_num_grains(),
        motor.get_propellant_mass(),
        motor.get_kn(),
        motor.get_port_to_throat_ratio(),
        100.0 * motor.get_volume_loading()
    );

    let sim = InternalBallisticsSim::new(UnitConverter::new());
    let mut telemetry = Telemetry::new();

    match sim.run_with(&motor, &settings, |point| telemetry.collect_data(point), None) {
        Ok(results) => {
            if cli.verbose {
                telemetry.display_data();
            }
            println!("{}", telemetry.summary(&results, sim.units())?);
        }
        Err(e) => {
            println!("Simulation failed: {}", e);
        }
    }

    Ok(())
}
