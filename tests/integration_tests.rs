use std::sync::Arc;

use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use srm_simulation::{
    area_ratio_at, errors::SimulationError, solve_exit_mach, CancellationToken, Grain,
    InternalBallisticsSim, Motor, Nozzle, Propellant, SimSettings, Telemetry, UnitConverter,
};

fn knsu() -> Arc<Propellant> {
    Arc::new(Propellant::new("68/10", 0.0341, 0.2249, 4706.0, 0.058, 1.226).unwrap())
}

// Four identical BATES grains behind a 0.5 in throat, 16:1 conical nozzle
fn create_golden_motor() -> Motor {
    let propellant = knsu();
    let grains = (0..4)
        .map(|_| Grain::cylindrical_core(2.0, 4.0, 2.0, 1.0, propellant.clone()).unwrap())
        .collect();
    let nozzle = Nozzle::conical(0.5, 2.0, 15.0, 0.25).unwrap();
    Motor::new(grains, nozzle)
}

fn golden_settings() -> SimSettings {
    SimSettings::default()
        .with_two_phase_flow_efficiency(0.85)
        .with_skin_friction_efficiency(0.98)
        .with_time_step(0.01)
}

#[test]
fn test_golden_scenario_kn_range() {
    println!("INTEGRATION TEST: Golden BATES motor");

    let sim = InternalBallisticsSim::new(UnitConverter::new());
    let results = sim
        .run(&create_golden_motor(), &golden_settings())
        .expect("Golden motor should burn out");

    let (kn_low, kn_high) = results.get_kn_range();
    println!("Kn Range: {:.1} - {:.1}", kn_low, kn_high);
    println!("Burn Time: {:.2} s", results.get_burn_time());
    println!("Max Pressure: {:.1} psi", results.get_max_pressure());
    println!("Total Impulse: {:.1} lbf·s", results.get_total_impulse());

    assert_abs_diff_eq!(kn_low, 350.0, epsilon = 10.0);
    assert_abs_diff_eq!(kn_high, 390.0, epsilon = 10.0);
}

#[test]
fn test_golden_scenario_results_are_physical() {
    let sim = InternalBallisticsSim::default();
    let results = sim.run(&create_golden_motor(), &golden_settings()).unwrap();

    assert!(!results.is_empty());
    assert!(results.get_burn_time() > 2.0 && results.get_burn_time() < 6.0);
    assert!(results.get_total_impulse() > 0.0);
    assert!(results.get_max_pressure() > 300.0 && results.get_max_pressure() < 600.0);
    assert!(results.get_avg_isp() > 80.0 && results.get_avg_isp() < 200.0);
    assert!(results.get_max_mass_flux() > 0.0);

    let last = results.last().unwrap();
    assert!(last.motor.grains().iter().all(|g| g.is_burned_out()));
    assert_abs_diff_eq!(
        last.time_stamp,
        results.get_burn_time(),
        epsilon = 1e-9
    );

    // the step count and the accumulated burn time agree
    assert_abs_diff_eq!(
        results.len() as f64 * 0.01,
        results.get_burn_time(),
        epsilon = 1e-9
    );

    let class = results.motor_class(sim.units()).unwrap();
    println!("Motor class: {} ({:.1}%)", class.designation, class.percent);
    // roughly 330 lbf·s, i.e. about 1470 N·s
    assert_eq!(class.designation, "K");
}

#[test]
fn test_golden_average_propellant_is_exact() {
    let motor = create_golden_motor();
    let prop = knsu();
    let avg = motor.average_propellant().unwrap();

    assert_eq!(avg.a, prop.a);
    assert_eq!(avg.n, prop.n);
    assert_eq!(avg.cstar, prop.cstar);
    assert_eq!(avg.rho, prop.rho);
    assert_eq!(avg.gamma, prop.gamma);
}

#[test]
fn test_input_motor_is_untouched() {
    let motor = create_golden_motor();
    let sim = InternalBallisticsSim::default();
    sim.run(&motor, &golden_settings()).unwrap();

    for grain in motor.grains() {
        assert_eq!(grain.core_diameter(), 1.0);
        assert_eq!(grain.length, 4.0);
        assert_eq!(grain.burn_rate, 0.0);
    }
}

#[test]
fn test_pressure_monotonic_in_kn() {
    let sim = InternalBallisticsSim::default();
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..50 {
        let a = rng.gen_range(0.005..0.1);
        let n = rng.gen_range(0.05..0.8);
        let cstar = rng.gen_range(3000.0..6000.0);
        let rho = rng.gen_range(0.04..0.07);
        let propellant = Arc::new(Propellant::new("random", a, n, cstar, rho, 1.2).unwrap());

        let motor_with_throat = |throat: f64| {
            let grain = Grain::cylindrical_core(2.0, 4.0, 2.0, 1.0, propellant.clone()).unwrap();
            Motor::new(vec![grain], Nozzle::conical(throat, 2.0, 15.0, 0.0).unwrap())
        };

        let wide = motor_with_throat(0.4);
        let narrow = motor_with_throat(0.3);
        assert!(narrow.get_kn() > wide.get_kn());
        assert!(
            sim.calc_chamber_pressure(&narrow).unwrap() > sim.calc_chamber_pressure(&wide).unwrap(),
            "pressure must rise with Kn for a={}, n={}",
            a,
            n
        );
    }
}

#[test]
fn test_exit_mach_converges_over_range() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..200 {
        let ratio = rng.gen_range(1.01..200.0);
        let gamma = rng.gen_range(1.1..1.4);
        let (mach, _) = solve_exit_mach(ratio, gamma).expect("supersonic solve should converge");

        assert!(mach > 1.0);
        assert!((area_ratio_at(mach, gamma) - ratio).abs() < 1e-4);
    }
}

#[test]
fn test_sonic_nozzle_motor_runs() {
    let propellant = knsu();
    let grains = vec![Grain::cylindrical_core(2.0, 4.0, 2.0, 1.0, propellant).unwrap()];
    let motor = Motor::new(grains, Nozzle::conical(0.4, 0.4, 0.0, 0.0).unwrap());

    let sim = InternalBallisticsSim::default();
    assert_eq!(sim.calc_exit_mach(&motor).unwrap(), 1.0);

    let results = sim.run(&motor, &SimSettings::default()).unwrap();
    assert!(results.get_total_impulse() > 0.0);
}

#[test]
fn test_slow_motor_exceeds_time_limit() {
    println!("INTEGRATION TEST: Motor that cannot finish in time");

    let slow = Arc::new(Propellant::new("slow", 0.001, 0.2, 4000.0, 0.06, 1.2).unwrap());
    let grain = Grain::cylindrical_core(10.0, 20.0, 0.0, 1.0, slow).unwrap();
    let motor = Motor::new(vec![grain], Nozzle::conical(1.0, 2.0, 15.0, 0.0).unwrap());

    let sim = InternalBallisticsSim::default();
    let mut steps = 0;
    let result = sim.run_with(
        &motor,
        &SimSettings::default().with_time_step(0.1),
        |_| steps += 1,
        None,
    );

    assert!(matches!(result, Err(SimulationError::TimeExceeded { .. })));
    assert!(steps > 500);
}

#[test]
fn test_cancelled_run_returns_no_results() {
    let sim = InternalBallisticsSim::default();
    let token = CancellationToken::new();
    let worker_token = token.clone();

    let result = sim.run_with(
        &create_golden_motor(),
        &golden_settings(),
        |point| {
            if point.time_stamp > 1.0 {
                worker_token.cancel();
            }
        },
        Some(&token),
    );

    match result {
        Err(SimulationError::Cancelled { elapsed }) => assert!(elapsed > 1.0 && elapsed < 1.1),
        other => panic!("expected cancellation, got {:?}", other.map(|r| r.len())),
    }
}

#[test]
fn test_mixed_propellant_stack() {
    let slow = knsu();
    let fast = Arc::new(Propellant::new("fast", 0.05, 0.3, 4900.0, 0.06, 1.24).unwrap());
    let grains = vec![
        Grain::cylindrical_core(2.0, 4.0, 2.0, 1.0, slow).unwrap(),
        Grain::cylindrical_core(2.0, 4.0, 2.0, 1.0, fast).unwrap(),
    ];
    let motor = Motor::new(grains, Nozzle::conical(0.45, 1.8, 12.0, 0.25).unwrap());

    let sim = InternalBallisticsSim::default();
    let mut telemetry = Telemetry::new();
    let results = sim
        .run_with(&motor, &SimSettings::default(), |p| telemetry.collect_data(p), None)
        .unwrap();

    // the faster propellant regresses further in the first step
    let first = &results.data()[0].motor;
    assert!(first.grains()[1].core_diameter() > first.grains()[0].core_diameter());
    assert!(results.last().unwrap().motor.is_burned_out());
    assert_eq!(telemetry.log.len(), results.len());
    println!("{}", telemetry.summary(&results, sim.units()).unwrap());
}
