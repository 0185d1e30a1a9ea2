use clap::{Parser, ValueEnum};
use log::info;

use celestial::{
    Result, physics,
    shared::{BoundingBox, Scalar, Simulation, SimulationSettings},
    simulation::{self, BarnesHutSimulation, BruteForceSimulation},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Method {
    BruteForce,
    BarnesHut,
}

/// Runs a randomly seeded 2D gravity simulation and reports energy drift.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    #[arg(long, value_enum, default_value_t = Method::BarnesHut)]
    method: Method,

    /// Number of bodies to scatter over the world box.
    #[arg(long, default_value_t = 1000)]
    bodies: usize,

    #[arg(long, default_value_t = 100)]
    steps: usize,

    #[arg(long, default_value_t = 0.01)]
    dt: Scalar,

    /// Barnes-Hut opening threshold; 0 evaluates every pair.
    #[arg(long, default_value_t = 0.5)]
    threshold: Scalar,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Side of the square world box, centered on the origin.
    #[arg(long, default_value_t = 1e4)]
    world_size: Scalar,

    /// Evaluate forces on the current thread only.
    #[arg(long)]
    serial: bool,
}

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

fn run(sim: &mut impl Simulation, steps: usize) -> Result<()> {
    sim.init()?;
    let initial = physics::total_energy(sim.bodies());

    let start = std::time::Instant::now();
    for _ in 0..steps {
        sim.step()?;
    }
    let elapsed = start.elapsed();

    let last = physics::total_energy(sim.bodies());
    let drift = if initial != 0.0 {
        ((last - initial) / initial).abs()
    } else {
        (last - initial).abs()
    };
    info!(
        "{} steps, simulated time {:.4}, wall time {:?}",
        steps,
        sim.elapsed(),
        elapsed
    );
    info!("energy {:.6e} -> {:.6e} (relative drift {:.3e})", initial, last, drift);
    Ok(())
}

fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();

    let bounds = BoundingBox::centered(args.world_size)?;
    let bodies = simulation::random_bodies(args.bodies, &bounds, args.seed);
    let settings = SimulationSettings {
        threshold: args.threshold,
        dt: args.dt,
        parallel: !args.serial,
    };
    info!(
        "{:?}: {} bodies in {}, seed {}",
        args.method, args.bodies, bounds, args.seed
    );

    match args.method {
        Method::BruteForce => run(
            &mut BruteForceSimulation::with_settings(bodies, settings),
            args.steps,
        ),
        Method::BarnesHut => run(
            &mut BarnesHutSimulation::with_settings(bodies, bounds, settings),
            args.steps,
        ),
    }
}
