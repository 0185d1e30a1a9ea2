use celestial::Error;
use celestial::body::Body;
use celestial::physics::{self, G};
use celestial::shared::{BoundingBox, Point, Scalar, Simulation, Vector2d};
use celestial::simulation::{BarnesHutSimulation, BruteForceSimulation, random_bodies};

const CENTRAL_MASS: Scalar = 1e12;
const ORBIT_RADIUS: Scalar = 100.0;

fn world() -> BoundingBox {
    BoundingBox::centered(1000.0).unwrap()
}

/// A light body on a circular orbit around a heavy one.
fn orbit() -> Vec<Body> {
    let speed = (G * CENTRAL_MASS / ORBIT_RADIUS).sqrt();
    vec![
        Body::at_rest(CENTRAL_MASS, Point::new(0.0, 0.0)),
        Body::new(1.0, Point::new(ORBIT_RADIUS, 0.0), Vector2d::new(0.0, speed)),
    ]
}

fn check_orbit(sim: &mut impl Simulation) {
    sim.settings_mut().dt = 0.1;
    sim.init().unwrap();
    let initial = physics::total_energy(sim.bodies());

    for _ in 0..1000 {
        sim.step().unwrap();
    }

    assert!((sim.elapsed() - 100.0).abs() < 1e-9);
    let radius = sim.bodies()[0]
        .position()
        .distance(&sim.bodies()[1].position())
        .magnitude();
    assert!((radius - ORBIT_RADIUS).abs() < 1.0, "radius drifted to {radius}");

    let last = physics::total_energy(sim.bodies());
    assert!(((last - initial) / initial).abs() < 1e-2);
}

#[test]
fn brute_force_keeps_circular_orbit() {
    check_orbit(&mut BruteForceSimulation::new(orbit()));
}

#[test]
fn barnes_hut_keeps_circular_orbit() {
    check_orbit(&mut BarnesHutSimulation::new(orbit(), world()));
}

#[test]
fn drivers_agree_at_zero_threshold() {
    let bodies = random_bodies(120, &world(), 31);
    let mut exact = BruteForceSimulation::new(bodies.clone());
    let mut tree = BarnesHutSimulation::new(bodies, world());
    tree.settings_mut().threshold = 0.0;
    exact.init().unwrap();
    tree.init().unwrap();

    for _ in 0..10 {
        exact.step().unwrap();
        tree.step().unwrap();
    }

    for (a, b) in exact.bodies().iter().zip(tree.bodies()) {
        assert!(a.position().distance(&b.position()).magnitude() < 1e-6);
        assert!((a.velocity() - b.velocity()).magnitude() < 1e-9);
    }
}

#[test]
fn brute_force_conserves_momentum() {
    let bodies = random_bodies(50, &world(), 8);
    let mut sim = BruteForceSimulation::new(bodies);
    sim.init().unwrap();

    let net: Vector2d = sim
        .bodies()
        .iter()
        .zip(sim.accelerations())
        .map(|(body, a)| *a * body.mass())
        .sum();
    let scale: Scalar = sim
        .bodies()
        .iter()
        .zip(sim.accelerations())
        .map(|(body, a)| (*a * body.mass()).magnitude())
        .sum();
    assert!(net.magnitude() < 1e-9 * scale);
}

#[test]
fn escaping_body_stops_barnes_hut() {
    // fast enough to leave the box within a few steps
    let mut sim = BarnesHutSimulation::new(
        vec![
            Body::at_rest(1.0, Point::new(0.0, 0.0)),
            Body::new(1.0, Point::new(450.0, 0.0), Vector2d::new(100.0, 0.0)),
        ],
        world(),
    );
    sim.settings_mut().dt = 0.2;
    sim.init().unwrap();

    let mut failure = None;
    for _ in 0..10 {
        if let Err(e) = sim.step() {
            failure = Some(e);
            break;
        }
    }

    match failure {
        Some(Error::OutOfBounds { position, bounds }) => {
            assert!(position.x() >= 500.0);
            assert_eq!(bounds, *sim.bounds());
        }
        other => panic!("expected an out-of-bounds failure, got {other:?}"),
    }
    // the failed step moved nothing
    assert!(sim.bodies()[1].position().x() >= 500.0);
    assert_eq!(sim.bodies().len(), 2);
}

#[test]
fn empty_simulation_steps() {
    let mut sim = BarnesHutSimulation::new(Vec::new(), world());
    sim.init().unwrap();
    sim.step().unwrap();
    assert!(sim.bodies().is_empty());
    assert!(sim.tree().is_some_and(|t| t.is_empty()));
}
