use std::time::Instant;

use log::trace;

use super::{advance, evaluate};
use crate::body::Body;
use crate::error::Result;
use crate::shared::{Scalar, Simulation, SimulationSettings, Vector2d, validate_timestep};

/// Exact O(n^2) reference: every body feels every other body directly.
#[derive(Debug, Clone)]
pub struct BruteForceSimulation {
    bodies: Vec<Body>,
    accelerations: Vec<Vector2d>,
    settings: SimulationSettings,
    elapsed: Scalar,
}

impl BruteForceSimulation {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self::with_settings(bodies, SimulationSettings::default())
    }

    pub fn with_settings(bodies: Vec<Body>, settings: SimulationSettings) -> Self {
        Self {
            bodies,
            accelerations: Vec::new(),
            settings,
            elapsed: 0.0,
        }
    }
}

impl Simulation for BruteForceSimulation {
    fn init(&mut self) -> Result<()> {
        self.settings.validate()?;
        self.elapsed = 0.0;
        self.update_forces()
    }

    fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut SimulationSettings {
        &mut self.settings
    }

    fn elapsed(&self) -> Scalar {
        self.elapsed
    }

    fn update_forces(&mut self) -> Result<()> {
        let start = Instant::now();
        let bodies = &self.bodies;
        self.accelerations = evaluate(bodies, self.settings.parallel, |body| {
            body.calculate_acceleration(bodies)
        });
        trace!(
            "brute force: {} bodies in {:?}",
            self.bodies.len(),
            start.elapsed()
        );
        Ok(())
    }

    fn step_by(&mut self, dt: Scalar) -> Result<()> {
        validate_timestep(dt)?;
        self.update_forces()?;
        advance(&mut self.bodies, &self.accelerations, dt);
        self.elapsed += dt;
        Ok(())
    }

    fn add_body(&mut self, body: Body) {
        self.bodies.push(body);
    }

    fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    fn accelerations(&self) -> &[Vector2d] {
        &self.accelerations
    }
}
