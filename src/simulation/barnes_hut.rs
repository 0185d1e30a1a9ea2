use std::time::Instant;

use log::{debug, trace};

use super::{advance, evaluate};
use crate::body::Body;
use crate::error::Result;
use crate::quadtree::QuadTree;
use crate::shared::{BoundingBox, Scalar, Simulation, SimulationSettings, Vector2d, validate_timestep};

/// Approximates forces with a quadtree rebuilt from the current positions every tick.
///
/// Bodies must stay inside `bounds`. A body that leaves the world box makes the next
/// force update fail with [`Error::OutOfBounds`](crate::error::Error::OutOfBounds)
/// before any body is moved.
#[derive(Debug, Clone)]
pub struct BarnesHutSimulation {
    bodies: Vec<Body>,
    accelerations: Vec<Vector2d>,
    bounds: BoundingBox,
    tree: Option<QuadTree>,
    settings: SimulationSettings,
    elapsed: Scalar,
}

impl BarnesHutSimulation {
    pub fn new(bodies: Vec<Body>, bounds: BoundingBox) -> Self {
        Self::with_settings(bodies, bounds, SimulationSettings::default())
    }

    pub fn with_settings(bodies: Vec<Body>, bounds: BoundingBox, settings: SimulationSettings) -> Self {
        Self {
            bodies,
            accelerations: Vec::new(),
            bounds,
            tree: None,
            settings,
            elapsed: 0.0,
        }
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Tree built by the most recent force update.
    pub fn tree(&self) -> Option<&QuadTree> {
        self.tree.as_ref()
    }

    fn build_tree(&self) -> Result<QuadTree> {
        QuadTree::build(
            self.bounds,
            self.bodies.iter().map(|body| (body.mass(), body.position())),
        )
    }
}

impl Simulation for BarnesHutSimulation {
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
        let tree = self.build_tree()?;
        let built = start.elapsed();

        let threshold = self.settings.threshold;
        self.accelerations = evaluate(&self.bodies, self.settings.parallel, |body| {
            tree.calculate_acceleration(&body.position(), threshold)
        });

        debug!(
            "barnes-hut: {} bodies, {} nodes, depth {}",
            self.bodies.len(),
            tree.iter().count(),
            tree.depth()
        );
        trace!(
            "barnes-hut: build {:?}, query {:?}",
            built,
            start.elapsed() - built
        );
        self.tree = Some(tree);
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
