//! Simulation drivers: one tick computes every body's acceleration, then advances
//! each body with [`Body::update`].

mod barnes_hut;
mod brute_force;

pub use barnes_hut::*;
pub use brute_force::*;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::body::Body;
use crate::shared::{BoundingBox, Point, Scalar, Vector2d};

/// Evaluates `acceleration` for every body, on the rayon pool when `parallel` is set.
pub(crate) fn evaluate<F>(bodies: &[Body], parallel: bool, acceleration: F) -> Vec<Vector2d>
where
    F: Fn(&Body) -> Vector2d + Sync + Send,
{
    if parallel {
        bodies.par_iter().map(&acceleration).collect()
    } else {
        bodies.iter().map(&acceleration).collect()
    }
}

pub(crate) fn advance(bodies: &mut [Body], accelerations: &[Vector2d], dt: Scalar) {
    for (body, acceleration) in bodies.iter_mut().zip(accelerations) {
        body.update(dt, *acceleration);
    }
}

/// Scatters `count` bodies uniformly over the central half of `bounds`.
///
/// Masses fall in [1e6, 1e8) and velocities are small relative to the box, so a
/// short run stays inside the world. The same seed always yields the same bodies.
pub fn random_bodies(count: usize, bounds: &BoundingBox, seed: u64) -> Vec<Body> {
    let mut rng = StdRng::seed_from_u64(seed);
    let center = bounds.center();
    let half_width = bounds.width() / 4.0;
    let half_height = bounds.height() / 4.0;
    let max_speed = bounds.size() * 1e-4;

    (0..count)
        .map(|_| {
            let position = Point::new(
                rng.random_range(center.x() - half_width..center.x() + half_width),
                rng.random_range(center.y() - half_height..center.y() + half_height),
            );
            let velocity = Vector2d::new(
                rng.random_range(-max_speed..=max_speed),
                rng.random_range(-max_speed..=max_speed),
            );
            Body::new(rng.random_range(1e6..1e8), position, velocity)
        })
        .collect()
}
