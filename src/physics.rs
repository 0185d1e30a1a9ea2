//! Newtonian gravity and the explicit Euler step used to advance bodies.
//!
//! Every function here is pure. Forces between coincident points are defined to be
//! zero: when the separation falls below [`MIN_DISTANCE`] the contribution is dropped
//! instead of being softened, so a body never accelerates itself and no query
//! produces a non-finite value.

use num_traits::Zero;

use crate::body::Body;
use crate::shared::{Point, Scalar, Vector2d};

/// Gravitational constant in m^3 kg^-1 s^-2.
pub const G: Scalar = 6.67428e-11;

/// Separations below this are treated as coincident.
pub const MIN_DISTANCE: Scalar = 1e-9;

const MIN_DISTANCE_SQUARED: Scalar = MIN_DISTANCE * MIN_DISTANCE;

/// Aggregate of one or more point masses: total mass at the center of mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centroid {
    pub mass: Scalar,
    pub position: Point,
}

impl Centroid {
    pub fn new(mass: Scalar, position: Point) -> Self {
        Self { mass, position }
    }

    /// Combined centroid: summed mass at the mass-weighted mean position.
    pub fn combine(&self, other: &Centroid) -> Centroid {
        let mass = self.mass + other.mass;
        if mass == 0.0 {
            return Centroid::new(mass, self.position);
        }
        Centroid {
            mass,
            position: Point::weighted_mean(&self.position, self.mass, &other.position, other.mass),
        }
    }
}

/// Acceleration on a unit test mass at `target` due to `source_mass` at `source_position`.
///
/// Magnitude `G * m / r^2`, directed from the target toward the source.
#[inline]
pub fn calculate_acceleration_on(
    target: &Point,
    source_mass: Scalar,
    source_position: &Point,
) -> Vector2d {
    let direction = target.distance(source_position);
    let distance_squared = direction.magnitude_squared();

    if distance_squared < MIN_DISTANCE_SQUARED {
        return Vector2d::zero();
    }

    let distance = distance_squared.sqrt();
    direction * (G * source_mass / (distance_squared * distance))
}

/// Explicit Euler position update using the pre-update velocity.
///
/// The acceleration does not enter the position update; it is taken so callers can
/// pass one set of arguments to both halves of the step.
#[inline]
pub fn calculate_updated_position(
    position: &Point,
    dt: Scalar,
    velocity: &Vector2d,
    _acceleration: &Vector2d,
) -> Point {
    position.translate(*velocity * dt)
}

#[inline]
pub fn calculate_updated_velocity(velocity: &Vector2d, dt: Scalar, acceleration: &Vector2d) -> Vector2d {
    *velocity + *acceleration * dt
}

pub fn kinetic_energy(bodies: &[Body]) -> Scalar {
    bodies
        .iter()
        .map(|b| 0.5 * b.mass() * b.velocity().magnitude_squared())
        .sum()
}

/// Pairwise gravitational potential energy; coincident pairs contribute nothing.
pub fn potential_energy(bodies: &[Body]) -> Scalar {
    let mut energy = 0.0;
    for i in 0..bodies.len() {
        for j in 0..i {
            let r = bodies[i].position().distance(&bodies[j].position()).magnitude();
            if r < MIN_DISTANCE {
                continue;
            }
            energy -= G * bodies[i].mass() * bodies[j].mass() / r;
        }
    }
    energy
}

pub fn total_energy(bodies: &[Body]) -> Scalar {
    kinetic_energy(bodies) + potential_energy(bodies)
}
