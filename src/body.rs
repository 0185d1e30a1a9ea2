use num_traits::Zero;

use crate::physics;
use crate::shared::{Point, Scalar, Vector2d};

/// A star, planet or asteroid: a fixed mass with a mutable position and velocity.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    mass: Scalar,
    position: Point,
    velocity: Vector2d,
}

impl Body {
    pub fn new(mass: Scalar, position: Point, velocity: Vector2d) -> Self {
        Self {
            mass,
            position,
            velocity,
        }
    }

    pub fn at_rest(mass: Scalar, position: Point) -> Self {
        Self::new(mass, position, Vector2d::zero())
    }

    pub fn mass(&self) -> Scalar {
        self.mass
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn velocity(&self) -> Vector2d {
        self.velocity
    }

    pub fn displace(&mut self, v: Vector2d) {
        self.position = self.position.translate(v);
    }

    pub fn add_to_velocity(&mut self, v: Vector2d) {
        self.velocity = self.velocity + v;
    }

    /// Exact sum of the pairwise accelerations `bodies` impart on this one.
    ///
    /// `bodies` may include `self`; a coincident source contributes nothing.
    pub fn calculate_acceleration(&self, bodies: &[Body]) -> Vector2d {
        bodies
            .iter()
            .map(|b| physics::calculate_acceleration_on(&self.position, b.mass, &b.position))
            .sum()
    }

    /// Advances position with the current velocity, then velocity with `acceleration`.
    pub fn update(&mut self, dt: Scalar, acceleration: Vector2d) {
        self.position =
            physics::calculate_updated_position(&self.position, dt, &self.velocity, &acceleration);
        self.velocity = physics::calculate_updated_velocity(&self.velocity, dt, &acceleration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_with_zero_acceleration_moves_by_velocity() {
        let mut body = Body::new(1.0, Point::new(1.0, 1.0), Vector2d::new(2.0, -1.0));
        body.update(0.5, Vector2d::zero());
        assert_eq!(body.position(), Point::new(2.0, 0.5));
        assert_eq!(body.velocity(), Vector2d::new(2.0, -1.0));
    }

    #[test]
    fn test_update_from_rest_only_changes_velocity() {
        let mut body = Body::at_rest(1.0, Point::new(1.0, 1.0));
        body.update(0.25, Vector2d::new(4.0, 8.0));
        assert_eq!(body.position(), Point::new(1.0, 1.0));
        assert_eq!(body.velocity(), Vector2d::new(1.0, 2.0));

        // the second step sees the velocity gained in the first
        body.update(0.25, Vector2d::zero());
        assert_eq!(body.position(), Point::new(1.25, 1.5));
    }

    #[test]
    fn test_direct_mutators() {
        let mut body = Body::at_rest(3.0, Point::new(0.0, 0.0));
        body.displace(Vector2d::new(1.5, -2.0));
        body.add_to_velocity(Vector2d::new(0.5, 0.5));
        body.add_to_velocity(Vector2d::new(0.5, 0.0));
        assert_eq!(body.position(), Point::new(1.5, -2.0));
        assert_eq!(body.velocity(), Vector2d::new(1.0, 0.5));
        assert_eq!(body.mass(), 3.0);
    }

    #[test]
    fn test_calculate_acceleration_sums_pairs_and_skips_self() {
        let bodies = vec![
            Body::at_rest(1e7, Point::new(0.0, 0.0)),
            Body::at_rest(1e7, Point::new(1.0, 0.0)),
            Body::at_rest(1e7, Point::new(-1.0, 0.0)),
        ];

        // symmetric neighbours cancel and the body itself contributes nothing
        let a = bodies[0].calculate_acceleration(&bodies);
        assert!(a.magnitude() < 1e-18);

        let a = bodies[1].calculate_acceleration(&bodies);
        let expected = -(physics::G * 1e7 + physics::G * 1e7 / 4.0);
        assert!((a.x() - expected).abs() < 1e-15);
        assert_eq!(a.y(), 0.0);
    }

    #[test]
    fn test_calculate_acceleration_of_empty_list() {
        let body = Body::at_rest(1.0, Point::new(0.0, 0.0));
        assert!(body.calculate_acceleration(&[]).is_zero());
    }
}
