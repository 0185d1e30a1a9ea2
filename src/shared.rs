// This file defines the geometry primitives and the simulation interface shared by the
// quadtree and both force strategies.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use nalgebra::{Point2, Vector2};
use num_traits::Zero;

use crate::body::Body;
use crate::error::{Error, Result};

pub type Scalar = f64;

/// A 2-D displacement, velocity or acceleration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector2d(Vector2<Scalar>);

impl Vector2d {
    pub fn new(x: Scalar, y: Scalar) -> Self {
        Self(Vector2::new(x, y))
    }

    pub fn x(&self) -> Scalar {
        self.0.x
    }

    pub fn y(&self) -> Scalar {
        self.0.y
    }

    pub fn scale(self, factor: Scalar) -> Self {
        Self(self.0 * factor)
    }

    pub fn magnitude(&self) -> Scalar {
        self.0.norm()
    }

    pub fn magnitude_squared(&self) -> Scalar {
        self.0.norm_squared()
    }

    pub fn is_finite(&self) -> bool {
        self.0.x.is_finite() && self.0.y.is_finite()
    }
}

impl Zero for Vector2d {
    fn zero() -> Self {
        Self(Vector2::zeros())
    }

    fn is_zero(&self) -> bool {
        self.0.x == 0.0 && self.0.y == 0.0
    }
}

impl Add for Vector2d {
    type Output = Vector2d;
    fn add(self, other: Vector2d) -> Vector2d {
        Vector2d(self.0 + other.0)
    }
}

impl AddAssign for Vector2d {
    fn add_assign(&mut self, other: Vector2d) {
        self.0 += other.0;
    }
}

impl Sub for Vector2d {
    type Output = Vector2d;
    fn sub(self, other: Vector2d) -> Vector2d {
        Vector2d(self.0 - other.0)
    }
}

impl Neg for Vector2d {
    type Output = Vector2d;
    fn neg(self) -> Vector2d {
        Vector2d(-self.0)
    }
}

impl Mul<Scalar> for Vector2d {
    type Output = Vector2d;
    fn mul(self, scalar: Scalar) -> Vector2d {
        self.scale(scalar)
    }
}

impl Sum for Vector2d {
    fn sum<I: Iterator<Item = Vector2d>>(iter: I) -> Vector2d {
        iter.fold(Vector2d::zero(), |acc, v| acc + v)
    }
}

impl fmt::Display for Vector2d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.0.x, self.0.y)
    }
}

/// An immutable 2-D coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point(Point2<Scalar>);

impl Point {
    pub fn new(x: Scalar, y: Scalar) -> Self {
        Self(Point2::new(x, y))
    }

    pub fn x(&self) -> Scalar {
        self.0.x
    }

    pub fn y(&self) -> Scalar {
        self.0.y
    }

    /// Returns this point offset by `v`.
    pub fn translate(&self, v: Vector2d) -> Point {
        Point(self.0 + v.0)
    }

    /// Displacement from `self` to `other` (`other - self`), not a scalar distance.
    pub fn distance(&self, other: &Point) -> Vector2d {
        Vector2d(other.0 - self.0)
    }

    pub fn is_finite(&self) -> bool {
        self.0.x.is_finite() && self.0.y.is_finite()
    }

    /// Mass-weighted average of two points. `total` must be non-zero.
    pub(crate) fn weighted_mean(a: &Point, a_mass: Scalar, b: &Point, b_mass: Scalar) -> Point {
        let total = a_mass + b_mass;
        Point(Point2::from(
            (a.0.coords * a_mass + b.0.coords * b_mass) / total,
        ))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0.x, self.0.y)
    }
}

/// One of the four equal sub-regions of a [`BoundingBox`].
///
/// Coordinates follow screen convention: y grows downward, so "upper" is the
/// half with the smaller y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::UpperLeft,
        Quadrant::UpperRight,
        Quadrant::LowerLeft,
        Quadrant::LowerRight,
    ];

    /// Slot of this quadrant in a node's child array.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Quadrant::UpperLeft => 0,
            Quadrant::UpperRight => 1,
            Quadrant::LowerLeft => 2,
            Quadrant::LowerRight => 3,
        }
    }
}

/// Axis-aligned rectangle covering `[min_x, min_x + width) x [min_y, min_y + height)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    min_x: Scalar,
    min_y: Scalar,
    width: Scalar,
    height: Scalar,
}

impl BoundingBox {
    pub fn new(min_x: Scalar, min_y: Scalar, width: Scalar, height: Scalar) -> Result<Self> {
        let finite = min_x.is_finite() && min_y.is_finite();
        if !finite || !(width > 0.0 && width.is_finite()) || !(height > 0.0 && height.is_finite())
        {
            return Err(Error::DegenerateBounds { width, height });
        }
        Ok(Self {
            min_x,
            min_y,
            width,
            height,
        })
    }

    /// Square box of side `size` centered on the origin.
    pub fn centered(size: Scalar) -> Result<Self> {
        Self::new(-size / 2.0, -size / 2.0, size, size)
    }

    pub fn min_x(&self) -> Scalar {
        self.min_x
    }

    pub fn min_y(&self) -> Scalar {
        self.min_y
    }

    pub fn width(&self) -> Scalar {
        self.width
    }

    pub fn height(&self) -> Scalar {
        self.height
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(
            self.min_x + self.width / 2.0,
            self.min_y + self.height / 2.0,
        )
    }

    /// The longer side, used as the region size in the opening criterion.
    #[inline]
    pub fn size(&self) -> Scalar {
        self.width.max(self.height)
    }

    /// Half-open containment, consistent with [`BoundingBox::quadrant_of`].
    pub fn contains(&self, point: &Point) -> bool {
        point.x() >= self.min_x
            && point.x() < self.min_x + self.width
            && point.y() >= self.min_y
            && point.y() < self.min_y + self.height
    }

    /// Points on a center line belong to the right (x) or lower (y) half.
    pub fn quadrant_of(&self, point: &Point) -> Quadrant {
        let center = self.center();
        let right = point.x() >= center.x();
        let lower = point.y() >= center.y();
        match (lower, right) {
            (false, false) => Quadrant::UpperLeft,
            (false, true) => Quadrant::UpperRight,
            (true, false) => Quadrant::LowerLeft,
            (true, true) => Quadrant::LowerRight,
        }
    }

    /// The sub-box for `quadrant`: half the width and height, tiling the parent.
    pub fn quadrant(&self, quadrant: Quadrant) -> BoundingBox {
        let half_width = self.width / 2.0;
        let half_height = self.height / 2.0;
        let (dx, dy) = match quadrant {
            Quadrant::UpperLeft => (0.0, 0.0),
            Quadrant::UpperRight => (half_width, 0.0),
            Quadrant::LowerLeft => (0.0, half_height),
            Quadrant::LowerRight => (half_width, half_height),
        };
        BoundingBox {
            min_x: self.min_x + dx,
            min_y: self.min_y + dy,
            width: half_width,
            height: half_height,
        }
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}) x [{}, {})",
            self.min_x,
            self.min_x + self.width,
            self.min_y,
            self.min_y + self.height
        )
    }
}

/// Caller-supplied knobs for a simulation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationSettings {
    /// Barnes-Hut opening threshold; 0 forces exact evaluation.
    pub threshold: Scalar,
    /// Timestep used by [`Simulation::step`].
    pub dt: Scalar,
    /// Evaluate per-body forces on the rayon pool.
    pub parallel: bool,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            dt: 0.01,
            parallel: true,
        }
    }
}

impl SimulationSettings {
    pub fn validate(&self) -> Result<()> {
        if !(self.threshold >= 0.0) {
            return Err(Error::InvalidThreshold(self.threshold));
        }
        validate_timestep(self.dt)
    }
}

pub(crate) fn validate_timestep(dt: Scalar) -> Result<()> {
    if dt > 0.0 && dt.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidTimestep(dt))
    }
}

pub trait Simulation {
    /// Validates the settings, resets the clock and computes the initial forces.
    fn init(&mut self) -> Result<()>;
    fn settings(&self) -> &SimulationSettings;
    fn settings_mut(&mut self) -> &mut SimulationSettings;
    fn elapsed(&self) -> Scalar;
    fn update_forces(&mut self) -> Result<()>;
    fn step_by(&mut self, dt: Scalar) -> Result<()>;
    fn step(&mut self) -> Result<()> {
        let dt = self.settings().dt;
        self.step_by(dt)
    }
    fn add_body(&mut self, body: Body);
    fn bodies(&self) -> &[Body];
    fn accelerations(&self) -> &[Vector2d];
}
