//! Barnes-Hut quadtree over a fixed world bounding box.
//!
//! The tree is meant to be rebuilt from scratch every tick: bodies move, so the
//! partition goes stale as soon as they are updated. Build it completely, then query
//! it; queries take `&self` and may run concurrently once construction is done.

mod node;

#[cfg(test)]
pub(crate) mod fixtures;

pub use node::{MAX_DEPTH, Node, NodeIterator};

use log::debug;
use num_traits::Zero;

use crate::error::{Error, Result};
use crate::shared::{BoundingBox, Point, Scalar, Vector2d};

#[derive(Debug, Clone, PartialEq)]
pub struct QuadTree {
    root: Node,
    bounds: BoundingBox,
}

impl QuadTree {
    pub fn new(bounds: BoundingBox) -> Self {
        Self {
            root: Node::Empty,
            bounds,
        }
    }

    /// Builds a tree from `(mass, position)` pairs, failing on the first position
    /// outside `bounds`.
    pub fn build(bounds: BoundingBox, bodies: impl IntoIterator<Item = (Scalar, Point)>) -> Result<Self> {
        let mut tree = Self::new(bounds);
        for (mass, position) in bodies {
            tree.insert(mass, position)?;
        }
        debug!(
            "built quadtree with {} leaves, depth {}",
            tree.len(),
            tree.depth()
        );
        Ok(tree)
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Adds a point mass. Positions outside the world box are rejected, never
    /// clamped or dropped.
    pub fn insert(&mut self, mass: Scalar, position: Point) -> Result<()> {
        if !self.bounds.contains(&position) {
            return Err(Error::OutOfBounds {
                position,
                bounds: self.bounds,
            });
        }
        let root = std::mem::take(&mut self.root);
        self.root = root.insert(mass, position, &self.bounds);
        Ok(())
    }

    pub fn calculate_acceleration(&self, point: &Point, threshold: Scalar) -> Vector2d {
        if self.root.is_empty() {
            return Vector2d::zero();
        }
        self.root.calculate_acceleration(point, &self.bounds, threshold)
    }

    pub fn lookup(&self, point: &Point) -> bool {
        self.root.lookup(point, &self.bounds)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Number of stored leaves. Coincident insertions share one leaf.
    pub fn len(&self) -> usize {
        self.iter()
            .filter(|(_, node)| matches!(node, Node::Leaf { .. }))
            .count()
    }

    pub fn depth(&self) -> usize {
        self.iter().map(|(depth, _)| depth).max().unwrap_or(0)
    }

    pub fn total_mass(&self) -> Scalar {
        self.root.mass()
    }

    pub fn iter(&self) -> NodeIterator<'_> {
        self.root.iter()
    }
}
