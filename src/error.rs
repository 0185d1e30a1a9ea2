//! Error types for tree construction and simulation setup.

use thiserror::Error;

use crate::shared::{BoundingBox, Point, Scalar};

/// Errors surfaced by the quadtree and the simulation drivers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A body was inserted outside the world bounding box.
    #[error("position {position} falls outside the bounding box {bounds}")]
    OutOfBounds {
        /// The rejected position.
        position: Point,
        /// The world box it was checked against.
        bounds: BoundingBox,
    },

    /// A bounding box was built with a non-positive or non-finite extent.
    #[error("bounding box must have positive, finite extents, got {width} x {height}")]
    DegenerateBounds {
        /// Requested width.
        width: Scalar,
        /// Requested height.
        height: Scalar,
    },

    /// The Barnes-Hut threshold must be a non-negative number.
    #[error("threshold must be >= 0, got {0}")]
    InvalidThreshold(Scalar),

    /// The timestep must be a positive, finite number.
    #[error("timestep must be > 0, got {0}")]
    InvalidTimestep(Scalar),
}

pub type Result<T> = std::result::Result<T, Error>;
