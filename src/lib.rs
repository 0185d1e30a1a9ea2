pub mod body;
pub mod error;
pub mod physics;
pub mod quadtree;
pub mod shared;
pub mod simulation;

pub use error::{Error, Result};
