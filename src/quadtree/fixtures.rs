//! Hand-built reference trees over the box (0, 0, 4, 4), used to check the shape
//! insertion produces.
//!
//! Centroids are combined in insertion order so they compare bit-for-bit with the
//! trees `QuadTree::insert` builds.

use super::{Node, QuadTree};
use crate::physics::Centroid;
use crate::shared::{BoundingBox, Point, Scalar};

pub fn bounds() -> BoundingBox {
    BoundingBox::new(0.0, 0.0, 4.0, 4.0).unwrap()
}

pub fn p1() -> Point {
    Point::new(1.5, 2.5)
}

pub fn p2() -> Point {
    Point::new(2.1, 2.1)
}

pub fn p3() -> Point {
    Point::new(1.0, 1.0)
}

pub fn p4() -> Point {
    Point::new(2.6, 2.8)
}

fn leaf(mass: Scalar, position: Point) -> Node {
    Node::Leaf { mass, position }
}

/// Children in `Quadrant::index` order: upper-left, upper-right, lower-left, lower-right.
fn internal(centroid: Centroid, children: [Node; 4]) -> Node {
    Node::Internal {
        centroid,
        children: Box::new(children),
    }
}

fn tree(root: Node) -> QuadTree {
    let mut q = QuadTree::new(bounds());
    q.root = root;
    q
}

/// Nothing inserted.
pub fn q0() -> QuadTree {
    QuadTree::new(bounds())
}

/// 1.0 at p1.
pub fn q1() -> QuadTree {
    tree(leaf(1.0, p1()))
}

/// q1 plus 1.0 at p2: the leaf splits into lower-left and lower-right.
pub fn q2() -> QuadTree {
    let c12 = Centroid::new(1.0, p1()).combine(&Centroid::new(1.0, p2()));
    tree(internal(
        c12,
        [Node::Empty, Node::Empty, leaf(1.0, p1()), leaf(1.0, p2())],
    ))
}

/// q2 plus 2.0 at p3, which fills the empty upper-left quadrant.
pub fn q3() -> QuadTree {
    let c12 = Centroid::new(1.0, p1()).combine(&Centroid::new(1.0, p2()));
    let c123 = c12.combine(&Centroid::new(2.0, p3()));
    tree(internal(
        c123,
        [leaf(2.0, p3()), Node::Empty, leaf(1.0, p1()), leaf(1.0, p2())],
    ))
}

/// q3 plus 1.0 at p4. p2 and p4 share the lower-right quadrant and its upper-left
/// sub-quadrant, so the split nests two levels before they separate.
pub fn q4() -> QuadTree {
    let c12 = Centroid::new(1.0, p1()).combine(&Centroid::new(1.0, p2()));
    let c1234 = c12
        .combine(&Centroid::new(2.0, p3()))
        .combine(&Centroid::new(1.0, p4()));
    let c24 = Centroid::new(1.0, p2()).combine(&Centroid::new(1.0, p4()));

    let nested = internal(
        c24,
        [leaf(1.0, p2()), Node::Empty, Node::Empty, leaf(1.0, p4())],
    );
    let lower_right = internal(c24, [nested, Node::Empty, Node::Empty, Node::Empty]);

    tree(internal(
        c1234,
        [leaf(2.0, p3()), Node::Empty, leaf(1.0, p1()), lower_right],
    ))
}
