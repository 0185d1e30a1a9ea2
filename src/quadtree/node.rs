use log::warn;
use num_traits::Zero;

use crate::physics::{self, Centroid};
use crate::shared::{BoundingBox, Point, Quadrant, Scalar, Vector2d};

/// Deepest level a split may reach before two points are treated as one.
pub const MAX_DEPTH: usize = 64;

/// One region of the quadtree.
///
/// A node does not know its own bounding box; the caller passes it down, and each
/// child of an `Internal` node covers the matching [`Quadrant`] of its parent's box.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Node {
    #[default]
    Empty,
    Leaf {
        mass: Scalar,
        position: Point,
    },
    Internal {
        centroid: Centroid,
        // indexed by `Quadrant::index`
        children: Box<[Node; 4]>,
    },
}

impl Node {
    /// Returns the node that replaces `self` once the given point mass is added.
    ///
    /// `bounds` is the region this node covers and must contain `position`.
    pub fn insert(self, mass: Scalar, position: Point, bounds: &BoundingBox) -> Node {
        self.insert_at(mass, position, bounds, 0)
    }

    fn insert_at(self, mass: Scalar, position: Point, bounds: &BoundingBox, depth: usize) -> Node {
        match self {
            Node::Empty => Node::Leaf { mass, position },
            Node::Leaf {
                mass: existing_mass,
                position: existing,
            } => {
                if existing == position {
                    // two bodies at identical coordinates collapse into one heavier point
                    return Node::Leaf {
                        mass: existing_mass + mass,
                        position: existing,
                    };
                }
                Self::split(existing_mass, existing, mass, position, bounds, depth)
            }
            Node::Internal {
                centroid,
                mut children,
            } => {
                let quadrant = bounds.quadrant_of(&position);
                let slot = &mut children[quadrant.index()];
                *slot = std::mem::take(slot).insert_at(
                    mass,
                    position,
                    &bounds.quadrant(quadrant),
                    depth + 1,
                );
                Node::Internal {
                    centroid: centroid.combine(&Centroid::new(mass, position)),
                    children,
                }
            }
        }
    }

    /// Turns a leaf into an internal node holding both points. When both land in the
    /// same quadrant the new point is inserted into the existing leaf one level down,
    /// which splits again until they separate.
    fn split(
        existing_mass: Scalar,
        existing: Point,
        mass: Scalar,
        position: Point,
        bounds: &BoundingBox,
        depth: usize,
    ) -> Node {
        let centroid = Centroid::new(existing_mass, existing).combine(&Centroid::new(mass, position));

        if depth >= MAX_DEPTH {
            warn!(
                "points {} and {} are indistinguishable at depth {}, merging them",
                existing, position, depth
            );
            return Node::Leaf {
                mass: centroid.mass,
                position: centroid.position,
            };
        }

        let mut children: Box<[Node; 4]> = Box::default();
        children[bounds.quadrant_of(&existing).index()] = Node::Leaf {
            mass: existing_mass,
            position: existing,
        };

        let quadrant = bounds.quadrant_of(&position);
        let slot = &mut children[quadrant.index()];
        *slot = std::mem::take(slot).insert_at(mass, position, &bounds.quadrant(quadrant), depth + 1);

        Node::Internal { centroid, children }
    }

    /// Barnes-Hut approximation of the acceleration at `point` due to this subtree.
    ///
    /// An internal node is opened when `point` lies inside its region or when the
    /// region is large relative to the distance to its centroid
    /// (`size >= threshold * distance`). Otherwise its whole subtree acts as a single
    /// mass at the centroid. A threshold of 0 opens every node.
    pub fn calculate_acceleration(&self, point: &Point, bounds: &BoundingBox, threshold: Scalar) -> Vector2d {
        match self {
            Node::Empty => Vector2d::zero(),
            Node::Leaf { mass, position } => {
                physics::calculate_acceleration_on(point, *mass, position)
            }
            Node::Internal { centroid, children } => {
                let distance = point.distance(&centroid.position).magnitude();
                if bounds.contains(point) || bounds.size() >= threshold * distance {
                    Quadrant::ALL
                        .iter()
                        .map(|q| {
                            children[q.index()].calculate_acceleration(
                                point,
                                &bounds.quadrant(*q),
                                threshold,
                            )
                        })
                        .sum()
                } else {
                    physics::calculate_acceleration_on(point, centroid.mass, &centroid.position)
                }
            }
        }
    }

    /// True iff a body is stored exactly at `point` somewhere in this subtree.
    pub fn lookup(&self, point: &Point, bounds: &BoundingBox) -> bool {
        match self {
            Node::Empty => false,
            Node::Leaf { position, .. } => position == point,
            Node::Internal { children, .. } => {
                let quadrant = bounds.quadrant_of(point);
                children[quadrant.index()].lookup(point, &bounds.quadrant(quadrant))
            }
        }
    }

    /// Total mass stored beneath this node.
    pub fn mass(&self) -> Scalar {
        match self {
            Node::Empty => 0.0,
            Node::Leaf { mass, .. } => *mass,
            Node::Internal { centroid, .. } => centroid.mass,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Node::Empty)
    }

    pub fn children(&self) -> Option<&[Node; 4]> {
        match self {
            Node::Internal { children, .. } => Some(&**children),
            _ => None,
        }
    }

    pub fn iter(&self) -> NodeIterator<'_> {
        self.into_iter()
    }
}

/// Breadth-first walk over a subtree, yielding `(depth, node)` pairs.
pub struct NodeIterator<'a> {
    current: Vec<&'a Node>,
    next: Vec<&'a Node>,
    current_index: usize,
    current_depth: usize,
}

impl<'a> Iterator for NodeIterator<'a> {
    type Item = (usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_index < self.current.len() {
            let node = self.current[self.current_index];
            if let Some(children) = node.children() {
                self.next.extend(children.iter());
            }
            self.current_index += 1;
            Some((self.current_depth, node))
        } else if self.next.is_empty() {
            None
        } else {
            self.current = std::mem::take(&mut self.next);
            self.current_index = 0;
            self.current_depth += 1;
            self.next()
        }
    }
}

impl<'a> IntoIterator for &'a Node {
    type Item = (usize, &'a Node);
    type IntoIter = NodeIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        NodeIterator {
            current: vec![self],
            next: Vec::new(),
            current_index: 0,
            current_depth: 0,
        }
    }
}
