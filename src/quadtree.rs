/*
 * Quadtree Module
 *
 * Point-region quadtree stored as an arena of nodes addressed by index.
 *
 * A leaf stores up to `capacity` points. The insert that finds a full leaf
 * subdivides it into four equal quadrants and sends the point to one of them.
 * Points already stored in the node stay where they are, so after subdivision
 * an internal node keeps the points it had and every later point goes to a
 * child. Points on a center line go north/west.
 */

use nannou::prelude::Vec2;

use crate::error::{SimError, SimResult};

/// Axis-aligned rectangle given by its center and half extents. Edges are
/// inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    pub center_x: f32,
    pub center_y: f32,
    pub half_width: f32,
    pub half_height: f32,
}

impl Boundary {
    pub fn new(center_x: f32, center_y: f32, half_width: f32, half_height: f32) -> Self {
        Self { center_x, center_y, half_width, half_height }
    }

    /// Boundary covering `[0, width] x [0, height]`.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(width / 2.0, height / 2.0, width / 2.0, height / 2.0)
    }

    pub fn left(&self) -> f32 {
        self.center_x - self.half_width
    }

    pub fn right(&self) -> f32 {
        self.center_x + self.half_width
    }

    pub fn top(&self) -> f32 {
        self.center_y - self.half_height
    }

    pub fn bottom(&self) -> f32 {
        self.center_y + self.half_height
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left() && point.x <= self.right() && point.y >= self.top() && point.y <= self.bottom()
    }

    pub fn intersects(&self, other: &Boundary) -> bool {
        !(self.left() > other.right()
            || self.right() < other.left()
            || self.top() > other.bottom()
            || self.bottom() < other.top())
    }

    /// The four quadrants in NW, NE, SW, SE order.
    fn quadrants(&self) -> [Boundary; 4] {
        let hw = self.half_width / 2.0;
        let hh = self.half_height / 2.0;
        let (x, y) = (self.center_x, self.center_y);
        [
            Boundary::new(x - hw, y - hh, hw, hh),
            Boundary::new(x + hw, y - hh, hw, hh),
            Boundary::new(x - hw, y + hh, hw, hh),
            Boundary::new(x + hw, y + hh, hw, hh),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    NorthWest = 0,
    NorthEast = 1,
    SouthWest = 2,
    SouthEast = 3,
}

impl Quadrant {
    /// Quadrant of `boundary` a point belongs to. Ties go north/west.
    pub fn of(boundary: &Boundary, point: Vec2) -> Quadrant {
        let west = point.x <= boundary.center_x;
        let north = point.y <= boundary.center_y;
        match (north, west) {
            (true, true) => Quadrant::NorthWest,
            (true, false) => Quadrant::NorthEast,
            (false, true) => Quadrant::SouthWest,
            (false, false) => Quadrant::SouthEast,
        }
    }
}

#[derive(Debug, Clone)]
pub struct QuadtreeNode {
    pub boundary: Boundary,
    pub points: Vec<Vec2>,
    /// Indices into `Quadtree::nodes`, NW, NE, SW, SE.
    pub children: Option<[usize; 4]>,
}

impl QuadtreeNode {
    fn leaf(boundary: Boundary) -> Self {
        Self { boundary, points: Vec::new(), children: None }
    }

    pub fn is_divided(&self) -> bool {
        self.children.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct Quadtree {
    nodes: Vec<QuadtreeNode>,
    capacity: usize,
}

impl Quadtree {
    pub const ROOT: usize = 0;

    pub fn new(boundary: Boundary, capacity: usize) -> SimResult<Self> {
        if capacity == 0 {
            return Err(SimError::InvalidCapacity);
        }
        if !(boundary.half_width > 0.0 && boundary.half_height > 0.0) {
            return Err(SimError::InvalidBoundary {
                half_width: boundary.half_width,
                half_height: boundary.half_height,
            });
        }

        Ok(Self {
            nodes: vec![QuadtreeNode::leaf(boundary)],
            capacity,
        })
    }

    pub fn boundary(&self) -> Boundary {
        self.nodes[Self::ROOT].boundary
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn node(&self, index: usize) -> Option<&QuadtreeNode> {
        self.nodes.get(index)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_divided(&self, index: usize) -> bool {
        self.nodes.get(index).map_or(false, QuadtreeNode::is_divided)
    }

    /// Insert a point. Points outside the root boundary are dropped and
    /// `false` is returned.
    pub fn insert(&mut self, point: Vec2) -> bool {
        let mut index = Self::ROOT;

        loop {
            let node = &self.nodes[index];
            if !node.boundary.contains(point) {
                return false;
            }

            if node.children.is_none() && node.points.len() < self.capacity {
                self.nodes[index].points.push(point);
                return true;
            }

            let children = self.subdivide(index);
            let quadrant = Quadrant::of(&self.nodes[index].boundary, point);
            index = children[quadrant as usize];
        }
    }

    /// Split a node into four children. Calling it on a node that is
    /// already divided returns the existing children.
    pub fn subdivide(&mut self, index: usize) -> [usize; 4] {
        if let Some(children) = self.nodes[index].children {
            return children;
        }

        let first = self.nodes.len();
        for quadrant in self.nodes[index].boundary.quadrants() {
            self.nodes.push(QuadtreeNode::leaf(quadrant));
        }

        let children = [first, first + 1, first + 2, first + 3];
        self.nodes[index].children = Some(children);
        children
    }

    /// Every stored point inside `range`.
    pub fn query(&self, range: &Boundary) -> Vec<Vec2> {
        let mut found = Vec::new();
        let mut stack = vec![Self::ROOT];

        while let Some(index) = stack.pop() {
            let node = &self.nodes[index];
            if !node.boundary.intersects(range) {
                continue;
            }

            found.extend(node.points.iter().copied().filter(|p| range.contains(*p)));

            if let Some(children) = node.children {
                // Reversed so children are visited NW, NE, SW, SE.
                stack.extend(children.iter().rev());
            }
        }

        found
    }

    pub fn all_points(&self) -> Vec<Vec2> {
        self.query(&self.boundary())
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.nodes.iter().map(|n| n.points.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Boundaries of every node, root first.
    pub fn boundaries(&self) -> impl Iterator<Item = &Boundary> + '_ {
        self.nodes.iter().map(|n| &n.boundary)
    }

    pub fn clear(&mut self) {
        let boundary = self.boundary();
        self.nodes.clear();
        self.nodes.push(QuadtreeNode::leaf(boundary));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nannou::prelude::vec2;

    fn tree(capacity: usize) -> Quadtree {
        Quadtree::new(Boundary::new(50.0, 50.0, 50.0, 50.0), capacity).unwrap()
    }

    #[test]
    fn test_rejects_bad_construction() {
        let b = Boundary::new(0.0, 0.0, 10.0, 10.0);
        assert!(matches!(Quadtree::new(b, 0), Err(SimError::InvalidCapacity)));
        assert!(matches!(
            Quadtree::new(Boundary::new(0.0, 0.0, 0.0, 10.0), 4),
            Err(SimError::InvalidBoundary { .. })
        ));
    }

    #[test]
    fn test_subdivides_once_on_overflow() {
        let mut qt = tree(4);
        for (i, p) in [vec2(10.0, 10.0), vec2(20.0, 80.0), vec2(70.0, 30.0), vec2(90.0, 90.0)]
            .into_iter()
            .enumerate()
        {
            assert!(qt.insert(p));
            assert!(!qt.is_divided(Quadtree::ROOT), "divided after {} points", i + 1);
        }

        let last = vec2(60.0, 60.0);
        assert!(qt.insert(last));
        assert!(qt.is_divided(Quadtree::ROOT));
        assert_eq!(qt.node_count(), 5);

        // Existing points stay in the root.
        assert_eq!(qt.node(Quadtree::ROOT).map(|n| n.points.len()), Some(4));
        assert!(qt.all_points().contains(&last));
        assert!(qt.query(&qt.boundary()).contains(&last));
        assert_eq!(qt.len(), 5);
    }

    #[test]
    fn test_subdivide_is_idempotent() {
        let mut qt = tree(1);
        let first = qt.subdivide(Quadtree::ROOT);
        let second = qt.subdivide(Quadtree::ROOT);
        assert_eq!(first, second);
        assert_eq!(qt.node_count(), 5);
    }

    #[test]
    fn test_children_quarter_parent() {
        let mut qt = tree(1);
        let [nw, ne, sw, se] = qt.subdivide(Quadtree::ROOT);
        let b = |i: usize| qt.node(i).map(|n| n.boundary);
        assert_eq!(b(nw), Some(Boundary::new(25.0, 25.0, 25.0, 25.0)));
        assert_eq!(b(ne), Some(Boundary::new(75.0, 25.0, 25.0, 25.0)));
        assert_eq!(b(sw), Some(Boundary::new(25.0, 75.0, 25.0, 25.0)));
        assert_eq!(b(se), Some(Boundary::new(75.0, 75.0, 25.0, 25.0)));
    }

    #[test]
    fn test_ties_go_north_west() {
        let b = Boundary::new(50.0, 50.0, 50.0, 50.0);
        assert_eq!(Quadrant::of(&b, vec2(50.0, 50.0)), Quadrant::NorthWest);
        assert_eq!(Quadrant::of(&b, vec2(50.1, 50.0)), Quadrant::NorthEast);
        assert_eq!(Quadrant::of(&b, vec2(50.0, 50.1)), Quadrant::SouthWest);

        let mut qt = tree(1);
        qt.insert(vec2(1.0, 1.0));
        qt.insert(vec2(50.0, 50.0));
        let [nw, ..] = qt.subdivide(Quadtree::ROOT);
        assert_eq!(qt.node(nw).map(|n| n.points.clone()), Some(vec![vec2(50.0, 50.0)]));
    }

    #[test]
    fn test_outside_points_are_dropped() {
        let mut qt = tree(2);
        assert!(!qt.insert(vec2(-1.0, 50.0)));
        assert!(!qt.insert(vec2(50.0, 100.5)));
        assert!(qt.insert(vec2(100.0, 100.0)));
        assert_eq!(qt.len(), 1);
    }

    #[test]
    fn test_query_prunes_and_filters() {
        let mut qt = tree(1);
        let points = [vec2(10.0, 10.0), vec2(12.0, 14.0), vec2(80.0, 80.0), vec2(90.0, 15.0), vec2(30.0, 70.0)];
        for p in points {
            qt.insert(p);
        }

        let near_origin = qt.query(&Boundary::new(10.0, 10.0, 5.0, 5.0));
        assert_eq!(near_origin.len(), 2);
        assert!(near_origin.contains(&vec2(12.0, 14.0)));

        let everything = qt.query(&Boundary::new(50.0, 50.0, 60.0, 60.0));
        assert_eq!(everything.len(), points.len());
    }

    #[test]
    fn test_disjoint_query_is_empty() {
        let mut qt = tree(2);
        for i in 0..10 {
            qt.insert(vec2(i as f32 * 9.0, i as f32 * 9.0));
        }
        assert!(qt.query(&Boundary::new(500.0, 500.0, 20.0, 20.0)).is_empty());
    }

    #[test]
    fn test_clear_resets_to_single_leaf() {
        let mut qt = tree(1);
        for i in 0..6 {
            qt.insert(vec2(5.0 + i as f32 * 15.0, 50.0));
        }
        qt.clear();
        assert_eq!(qt.node_count(), 1);
        assert!(qt.is_empty());
        assert_eq!(qt.boundaries().count(), 1);
    }
}
