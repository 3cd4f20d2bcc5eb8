//! Frame-relative placement helpers (next to, edge of frame, origin).

use aeon_core::{EDGE_BUFF, FRAME_HEIGHT, FRAME_WIDTH, NEXT_TO_BUFF, Shape};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn vector(&self) -> [f64; 2] {
        match self {
            Self::Up => [0.0, 1.0],
            Self::Down => [0.0, -1.0],
            Self::Left => [-1.0, 0.0],
            Self::Right => [1.0, 0.0],
        }
    }
}

/// Where a group should end up after a zoom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Scale in place
    Keep,
    /// Centre on the frame origin
    Origin,
    /// Push against a frame edge, keeping the other coordinate
    Edge(Direction),
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub center: [f64; 2],
    pub half: [f64; 2],
}

impl Bounds {
    pub fn new(center: [f64; 2], half: [f64; 2]) -> Self {
        Self { center, half }
    }

    /// Bounds of `shape` placed at `position` and scaled by `scale`
    pub fn of_shape(shape: &Shape, position: [f64; 2], scale: f64) -> Self {
        let [hx, hy] = shape.half_extent();
        Self::new(position, [hx * scale, hy * scale])
    }

    pub fn left(&self) -> f64 {
        self.center[0] - self.half[0]
    }

    pub fn right(&self) -> f64 {
        self.center[0] + self.half[0]
    }

    pub fn bottom(&self) -> f64 {
        self.center[1] - self.half[1]
    }

    pub fn top(&self) -> f64 {
        self.center[1] + self.half[1]
    }

    pub fn union(&self, other: &Self) -> Self {
        let left = self.left().min(other.left());
        let right = self.right().max(other.right());
        let bottom = self.bottom().min(other.bottom());
        let top = self.top().max(other.top());
        Self::new(
            [(left + right) / 2.0, (bottom + top) / 2.0],
            [(right - left) / 2.0, (top - bottom) / 2.0],
        )
    }

    /// Same centre, half extents multiplied by `k`
    pub fn scaled(&self, k: f64) -> Self {
        Self::new(self.center, [self.half[0] * k, self.half[1] * k])
    }
}

/// Centre for an element of half extent `half` placed beside `anchor`
pub fn next_to(anchor: &Bounds, half: [f64; 2], direction: Direction) -> [f64; 2] {
    let [dx, dy] = direction.vector();
    [
        anchor.center[0] + dx * (anchor.half[0] + NEXT_TO_BUFF + half[0]),
        anchor.center[1] + dy * (anchor.half[1] + NEXT_TO_BUFF + half[1]),
    ]
}

/// Centre for bounds `b` once pushed against a frame edge
pub fn to_edge(b: &Bounds, direction: Direction) -> [f64; 2] {
    let [cx, cy] = b.center;
    match direction {
        Direction::Up => [cx, FRAME_HEIGHT / 2.0 - EDGE_BUFF - b.half[1]],
        Direction::Down => [cx, -FRAME_HEIGHT / 2.0 + EDGE_BUFF + b.half[1]],
        Direction::Left => [-FRAME_WIDTH / 2.0 + EDGE_BUFF + b.half[0], cy],
        Direction::Right => [FRAME_WIDTH / 2.0 - EDGE_BUFF - b.half[0], cy],
    }
}

/// Centre where bounds `b` end up for `target`
pub fn resolve(b: &Bounds, target: Target) -> [f64; 2] {
    match target {
        Target::Keep => b.center,
        Target::Origin => [0.0, 0.0],
        Target::Edge(direction) => to_edge(b, direction),
    }
}

/// Centre of a fresh element of `shape` pushed against an edge of the frame
pub fn shape_to_edge(shape: &Shape, direction: Direction) -> [f64; 2] {
    to_edge(&Bounds::of_shape(shape, [0.0, 0.0], 1.0), direction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_to_keeps_buffer() {
        let dot = Bounds::new([1.0, 2.0], [0.1, 0.1]);
        let above = next_to(&dot, [0.5, 0.2], Direction::Up);
        assert_eq!(above[0], 1.0);
        assert!((above[1] - (2.0 + 0.1 + NEXT_TO_BUFF + 0.2)).abs() < 1e-12);
        let below = next_to(&dot, [0.5, 0.2], Direction::Down);
        assert!(below[1] < dot.bottom());
    }

    #[test]
    fn test_to_edge_respects_frame() {
        let b = Bounds::new([3.0, 1.0], [2.0, 1.0]);
        let left = to_edge(&b, Direction::Left);
        assert!((left[0] - 2.0 - (-FRAME_WIDTH / 2.0 + EDGE_BUFF)).abs() < 1e-12);
        assert_eq!(left[1], 1.0);
        let up = to_edge(&b, Direction::Up);
        assert!((up[1] + 1.0 - (FRAME_HEIGHT / 2.0 - EDGE_BUFF)).abs() < 1e-12);
        assert_eq!(resolve(&b, Target::Origin), [0.0, 0.0]);
        assert_eq!(resolve(&b, Target::Keep), b.center);
    }

    #[test]
    fn test_union_covers_both() {
        let a = Bounds::new([0.0, 0.0], [1.0, 1.0]);
        let b = Bounds::new([3.0, 0.5], [0.5, 0.5]);
        let u = a.union(&b);
        assert_eq!(u.left(), -1.0);
        assert_eq!(u.right(), 3.5);
        assert_eq!(u.top(), 1.0);
        assert_eq!(u.bottom(), -1.0);
    }
}
