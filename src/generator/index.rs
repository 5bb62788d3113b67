use std::collections::HashMap;

use crate::domain::{Axis, RoadClass, RoadSegment};

/// Integer grid node `(x, z)`
pub type GridPoint = (i32, i32);

/// Which grid nodes carry pavement, tracked separately per axis.
///
/// Each node remembers the widest class covering it on that axis, so crossing
/// geometry can be derived from the roads actually present. Lives for one run.
#[derive(Debug, Default)]
pub struct RoadPointIndex {
    vertical: HashMap<GridPoint, RoadClass>,
    horizontal: HashMap<GridPoint, RoadClass>,
}

impl RoadPointIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark every node of `segment` at `step` resolution
    pub fn register(&mut self, segment: &RoadSegment, step: i32) {
        for point in segment.nodes(step) {
            self.insert(segment.axis, point, segment.class);
        }
    }

    pub fn insert(&mut self, axis: Axis, point: GridPoint, class: RoadClass) {
        self.points_mut(axis)
            .entry(point)
            .and_modify(|existing| *existing = (*existing).max(class))
            .or_insert(class);
    }

    pub fn at(&self, axis: Axis, x: i32, z: i32) -> Option<RoadClass> {
        self.points(axis).get(&(x, z)).copied()
    }

    pub fn vertical_at(&self, x: i32, z: i32) -> Option<RoadClass> {
        self.at(Axis::Vertical, x, z)
    }

    pub fn horizontal_at(&self, x: i32, z: i32) -> Option<RoadClass> {
        self.at(Axis::Horizontal, x, z)
    }

    /// Classes of both roads when pavement on each axis meets at `(x, z)`
    pub fn crossing(&self, x: i32, z: i32) -> Option<(RoadClass, RoadClass)> {
        Some((self.vertical_at(x, z)?, self.horizontal_at(x, z)?))
    }

    /// Number of paved nodes on one axis
    pub fn len(&self, axis: Axis) -> usize {
        self.points(axis).len()
    }

    fn points(&self, axis: Axis) -> &HashMap<GridPoint, RoadClass> {
        match axis {
            Axis::Vertical => &self.vertical,
            Axis::Horizontal => &self.horizontal,
        }
    }

    fn points_mut(&mut self, axis: Axis) -> &mut HashMap<GridPoint, RoadClass> {
        match axis {
            Axis::Vertical => &mut self.vertical,
            Axis::Horizontal => &mut self.horizontal,
        }
    }
}
