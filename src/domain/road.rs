use std::f64::consts::FRAC_PI_2;

use crate::config::dims;

/// Road hierarchy, ordered from narrowest to widest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RoadClass {
    Residential,
    City,
    Arterial,
}

impl RoadClass {
    /// Full paved width
    pub fn width(self) -> f64 {
        match self {
            RoadClass::Arterial => dims::ARTERIAL_WIDTH,
            RoadClass::City => dims::CITY_WIDTH,
            RoadClass::Residential => dims::RESIDENTIAL_WIDTH,
        }
    }

    pub fn half_width(self) -> f64 {
        self.width() / 2.0
    }
}

/// Direction a road runs in.
///
/// Vertical roads run along Z at a fixed X; horizontal roads run along X at a fixed Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Vertical,
    Horizontal,
}

impl Axis {
    pub const BOTH: [Axis; 2] = [Axis::Vertical, Axis::Horizontal];

    /// Yaw applied to a road ribbon laid along this axis
    pub fn yaw(self) -> f64 {
        match self {
            Axis::Vertical => 0.0,
            Axis::Horizontal => FRAC_PI_2,
        }
    }

    /// Grid point `(x, z)` for a road fixed at `fixed`, at `along` on its length
    pub fn grid_point(self, fixed: i32, along: i32) -> (i32, i32) {
        match self {
            Axis::Vertical => (fixed, along),
            Axis::Horizontal => (along, fixed),
        }
    }

    /// World `(x, z)` for a point `across` units off the road line at `along`
    pub fn world_point(self, across: f64, along: f64) -> (f64, f64) {
        match self {
            Axis::Vertical => (across, along),
            Axis::Horizontal => (along, across),
        }
    }

    pub fn perpendicular(self) -> Axis {
        match self {
            Axis::Vertical => Axis::Horizontal,
            Axis::Horizontal => Axis::Vertical,
        }
    }
}

/// A straight run of pavement on one grid line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoadSegment {
    pub axis: Axis,
    /// Coordinate of the grid line (X for vertical, Z for horizontal)
    pub fixed: i32,
    pub start: i32,
    pub end: i32,
    pub class: RoadClass,
}

impl RoadSegment {
    pub fn new(axis: Axis, fixed: i32, start: i32, end: i32, class: RoadClass) -> Self {
        debug_assert!(start < end, "segment must have positive length");
        Self {
            axis,
            fixed,
            start,
            end,
            class,
        }
    }

    pub fn center(&self) -> f64 {
        (self.start as f64 + self.end as f64) / 2.0
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start) as f64
    }

    /// Grid nodes covered by this segment, both ends included
    pub fn nodes(&self, step: i32) -> impl Iterator<Item = (i32, i32)> + use<> {
        let (axis, fixed) = (self.axis, self.fixed);
        (self.start..=self.end)
            .step_by(step as usize)
            .map(move |along| axis.grid_point(fixed, along))
    }

    /// Consecutive `(from, to)` spans of `step` length between grid nodes
    pub fn blocks(&self, step: i32) -> impl Iterator<Item = (i32, i32)> + use<> {
        let end = self.end;
        (self.start..end)
            .step_by(step as usize)
            .map(move |from| (from, (from + step).min(end)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_road_class_widths() {
        assert_eq!(RoadClass::Arterial.width(), 22.0);
        assert_eq!(RoadClass::City.half_width(), 6.0);
        assert_eq!(RoadClass::Residential.half_width(), 5.0);
    }

    #[test]
    fn test_road_class_ordering() {
        assert!(RoadClass::Arterial > RoadClass::City);
        assert!(RoadClass::City > RoadClass::Residential);
        assert_eq!(RoadClass::City.max(RoadClass::Arterial), RoadClass::Arterial);
    }

    #[test]
    fn test_segment_geometry() {
        let seg = RoadSegment::new(Axis::Horizontal, 300, -1000, -800, RoadClass::Residential);
        assert_eq!(seg.center(), -900.0);
        assert_eq!(seg.length(), 200.0);

        let nodes: Vec<_> = seg.nodes(100).collect();
        assert_eq!(nodes, vec![(-1000, 300), (-900, 300), (-800, 300)]);
    }

    #[test]
    fn test_segment_blocks() {
        let seg = RoadSegment::new(Axis::Vertical, 0, -200, 100, RoadClass::City);
        let blocks: Vec<_> = seg.blocks(100).collect();
        assert_eq!(blocks, vec![(-200, -100), (-100, 0), (0, 100)]);
    }

    #[test]
    fn test_axis_points() {
        assert_eq!(Axis::Vertical.grid_point(5, 7), (5, 7));
        assert_eq!(Axis::Horizontal.grid_point(5, 7), (7, 5));
        assert_eq!(Axis::Horizontal.world_point(1.5, -2.0), (-2.0, 1.5));
        assert_eq!(Axis::Vertical.perpendicular(), Axis::Horizontal);
    }
}
