use crate::domain::PlacementRecord;

/// Axis-aligned extent on the ground plane (X/Z)
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl Bounds {
    /// Create bounds from a set of points
    pub fn from_points(points: &[(f64, f64)]) -> Option<Self> {
        let (&(x, z), rest) = points.split_first()?;
        let mut bounds = Self {
            min_x: x,
            max_x: x,
            min_z: z,
            max_z: z,
        };
        bounds.expand(rest);
        Some(bounds)
    }

    /// Bounds of every record's anchor position
    pub fn from_records(records: &[PlacementRecord]) -> Option<Self> {
        let points: Vec<(f64, f64)> = records
            .iter()
            .map(|r| (r.position.x, r.position.z))
            .collect();
        Self::from_points(&points)
    }

    /// Expand bounds to include another set of points
    pub fn expand(&mut self, points: &[(f64, f64)]) {
        for &(x, z) in points {
            self.min_x = self.min_x.min(x);
            self.max_x = self.max_x.max(x);
            self.min_z = self.min_z.min(z);
            self.max_z = self.max_z.max(z);
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn depth(&self) -> f64 {
        self.max_z - self.min_z
    }

    /// Strict interior overlap; touching edges do not count
    pub fn overlaps(&self, other: &Bounds) -> bool {
        const EPSILON: f64 = 1e-6;
        self.min_x < other.max_x - EPSILON
            && other.min_x < self.max_x - EPSILON
            && self.min_z < other.max_z - EPSILON
            && other.min_z < self.max_z - EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntityKind, Vec3};

    #[test]
    fn test_bounds_from_points() {
        let points = vec![(0.0, 0.0), (1000.0, 2000.0), (500.0, -1000.0)];
        let bounds = Bounds::from_points(&points).unwrap();

        assert_eq!(bounds.min_x, 0.0);
        assert_eq!(bounds.max_x, 1000.0);
        assert_eq!(bounds.min_z, -1000.0);
        assert_eq!(bounds.max_z, 2000.0);
        assert_eq!(bounds.depth(), 3000.0);
        assert!(Bounds::from_points(&[]).is_none());
    }

    #[test]
    fn test_bounds_from_records() {
        let records = vec![
            PlacementRecord::new(EntityKind::OakTree, Vec3::new(-5.0, 0.0, 2.0)),
            PlacementRecord::new(EntityKind::PineTree, Vec3::new(7.0, 3.0, -4.0)),
        ];
        let bounds = Bounds::from_records(&records).unwrap();
        assert_eq!(bounds.width(), 12.0);
        assert_eq!(bounds.depth(), 6.0);
    }

    #[test]
    fn test_overlaps() {
        let a = Bounds::from_points(&[(0.0, 0.0), (10.0, 10.0)]).unwrap();
        let b = Bounds::from_points(&[(5.0, 5.0), (15.0, 15.0)]).unwrap();
        let touching = Bounds::from_points(&[(10.0, 0.0), (20.0, 10.0)]).unwrap();
        let apart = Bounds::from_points(&[(30.0, 30.0), (40.0, 40.0)]).unwrap();

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&touching));
        assert!(!a.overlaps(&apart));
    }
}
