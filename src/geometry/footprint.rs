use crate::domain::PlacementRecord;

use super::Bounds;

/// Ground-plane rectangle a building occupies
#[derive(Debug, Clone, PartialEq)]
pub struct Footprint {
    pub center: (f64, f64),
    /// Extent along the building's local X axis
    pub width: f64,
    /// Extent along the building's local Z axis
    pub depth: f64,
    pub yaw: f64,
}

impl Footprint {
    /// Footprint of a record carrying `width` and `depth` params
    pub fn from_record(record: &PlacementRecord) -> Option<Self> {
        Some(Self {
            center: (record.position.x, record.position.z),
            width: record.param_f64("width")?,
            depth: record.param_f64("depth")?,
            yaw: record.yaw(),
        })
    }

    /// World-aligned box enclosing the rotated rectangle
    pub fn bounds(&self) -> Bounds {
        let (sin, cos) = self.yaw.sin_cos();
        let half_x = (cos * self.width).abs() / 2.0 + (sin * self.depth).abs() / 2.0;
        let half_z = (sin * self.width).abs() / 2.0 + (cos * self.depth).abs() / 2.0;
        let (x, z) = self.center;
        Bounds {
            min_x: x - half_x,
            max_x: x + half_x,
            min_z: z - half_z,
            max_z: z + half_z,
        }
    }

    pub fn overlaps(&self, other: &Footprint) -> bool {
        self.bounds().overlaps(&other.bounds())
    }
}
