//! Layout validation
//!
//! Checks a record list before it is written or after it is loaded:
//! - Non-finite positions or rotations
//! - Size params that are missing, non-numeric or not positive
//! - Building footprints that overlap each other

use crate::domain::PlacementRecord;
use crate::geometry::{Footprint, SpatialHash};

/// Params that must be strictly positive wherever they appear
const SIZE_PARAMS: [&str; 4] = ["width", "height", "depth", "length"];

/// Cell edge for the overlap broad phase, a little above the largest footprint
const OVERLAP_CELL_SIZE: f64 = 32.0;

/// Result of layout validation
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Total number of records validated
    pub total: usize,
    /// Records with NaN/Inf position or rotation
    pub invalid_coords: usize,
    /// Records with a bad size param
    pub invalid_params: usize,
    /// Pairs of buildings whose footprints overlap
    pub overlapping: usize,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// No record would be rejected by a loader
    pub fn is_valid(&self) -> bool {
        self.invalid_coords == 0 && self.invalid_params == 0
    }

    pub fn has_issues(&self) -> bool {
        !self.is_valid() || self.overlapping > 0
    }

    pub fn summary(&self) -> String {
        if !self.has_issues() {
            format!("Layout valid: {} records, no issues", self.total)
        } else {
            format!(
                "Layout issues: {} total, {} invalid coords, {} bad params, {} overlapping buildings",
                self.total, self.invalid_coords, self.invalid_params, self.overlapping
            )
        }
    }
}

/// Validate a record list and return a detailed report
pub fn validate_records(records: &[PlacementRecord]) -> ValidationResult {
    let mut result = ValidationResult {
        total: records.len(),
        ..Default::default()
    };

    for (i, record) in records.iter().enumerate() {
        if has_invalid_coords(record) {
            result.invalid_coords += 1;
            result
                .warnings
                .push(format!("Record {} ({}) has NaN/Inf coordinates", i, record.kind));
            continue;
        }

        if let Some(param) = bad_size_param(record) {
            result.invalid_params += 1;
            result
                .warnings
                .push(format!("Record {} ({}) has invalid {}", i, record.kind, param));
        }
    }

    for (a, b) in overlapping_buildings(records) {
        result.overlapping += 1;
        result.warnings.push(format!(
            "Buildings {} ({}) and {} ({}) overlap",
            a, records[a].kind, b, records[b].kind
        ));
    }

    result
}

fn has_invalid_coords(record: &PlacementRecord) -> bool {
    !record.position.is_finite() || !record.rotation.is_finite()
}

/// First size param that is present but unusable, or a footprint param a building lacks
fn bad_size_param(record: &PlacementRecord) -> Option<&'static str> {
    for name in SIZE_PARAMS {
        if let Some(value) = record.params.get(name) {
            match value.as_f64() {
                Some(v) if v.is_finite() && v > 0.0 => {}
                _ => return Some(name),
            }
        }
    }

    if record.kind.is_building() {
        return ["width", "depth"]
            .into_iter()
            .find(|name| !record.params.contains_key(*name));
    }

    None
}

/// Index pairs `(a, b)` with `a < b` of buildings whose footprints overlap
fn overlapping_buildings(records: &[PlacementRecord]) -> Vec<(usize, usize)> {
    let footprints: Vec<(usize, Footprint)> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.kind.is_building() && !has_invalid_coords(r))
        .filter_map(|(i, r)| Footprint::from_record(r).map(|f| (i, f)))
        .collect();

    let mut hash = SpatialHash::new(OVERLAP_CELL_SIZE);
    for (slot, (_, footprint)) in footprints.iter().enumerate() {
        hash.insert(slot, &footprint.bounds());
    }

    let mut pairs = Vec::new();
    for (slot, (i, footprint)) in footprints.iter().enumerate() {
        for other in hash.query(&footprint.bounds()) {
            if other <= slot {
                continue;
            }
            let (j, other_footprint) = &footprints[other];
            if footprint.overlaps(other_footprint) {
                pairs.push((*i, *j));
            }
        }
    }
    pairs
}

/// Remove records with bad coordinates or params
///
/// Overlaps are reported but kept; which of two buildings to drop is a layout decision.
pub fn validate_and_clean(records: Vec<PlacementRecord>) -> (Vec<PlacementRecord>, ValidationResult) {
    let report = validate_records(&records);
    let cleaned = records
        .into_iter()
        .filter(|r| !has_invalid_coords(r) && bad_size_param(r).is_none())
        .collect();
    (cleaned, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntityKind, Vec3};

    fn house(x: f64, z: f64) -> PlacementRecord {
        PlacementRecord::new(EntityKind::HouseCottage, Vec3::new(x, 0.0, z))
            .with_param("width", 12.0)
            .with_param("height", 8.0)
            .with_param("depth", 12.0)
    }

    #[test]
    fn test_clean_layout() {
        let records = vec![
            house(0.0, 0.0),
            house(12.0, 0.0),
            PlacementRecord::new(EntityKind::OakTree, Vec3::new(3.0, 0.0, 3.0)),
        ];
        let report = validate_records(&records);
        assert!(report.is_valid());
        assert!(!report.has_issues());
        assert_eq!(report.total, 3);
        assert!(report.summary().contains("no issues"));
    }

    #[test]
    fn test_detects_overlap() {
        let records = vec![house(0.0, 0.0), house(100.0, 0.0), house(6.0, 6.0)];
        let report = validate_records(&records);
        assert_eq!(report.overlapping, 1);
        assert!(report.is_valid());
        assert!(report.has_issues());
        assert!(report.warnings[0].contains("Buildings 0"));
    }

    #[test]
    fn test_detects_invalid_coords_and_params() {
        let mut broken = house(0.0, 0.0);
        broken.position.x = f64::NAN;

        let records = vec![
            broken,
            house(50.0, 0.0).with_param("height", 0.0),
            PlacementRecord::new(EntityKind::ModernTower, Vec3::new(-50.0, 0.0, 0.0)),
            PlacementRecord::new(EntityKind::Road, Vec3::new(0.0, 0.05, 0.0))
                .with_param("width", 12.0)
                .with_param("length", -3.0),
        ];
        let report = validate_records(&records);
        assert_eq!(report.invalid_coords, 1);
        assert_eq!(report.invalid_params, 3);
        assert!(!report.is_valid());

        let (cleaned, _) = validate_and_clean(records);
        assert!(cleaned.is_empty());
    }
}
