use crate::config::{MapConfig, dims};
use crate::domain::{Axis, EntityKind, PlacementRecord, RoadClass, RoadSegment, Vec3};

use super::index::RoadPointIndex;
use super::rng::CityRng;

/// All road segments of one run together with their paved-node index
#[derive(Debug, Default)]
pub struct RoadNetwork {
    pub segments: Vec<RoadSegment>,
    pub index: RoadPointIndex,
}

impl RoadNetwork {
    /// Distinct grid lines on `axis` that carry at least one segment, ascending
    pub fn lines(&self, axis: Axis) -> Vec<i32> {
        let mut lines: Vec<i32> = self
            .segments
            .iter()
            .filter(|s| s.axis == axis)
            .map(|s| s.fixed)
            .collect();
        lines.sort_unstable();
        lines.dedup();
        lines
    }

    pub fn segments_of(&self, class: RoadClass) -> impl Iterator<Item = &RoadSegment> {
        self.segments.iter().filter(move |s| s.class == class)
    }
}

/// Lay out the road grid for both axes.
///
/// # Algorithm
/// For every street-spaced coordinate on an axis:
/// - arterial multiples get one full-length arterial
/// - downtown coordinates get a continuous city street across downtown, plus
///   gapped residential extensions when aligned to the suburb block grid
/// - remaining suburb-block multiples get gapped residential lanes map-wide
///
/// Every kept segment registers its nodes in the index, arterials included.
pub fn build_road_grid(config: &MapConfig, rng: &mut CityRng) -> RoadNetwork {
    let mut network = RoadNetwork::default();

    for axis in Axis::BOTH {
        for fixed in config.grid_lines() {
            for segment in line_segments(axis, fixed, config, rng) {
                network.index.register(&segment, config.street_spacing);
                network.segments.push(segment);
            }
        }
    }

    log::debug!(
        "Road grid: {} segments, {} vertical / {} horizontal paved nodes",
        network.segments.len(),
        network.index.len(Axis::Vertical),
        network.index.len(Axis::Horizontal)
    );

    network
}

/// Segments on a single grid line
fn line_segments(
    axis: Axis,
    fixed: i32,
    config: &MapConfig,
    rng: &mut CityRng,
) -> Vec<RoadSegment> {
    let half = config.half_size();
    let downtown_half = config.downtown_half();
    let block = config.suburb_block_size;

    if config.is_arterial_line(fixed) {
        return vec![RoadSegment::new(axis, fixed, -half, half, RoadClass::Arterial)];
    }

    let mut segments = Vec::new();
    let residential = |(start, end): (i32, i32)| {
        RoadSegment::new(axis, fixed, start, end, RoadClass::Residential)
    };

    if fixed.abs() <= downtown_half {
        segments.push(RoadSegment::new(
            axis,
            fixed,
            -downtown_half,
            downtown_half,
            RoadClass::City,
        ));

        if config.is_suburb_block_line(fixed) {
            let mut pieces = tile_span(-half, -downtown_half, block, false);
            pieces.extend(tile_span(downtown_half, half, block, true));
            for piece in pieces {
                if rng.chance(config.downtown_lane_keep) {
                    segments.push(residential(piece));
                }
            }
        }
    } else if config.is_suburb_block_line(fixed) {
        for piece in tile_span(-half, half, block, false) {
            if rng.chance(config.suburb_lane_keep) {
                segments.push(residential(piece));
            }
        }
    }

    segments
}

/// Split `[low, high]` into `block`-sized pieces, ascending.
///
/// Pieces are anchored at `low`, or at `high` when `anchor_high` is set, so the
/// grid stays aligned to the map edge; the piece at the far end is clipped.
fn tile_span(low: i32, high: i32, block: i32, anchor_high: bool) -> Vec<(i32, i32)> {
    let mut pieces = Vec::new();
    if anchor_high {
        let mut end = high;
        while end > low {
            let start = (end - block).max(low);
            pieces.push((start, end));
            end = start;
        }
        pieces.reverse();
    } else {
        let mut start = low;
        while start < high {
            let end = (start + block).min(high);
            pieces.push((start, end));
            start = end;
        }
    }
    pieces
}

/// Road ribbon record for a segment
pub fn road_record(segment: &RoadSegment) -> PlacementRecord {
    let (x, z) = segment
        .axis
        .world_point(segment.fixed as f64, segment.center());
    PlacementRecord::new(EntityKind::Road, Vec3::new(x, dims::ROAD_Y, z))
        .with_yaw(segment.axis.yaw())
        .with_param("width", segment.class.width())
        .with_param("length", segment.length())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(config: &MapConfig) -> RoadNetwork {
        let mut rng = CityRng::from_seed_u64(config.seed);
        build_road_grid(config, &mut rng)
    }

    #[test]
    fn test_tile_span() {
        assert_eq!(
            tile_span(-1000, -600, 200, false),
            vec![(-1000, -800), (-800, -600)]
        );
        assert_eq!(tile_span(100, 200, 200, true), vec![(100, 200)]);
        assert_eq!(tile_span(100, 500, 300, true), vec![(100, 200), (200, 500)]);
        assert_eq!(tile_span(600, 600, 200, false), vec![]);
    }

    #[test]
    fn test_arterials_span_full_map_once() {
        let config = MapConfig::default();
        let network = build(&config);

        for axis in Axis::BOTH {
            let arterials: Vec<_> = network
                .segments_of(RoadClass::Arterial)
                .filter(|s| s.axis == axis)
                .collect();
            let fixed: Vec<_> = arterials.iter().map(|s| s.fixed).collect();
            assert_eq!(fixed, vec![-800, -400, 0, 400, 800]);

            for seg in arterials {
                assert_eq!((seg.start, seg.end), (-1000, 1000));
                for along in config.grid_lines() {
                    let (x, z) = axis.grid_point(seg.fixed, along);
                    assert_eq!(network.index.at(axis, x, z), Some(RoadClass::Arterial));
                }
            }
        }
    }

    #[test]
    fn test_residential_only_on_block_lines() {
        let config = MapConfig::default();
        let network = build(&config);

        for seg in network.segments_of(RoadClass::Residential) {
            assert_eq!(seg.fixed % config.suburb_block_size, 0);
            assert_eq!(seg.length(), 200.0);
        }

        let off_grid = [-900, -700, 700, 900];
        for axis in Axis::BOTH {
            for fixed in off_grid {
                assert!(
                    !network.segments.iter().any(|s| s.axis == axis && s.fixed == fixed),
                    "unexpected road on {:?} line {}",
                    axis,
                    fixed
                );
            }
        }
    }

    #[test]
    fn test_downtown_streets_are_continuous() {
        let config = MapConfig::default();
        let network = build(&config);

        let city: Vec<_> = network.segments_of(RoadClass::City).collect();
        // 13 downtown lines per axis minus 3 arterials
        assert_eq!(city.len(), 2 * 10);
        for seg in city {
            assert_eq!((seg.start, seg.end), (-600, 600));
            assert!(seg.fixed.abs() <= 600);
        }
    }

    #[test]
    fn test_axes_are_symmetric_without_gaps() {
        let config = MapConfig::default().with_lane_keep(1.0, 1.0);
        let network = build(&config);

        let mut vertical: Vec<_> = network
            .segments
            .iter()
            .filter(|s| s.axis == Axis::Vertical)
            .map(|s| (s.fixed, s.start, s.end, s.class))
            .collect();
        let mut horizontal: Vec<_> = network
            .segments
            .iter()
            .filter(|s| s.axis == Axis::Horizontal)
            .map(|s| (s.fixed, s.start, s.end, s.class))
            .collect();
        vertical.sort();
        horizontal.sort();
        assert_eq!(vertical, horizontal);
    }

    #[test]
    fn test_gaps_drop_residential_pieces() {
        let config = MapConfig::default().with_lane_keep(0.0, 0.0);
        let network = build(&config);
        assert_eq!(network.segments_of(RoadClass::Residential).count(), 0);
        assert_eq!(network.index.vertical_at(1000, 0), None);
    }

    #[test]
    fn test_lines_sorted_and_distinct() {
        let config = MapConfig::default().with_lane_keep(1.0, 1.0);
        let network = build(&config);
        let lines = network.lines(Axis::Vertical);
        let expected: Vec<i32> = (-1000..=1000)
            .step_by(100)
            .filter(|x: &i32| x.abs() <= 600 || x % 200 == 0)
            .collect();
        assert_eq!(lines, expected);
    }

    #[test]
    fn test_road_record() {
        let seg = RoadSegment::new(Axis::Horizontal, 300, -600, 600, RoadClass::City);
        let record = road_record(&seg);
        assert_eq!(record.kind, EntityKind::Road);
        assert_eq!(record.position, Vec3::new(0.0, 0.05, 300.0));
        assert_eq!(record.yaw(), std::f64::consts::FRAC_PI_2);
        assert_eq!(record.param_f64("width"), Some(12.0));
        assert_eq!(record.param_f64("length"), Some(1200.0));
    }
}
