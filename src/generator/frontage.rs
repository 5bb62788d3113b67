//! Buildings and street furniture along road frontages.
//!
//! Every segment is walked one grid block at a time. Each block loses a
//! clearance at both ends, and the rest is cut into equal lots of a
//! zone-dependent stride. Every lot gets one building per road side, centred
//! in the lot and turned to face the road. Building width never exceeds the
//! stride, so buildings on one side of a road cannot overlap.
//!
//! Vertical roads own the corner lots. A horizontal road widens its end
//! clearance to clear the frontage of any vertical road crossing there.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::config::{MapConfig, dims};
use crate::domain::{Axis, EntityKind, PlacementRecord, RoadSegment, Vec3, Zone};

use super::emitter::RecordEmitter;
use super::index::RoadPointIndex;
use super::rng::CityRng;
use super::roads::RoadNetwork;

const MODERN_TOWER_CHANCE: f64 = 0.7;
const LANDING_PAD_CHANCE: f64 = 0.5;
const MODERN_HOUSE_CHANCE: f64 = 0.4;
const OAK_CHANCE: f64 = 0.5;

/// Road sides, as a sign on the across-road axis
const SIDES: [f64; 2] = [-1.0, 1.0];

/// Lot dimensions for one zone
#[derive(Debug, Clone, Copy, PartialEq)]
struct LotStyle {
    stride: f64,
    setback: f64,
    /// Along-road building extent
    width: f64,
    /// Across-road building extent
    depth: f64,
}

impl LotStyle {
    const DOWNTOWN: LotStyle = LotStyle {
        stride: dims::DOWNTOWN_STRIDE,
        setback: dims::DOWNTOWN_SETBACK,
        width: dims::TOWER_FOOTPRINT,
        depth: dims::TOWER_FOOTPRINT,
    };

    const SUBURB: LotStyle = LotStyle {
        stride: dims::SUBURB_STRIDE,
        setback: dims::SUBURB_SETBACK,
        width: dims::HOUSE_FOOTPRINT,
        depth: dims::HOUSE_FOOTPRINT,
    };

    fn for_zone(zone: Zone) -> LotStyle {
        match zone {
            Zone::Downtown => Self::DOWNTOWN,
            Zone::Suburb => Self::SUBURB,
        }
    }

    /// How far past the paved edge the frontage extends
    fn reach(&self) -> f64 {
        self.setback + self.depth
    }
}

/// A building slot on one side of a road
struct Lot<'a> {
    segment: &'a RoadSegment,
    along: f64,
    side: f64,
    style: LotStyle,
}

impl Lot<'_> {
    /// Across-road coordinate `offset` units from the road centre line on this side
    fn across(&self, offset: f64) -> f64 {
        self.segment.fixed as f64 + self.side * offset
    }

    fn world(&self, across: f64, along: f64, y: f64) -> Vec3 {
        let (x, z) = self.segment.axis.world_point(across, along);
        Vec3::new(x, y, z)
    }

    fn building_offset(&self) -> f64 {
        self.segment.class.half_width() + self.style.setback + self.style.depth / 2.0
    }

    /// Yaw that turns a building's front toward the road
    fn facing_yaw(&self) -> f64 {
        match (self.segment.axis, self.side < 0.0) {
            (Axis::Vertical, true) => FRAC_PI_2,
            (Axis::Vertical, false) => -FRAC_PI_2,
            (Axis::Horizontal, true) => 0.0,
            (Axis::Horizontal, false) => PI,
        }
    }

    fn inside_map(&self, half: f64) -> bool {
        let across = self.across(self.building_offset());
        across.abs() + self.style.depth / 2.0 <= half
    }

    fn building(&self, kind: EntityKind, height: f64) -> PlacementRecord {
        let position = self.world(self.across(self.building_offset()), self.along, 0.0);
        PlacementRecord::new(kind, position)
            .with_yaw(self.facing_yaw())
            .with_param("width", self.style.width)
            .with_param("height", height)
            .with_param("depth", self.style.depth)
    }
}

/// Populate every road block with buildings
pub fn place_frontage(
    network: &RoadNetwork,
    config: &MapConfig,
    rng: &mut CityRng,
    emitter: &mut RecordEmitter,
) {
    let before = emitter.len();

    for segment in &network.segments {
        for (from, to) in segment.blocks(config.street_spacing) {
            place_block(segment, from, to, &network.index, config, rng, emitter);
        }
    }

    log::debug!("Frontage: {} records", emitter.len() - before);
}

fn place_block(
    segment: &RoadSegment,
    from: i32,
    to: i32,
    index: &RoadPointIndex,
    config: &MapConfig,
    rng: &mut CityRng,
    emitter: &mut RecordEmitter,
) {
    let mid = (from as f64 + to as f64) / 2.0;
    let (mx, mz) = segment.axis.world_point(segment.fixed as f64, mid);
    let zone = Zone::classify(mx, mz, config);
    let style = LotStyle::for_zone(zone);

    let low = from as f64 + end_clearance(segment, from, index);
    let high = to as f64 - end_clearance(segment, to, index);
    let half = config.half_size() as f64;

    for along in lot_centers(low, high, style.stride) {
        for side in SIDES {
            let lot = Lot {
                segment,
                along,
                side,
                style,
            };
            if !lot.inside_map(half) {
                continue;
            }
            match zone {
                Zone::Downtown => emitter.extend(tower(&lot, rng)),
                Zone::Suburb => emitter.extend(house(&lot, rng)),
            }
        }
    }
}

/// Clearance kept free at the block end `at`
fn end_clearance(segment: &RoadSegment, at: i32, index: &RoadPointIndex) -> f64 {
    if segment.axis == Axis::Vertical {
        return dims::INTERSECTION_BUFFER;
    }

    let (x, z) = segment.axis.grid_point(segment.fixed, at);
    match index.vertical_at(x, z) {
        Some(cross) => {
            let reach = LotStyle::DOWNTOWN.reach().max(LotStyle::SUBURB.reach());
            (cross.half_width() + reach).max(dims::INTERSECTION_BUFFER)
        }
        None => dims::INTERSECTION_BUFFER,
    }
}

/// Centres of whole `stride` lots fitting in `[low, high]`, centred as a group
fn lot_centers(low: f64, high: f64, stride: f64) -> Vec<f64> {
    let usable = high - low;
    if usable < stride {
        return Vec::new();
    }
    let count = (usable / stride).floor() as usize;
    let start = low + (usable - count as f64 * stride) / 2.0;
    (0..count)
        .map(|i| start + stride * (i as f64 + 0.5))
        .collect()
}

/// Downtown tower, with a rooftop landing pad on some of the tallest
fn tower(lot: &Lot<'_>, rng: &mut CityRng) -> Vec<PlacementRecord> {
    let height = rng.range(dims::TOWER_MIN_HEIGHT, dims::TOWER_MAX_HEIGHT);
    let kind = if rng.chance(MODERN_TOWER_CHANCE) {
        EntityKind::ModernTower
    } else {
        EntityKind::OfficePark
    };

    let building = lot.building(kind, height);
    let mut records = Vec::with_capacity(2);

    if height > dims::LANDING_PAD_MIN_HEIGHT && rng.chance(LANDING_PAD_CHANCE) {
        let roof = Vec3::new(
            building.position.x,
            height + dims::LANDING_PAD_ELEVATION,
            building.position.z,
        );
        records.push(building);
        records.push(PlacementRecord::new(EntityKind::LandingPad, roof));
    } else {
        records.push(building);
    }

    records
}

/// Suburban house with its driveway and a pair of street trees
fn house(lot: &Lot<'_>, rng: &mut CityRng) -> Vec<PlacementRecord> {
    let kind = if rng.chance(MODERN_HOUSE_CHANCE) {
        EntityKind::HouseModern
    } else {
        EntityKind::HouseCottage
    };
    let height = rng.range(dims::HOUSE_MIN_HEIGHT, dims::HOUSE_MAX_HEIGHT);

    let road_half = lot.segment.class.half_width();
    let setback = lot.style.setback;

    // Fills the setback gap between the paved edge and the house front
    let driveway_across = lot.across(road_half + setback / 2.0);
    let driveway = PlacementRecord::new(
        EntityKind::Sidewalk,
        lot.world(driveway_across, lot.along, dims::DRIVEWAY_Y),
    )
    .with_yaw(lot.segment.axis.perpendicular().yaw())
    .with_param("width", dims::DRIVEWAY_WIDTH)
    .with_param("length", setback);

    let mut records = vec![lot.building(kind, height), driveway];

    let tree_across = lot.across(road_half + dims::TREE_EDGE_OFFSET);
    let spread = lot.style.stride / 4.0;
    for along in [lot.along - spread, lot.along + spread] {
        let kind = if rng.chance(OAK_CHANCE) {
            EntityKind::OakTree
        } else {
            EntityKind::PineTree
        };
        records.push(PlacementRecord::new(kind, lot.world(tree_across, along, 0.0)));
    }

    records
}
