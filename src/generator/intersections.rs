use std::f64::consts::{FRAC_PI_2, PI};

use crate::config::{MapConfig, dims};
use crate::domain::{Axis, EntityKind, PlacementRecord, RoadClass, Vec3, Zone};

use super::emitter::RecordEmitter;
use super::rng::CityRng;
use super::roads::RoadNetwork;

const SUBURB_LAMP_CHANCE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntersectionKind {
    /// Arterial meets arterial: signals and lamps
    Major,
    /// Any other crossing: stop control and an optional lamp
    Minor,
}

/// A grid node where pavement on both axes meets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intersection {
    pub x: i32,
    pub z: i32,
    pub vertical: RoadClass,
    pub horizontal: RoadClass,
}

impl Intersection {
    pub fn kind(&self) -> IntersectionKind {
        if self.vertical == RoadClass::Arterial && self.horizontal == RoadClass::Arterial {
            IntersectionKind::Major
        } else {
            IntersectionKind::Minor
        }
    }

    /// Distance from the crossing centre to each corner prop, on both axes
    pub fn corner_offset(&self) -> f64 {
        self.vertical.half_width().max(self.horizontal.half_width()) + dims::CORNER_MARGIN
    }

    /// Same crossing with the roles of the two roads exchanged
    pub fn transposed(&self) -> Self {
        Self {
            x: self.z,
            z: self.x,
            vertical: self.horizontal,
            horizontal: self.vertical,
        }
    }
}

/// Every paved crossing, vertical lines outer, both ascending
pub fn find_intersections(network: &RoadNetwork) -> Vec<Intersection> {
    let horizontal_lines = network.lines(Axis::Horizontal);

    network
        .lines(Axis::Vertical)
        .into_iter()
        .flat_map(|x| horizontal_lines.iter().map(move |&z| (x, z)))
        .filter_map(|(x, z)| {
            let (vertical, horizontal) = network.index.crossing(x, z)?;
            Some(Intersection {
                x,
                z,
                vertical,
                horizontal,
            })
        })
        .collect()
}

/// Emit signals, barriers and lamps for every crossing
pub fn place_intersection_props(
    network: &RoadNetwork,
    config: &MapConfig,
    rng: &mut CityRng,
    emitter: &mut RecordEmitter,
) {
    let intersections = find_intersections(network);
    let before = emitter.len();

    for intersection in &intersections {
        let zone = Zone::classify(intersection.x as f64, intersection.z as f64, config);
        emitter.extend(intersection_props(intersection, zone, rng));
    }

    log::debug!(
        "Intersections: {} crossings, {} props",
        intersections.len(),
        emitter.len() - before
    );
}

/// Props for a single crossing
fn intersection_props(
    intersection: &Intersection,
    zone: Zone,
    rng: &mut CityRng,
) -> Vec<PlacementRecord> {
    let (x, z) = (intersection.x as f64, intersection.z as f64);
    let o = intersection.corner_offset();
    let corner = |kind, dx: f64, dz: f64, yaw| {
        PlacementRecord::new(kind, Vec3::new(x + dx, 0.0, z + dz)).with_yaw(yaw)
    };

    match intersection.kind() {
        IntersectionKind::Major => vec![
            corner(EntityKind::TrafficLight, -o, -o, 0.0),
            corner(EntityKind::TrafficLight, o, o, PI),
            corner(EntityKind::StreetLight, -o, o, FRAC_PI_2),
            corner(EntityKind::StreetLight, o, -o, -FRAC_PI_2),
        ],
        IntersectionKind::Minor => {
            let mut props = vec![
                corner(EntityKind::ConstructionBarrier, -o, -o, 0.0),
                corner(EntityKind::ConstructionBarrier, o, o, PI),
            ];
            let lit = match zone {
                Zone::Downtown => true,
                Zone::Suburb => rng.chance(SUBURB_LAMP_CHANCE),
            };
            if lit {
                props.push(corner(EntityKind::StreetLight, -o, o, FRAC_PI_2));
            }
            props
        }
    }
}
