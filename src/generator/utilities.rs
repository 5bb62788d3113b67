use crate::config::{MapConfig, dims};
use crate::domain::{EntityKind, PlacementRecord, RoadClass, RoadSegment, Vec3};

use super::emitter::RecordEmitter;
use super::roads::RoadNetwork;

/// Line power poles along every arterial
pub fn place_power_poles(network: &RoadNetwork, config: &MapConfig, emitter: &mut RecordEmitter) {
    let before = emitter.len();
    for segment in network.segments_of(RoadClass::Arterial) {
        emitter.extend(poles_along(segment, config));
    }
    log::debug!("Utilities: {} power poles", emitter.len() - before);
}

/// Poles every `POLE_STRIDE` from `-half` up to (not including) `+half`,
/// offset to the positive side and kept clear of arterial crossings
fn poles_along(segment: &RoadSegment, config: &MapConfig) -> Vec<PlacementRecord> {
    let half = config.half_size();
    let across = segment.fixed as f64 + dims::POLE_OFFSET;
    let yaw = segment.axis.yaw();

    (-half..half)
        .step_by(dims::POLE_STRIDE as usize)
        .filter(|&along| !near_arterial_crossing(along, config.arterial_spacing))
        .map(|along| {
            let (x, z) = segment.axis.world_point(across, along as f64);
            PlacementRecord::new(EntityKind::PowerPole, Vec3::new(x, 0.0, z)).with_yaw(yaw)
        })
        .collect()
}

fn near_arterial_crossing(along: i32, spacing: i32) -> bool {
    let rem = along.rem_euclid(spacing);
    rem.min(spacing - rem) < dims::POLE_CLEARANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Axis;

    #[test]
    fn test_near_arterial_crossing() {
        assert!(near_arterial_crossing(0, 400));
        assert!(near_arterial_crossing(-400, 400));
        assert!(near_arterial_crossing(390, 400));
        assert!(near_arterial_crossing(-815, 400));
        assert!(!near_arterial_crossing(50, 400));
        assert!(!near_arterial_crossing(-350, 400));
        assert!(!near_arterial_crossing(20, 400));
    }

    #[test]
    fn test_poles_along_vertical_arterial() {
        let config = MapConfig::default();
        let seg = RoadSegment::new(Axis::Vertical, 400, -1000, 1000, RoadClass::Arterial);
        let poles = poles_along(&seg, &config);

        // 40 stride positions, 5 of them (-800, -400, 0, 400, 800) on crossings
        assert_eq!(poles.len(), 35);
        for pole in &poles {
            assert_eq!(pole.kind, EntityKind::PowerPole);
            assert_eq!(pole.position.x, 416.0);
            let z = pole.position.z as i32;
            assert!(z.rem_euclid(400) >= 20 && z.rem_euclid(400) <= 380);
            assert!((-1000..1000).contains(&z));
        }
    }

    #[test]
    fn test_poles_along_horizontal_arterial() {
        let config = MapConfig::default();
        let seg = RoadSegment::new(Axis::Horizontal, -800, -1000, 1000, RoadClass::Arterial);
        let poles = poles_along(&seg, &config);

        assert_eq!(poles[0].position, Vec3::new(-1000.0, 0.0, -784.0));
        assert!(poles.iter().all(|p| p.yaw() == std::f64::consts::FRAC_PI_2));
    }

    #[test]
    fn test_only_arterials_get_poles() {
        let config = MapConfig::default();
        let mut network = RoadNetwork::default();
        network.segments.push(RoadSegment::new(
            Axis::Vertical,
            100,
            -600,
            600,
            RoadClass::City,
        ));
        let mut emitter = RecordEmitter::new();
        place_power_poles(&network, &config, &mut emitter);
        assert!(emitter.is_empty());
    }
}
