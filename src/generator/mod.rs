pub mod emitter;
pub mod frontage;
pub mod index;
pub mod intersections;
pub mod rng;
pub mod roads;
pub mod utilities;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::{ConfigError, MapConfig};
use crate::domain::{EntityKind, PlacementRecord};

pub use emitter::RecordEmitter;
pub use index::RoadPointIndex;
pub use intersections::{Intersection, IntersectionKind, find_intersections};
pub use rng::CityRng;
pub use roads::{RoadNetwork, build_road_grid};

/// Complete output of one generation run, in map-file shape
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub objects: Vec<PlacementRecord>,
}

impl GenerationResult {
    /// Record count per entity type
    pub fn counts(&self) -> BTreeMap<EntityKind, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.objects {
            *counts.entry(record.kind).or_insert(0) += 1;
        }
        counts
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Generate a full city layout.
///
/// Stages run in a fixed order against one seeded RNG:
/// 1. Road grid (and its paved-node index)
/// 2. Intersection props
/// 3. Power poles along arterials
/// 4. Building frontage
///
/// The output order follows the stages, so equal configs give identical lists.
pub fn generate(config: &MapConfig) -> Result<GenerationResult, ConfigError> {
    config.validate()?;

    let mut rng = CityRng::from_seed_u64(config.seed);
    let mut emitter = RecordEmitter::new();

    let network = build_road_grid(config, &mut rng);
    emitter.extend(network.segments.iter().map(roads::road_record));

    intersections::place_intersection_props(&network, config, &mut rng, &mut emitter);
    utilities::place_power_poles(&network, config, &mut emitter);
    frontage::place_frontage(&network, config, &mut rng, &mut emitter);

    log::info!(
        "Generated {} records ({} roads) with seed {}",
        emitter.len(),
        network.segments.len(),
        config.seed
    );

    Ok(GenerationResult {
        objects: emitter.finish(),
    })
}
