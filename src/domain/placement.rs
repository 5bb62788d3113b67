use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Free-form entity parameters, keyed in sorted order so serialization is stable
pub type Params = BTreeMap<String, serde_json::Value>;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Rotation about the vertical axis only
    pub fn yaw(angle: f64) -> Self {
        Self::new(0.0, angle, 0.0)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// A registry key that no [`EntityKind`] maps to
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown entity type '{0}'")]
pub struct UnknownEntityType(pub String);

/// Every entity type the generator emits.
///
/// Serialized as the entity registry's string key; see [`EntityKind::registry_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum EntityKind {
    Road,
    TrafficLight,
    StreetLight,
    ConstructionBarrier,
    PowerPole,
    ModernTower,
    OfficePark,
    LandingPad,
    HouseModern,
    HouseCottage,
    Sidewalk,
    OakTree,
    PineTree,
}

impl EntityKind {
    pub const ALL: [EntityKind; 13] = [
        EntityKind::Road,
        EntityKind::TrafficLight,
        EntityKind::StreetLight,
        EntityKind::ConstructionBarrier,
        EntityKind::PowerPole,
        EntityKind::ModernTower,
        EntityKind::OfficePark,
        EntityKind::LandingPad,
        EntityKind::HouseModern,
        EntityKind::HouseCottage,
        EntityKind::Sidewalk,
        EntityKind::OakTree,
        EntityKind::PineTree,
    ];

    /// Key understood by the downstream entity registry
    pub fn registry_key(self) -> &'static str {
        match self {
            EntityKind::Road => "road",
            EntityKind::TrafficLight => "trafficLight",
            EntityKind::StreetLight => "streetLight",
            EntityKind::ConstructionBarrier => "constructionBarrier",
            EntityKind::PowerPole => "powerPole",
            EntityKind::ModernTower => "modern_tower",
            EntityKind::OfficePark => "office_park",
            EntityKind::LandingPad => "landingPad",
            EntityKind::HouseModern => "house_modern",
            EntityKind::HouseCottage => "house_cottage",
            EntityKind::Sidewalk => "sidewalk",
            EntityKind::OakTree => "oakTree",
            EntityKind::PineTree => "pineTree",
        }
    }

    pub fn is_tower(self) -> bool {
        matches!(self, EntityKind::ModernTower | EntityKind::OfficePark)
    }

    pub fn is_house(self) -> bool {
        matches!(self, EntityKind::HouseModern | EntityKind::HouseCottage)
    }

    /// Buildings carry a `width`/`height`/`depth` footprint
    pub fn is_building(self) -> bool {
        self.is_tower() || self.is_house()
    }

    pub fn is_tree(self) -> bool {
        matches!(self, EntityKind::OakTree | EntityKind::PineTree)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.registry_key())
    }
}

impl FromStr for EntityKind {
    type Err = UnknownEntityType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.registry_key() == s)
            .ok_or_else(|| UnknownEntityType(s.to_string()))
    }
}

impl From<EntityKind> for &'static str {
    fn from(kind: EntityKind) -> Self {
        kind.registry_key()
    }
}

impl TryFrom<String> for EntityKind {
    type Error = UnknownEntityType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One entity to instantiate: the generator's sole unit of output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementRecord {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    #[serde(default)]
    pub params: Params,
    pub position: Vec3,
    #[serde(default)]
    pub rotation: Vec3,
}

impl PlacementRecord {
    pub fn new(kind: EntityKind, position: Vec3) -> Self {
        Self {
            kind,
            params: Params::new(),
            position,
            rotation: Vec3::default(),
        }
    }

    pub fn with_yaw(mut self, yaw: f64) -> Self {
        self.rotation = Vec3::yaw(yaw);
        self
    }

    pub fn with_param(mut self, key: &str, value: f64) -> Self {
        self.params.insert(key.to_string(), serde_json::Value::from(value));
        self
    }

    /// Numeric parameter, if present and a number
    pub fn param_f64(&self, key: &str) -> Option<f64> {
        self.params.get(key).and_then(|v| v.as_f64())
    }

    pub fn yaw(&self) -> f64 {
        self.rotation.y
    }
}
