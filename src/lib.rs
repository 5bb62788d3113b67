//! gridcity - Procedural city layouts as placement records for a 3D map loader

pub mod config;
pub mod domain;
pub mod generator;
pub mod geometry;
pub mod map;

pub use config::{ConfigError, FileConfig, MapConfig};
pub use domain::{EntityKind, PlacementRecord};
pub use generator::{GenerationResult, generate};
