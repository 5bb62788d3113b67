pub mod bounds;
pub mod footprint;
pub mod spatial_hash;

pub use bounds::Bounds;
pub use footprint::Footprint;
pub use spatial_hash::SpatialHash;
