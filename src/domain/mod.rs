pub mod placement;
pub mod road;
pub mod zone;

pub use placement::{EntityKind, Params, PlacementRecord, UnknownEntityType, Vec3};
pub use road::{Axis, RoadClass, RoadSegment};
pub use zone::Zone;
