use crate::config::MapConfig;

/// Zoning band a world coordinate falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Downtown,
    Suburb,
}

impl Zone {
    /// Downtown is the square of half-extent `downtown_half` around the origin, edges included
    pub fn classify(x: f64, z: f64, config: &MapConfig) -> Zone {
        let limit = config.downtown_half() as f64;
        if x.abs() <= limit && z.abs() <= limit {
            Zone::Downtown
        } else {
            Zone::Suburb
        }
    }
}
