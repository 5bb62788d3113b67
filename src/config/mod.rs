use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Layout constants shared by the generator stages.
///
/// All distances are world units (metres). Road widths are the full paved width;
/// intersection and frontage code works from half-widths derived from these.
pub mod dims {
    /// Elevation of road ribbons above the ground plane
    pub const ROAD_Y: f64 = 0.05;

    pub const ARTERIAL_WIDTH: f64 = 22.0;
    pub const CITY_WIDTH: f64 = 12.0;
    pub const RESIDENTIAL_WIDTH: f64 = 10.0;

    /// Clearance between the wider crossing road's edge and a corner prop
    pub const CORNER_MARGIN: f64 = 3.0;

    pub const POLE_STRIDE: i32 = 50;
    pub const POLE_OFFSET: f64 = 16.0;
    /// Poles closer than this to an arterial crossing are skipped
    pub const POLE_CLEARANCE: i32 = 20;

    /// Along-road gap kept free at each end of a frontage block
    pub const INTERSECTION_BUFFER: f64 = 20.0;

    pub const DOWNTOWN_STRIDE: f64 = 25.0;
    pub const SUBURB_STRIDE: f64 = 30.0;
    pub const DOWNTOWN_SETBACK: f64 = 2.0;
    pub const SUBURB_SETBACK: f64 = 5.0;

    pub const TOWER_FOOTPRINT: f64 = 20.0;
    pub const TOWER_MIN_HEIGHT: f64 = 30.0;
    pub const TOWER_MAX_HEIGHT: f64 = 150.0;
    pub const LANDING_PAD_MIN_HEIGHT: f64 = 100.0;
    pub const LANDING_PAD_ELEVATION: f64 = 15.0;

    pub const HOUSE_FOOTPRINT: f64 = 12.0;
    pub const HOUSE_MIN_HEIGHT: f64 = 6.0;
    pub const HOUSE_MAX_HEIGHT: f64 = 10.0;

    pub const DRIVEWAY_WIDTH: f64 = 3.0;
    pub const DRIVEWAY_Y: f64 = 0.02;
    /// Street trees stand this far beyond the paved edge
    pub const TREE_EDGE_OFFSET: f64 = 2.0;
}

/// Rejected generation parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: i32 },

    #[error("{name} must be even so the grid is centred on the origin, got {value}")]
    OddExtent { name: &'static str, value: i32 },

    #[error("{name} ({value}) must be a multiple of {base_name} ({base})")]
    Misaligned {
        name: &'static str,
        value: i32,
        base_name: &'static str,
        base: i32,
    },

    #[error("downtown_size ({downtown}) exceeds map_size ({map})")]
    DowntownTooLarge { downtown: i32, map: i32 },

    #[error("{name} must be within [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
}

/// Immutable parameters for one generation run.
///
/// Construct through [`MapConfig::new`], or adjust a default with the `with_*` calls
/// and then run [`MapConfig::validate`]. The generator assumes a validated grid.
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub map_size: i32,
    pub downtown_size: i32,
    pub arterial_spacing: i32,
    pub street_spacing: i32,
    pub suburb_block_size: i32,
    pub seed: u64,
    /// Keep probability for residential pieces extending a downtown street
    pub downtown_lane_keep: f64,
    /// Keep probability for residential pieces on purely suburban lines
    pub suburb_lane_keep: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            map_size: default_map_size(),
            downtown_size: default_downtown_size(),
            arterial_spacing: default_arterial_spacing(),
            street_spacing: default_street_spacing(),
            suburb_block_size: default_suburb_block_size(),
            seed: default_seed(),
            downtown_lane_keep: default_downtown_lane_keep(),
            suburb_lane_keep: default_suburb_lane_keep(),
        }
    }
}

impl MapConfig {
    /// Create and validate a config with default keep probabilities
    pub fn new(
        map_size: i32,
        downtown_size: i32,
        arterial_spacing: i32,
        street_spacing: i32,
        suburb_block_size: i32,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            map_size,
            downtown_size,
            arterial_spacing,
            street_spacing,
            suburb_block_size,
            seed,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_lane_keep(mut self, downtown: f64, suburb: f64) -> Self {
        self.downtown_lane_keep = downtown;
        self.suburb_lane_keep = suburb;
        self
    }

    /// Check every grid alignment invariant
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("map_size", self.map_size),
            ("downtown_size", self.downtown_size),
            ("arterial_spacing", self.arterial_spacing),
            ("street_spacing", self.street_spacing),
            ("suburb_block_size", self.suburb_block_size),
        ] {
            if value <= 0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        for (name, value) in [
            ("map_size", self.map_size),
            ("downtown_size", self.downtown_size),
        ] {
            if value % 2 != 0 {
                return Err(ConfigError::OddExtent { name, value });
            }
        }
        if self.downtown_size > self.map_size {
            return Err(ConfigError::DowntownTooLarge {
                downtown: self.downtown_size,
                map: self.map_size,
            });
        }

        let street = ("street_spacing", self.street_spacing);
        let checks = [
            (("map_size", self.map_size), street),
            (("map_size", self.map_size), ("arterial_spacing", self.arterial_spacing)),
            (("map_size", self.map_size), ("suburb_block_size", self.suburb_block_size)),
            (("arterial_spacing", self.arterial_spacing), street),
            (("suburb_block_size", self.suburb_block_size), street),
            (("map_size / 2", self.half_size()), street),
            (("downtown_size / 2", self.downtown_half()), street),
        ];
        for ((name, value), (base_name, base)) in checks {
            if value % base != 0 {
                return Err(ConfigError::Misaligned {
                    name,
                    value,
                    base_name,
                    base,
                });
            }
        }

        for (name, value) in [
            ("downtown_lane_keep", self.downtown_lane_keep),
            ("suburb_lane_keep", self.suburb_lane_keep),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { name, value });
            }
        }

        Ok(())
    }

    pub fn half_size(&self) -> i32 {
        self.map_size / 2
    }

    pub fn downtown_half(&self) -> i32 {
        self.downtown_size / 2
    }

    pub fn is_arterial_line(&self, coord: i32) -> bool {
        coord % self.arterial_spacing == 0
    }

    pub fn is_suburb_block_line(&self, coord: i32) -> bool {
        coord % self.suburb_block_size == 0
    }

    /// Grid coordinates from `-half` to `+half` inclusive at street resolution
    pub fn grid_lines(&self) -> impl Iterator<Item = i32> + use<> {
        let half = self.half_size();
        (-half..=half).step_by(self.street_spacing as usize)
    }
}

fn default_map_size() -> i32 {
    2000
}
fn default_downtown_size() -> i32 {
    1200
}
fn default_arterial_spacing() -> i32 {
    400
}
fn default_street_spacing() -> i32 {
    100
}
fn default_suburb_block_size() -> i32 {
    200
}
fn default_seed() -> u64 {
    42
}
fn default_downtown_lane_keep() -> f64 {
    0.9
}
fn default_suburb_lane_keep() -> f64 {
    0.85
}
fn default_pretty() -> bool {
    false
}
fn default_verbose() -> bool {
    false
}

/// Settings read from a `gridcity.toml` file
#[derive(Debug, Deserialize)]
pub struct FileConfig {
    #[serde(default = "default_map_size")]
    pub map_size: i32,
    #[serde(default = "default_downtown_size")]
    pub downtown_size: i32,
    #[serde(default = "default_arterial_spacing")]
    pub arterial_spacing: i32,
    #[serde(default = "default_street_spacing")]
    pub street_spacing: i32,
    #[serde(default = "default_suburb_block_size")]
    pub suburb_block_size: i32,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_downtown_lane_keep")]
    pub downtown_lane_keep: f64,
    #[serde(default = "default_suburb_lane_keep")]
    pub suburb_lane_keep: f64,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default = "default_pretty")]
    pub pretty: bool,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            map_size: default_map_size(),
            downtown_size: default_downtown_size(),
            arterial_spacing: default_arterial_spacing(),
            street_spacing: default_street_spacing(),
            suburb_block_size: default_suburb_block_size(),
            seed: default_seed(),
            downtown_lane_keep: default_downtown_lane_keep(),
            suburb_lane_keep: default_suburb_lane_keep(),
            output: None,
            pretty: default_pretty(),
            verbose: default_verbose(),
        }
    }
}

impl FileConfig {
    /// Search the standard locations and return the first config that parses
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => {
                        log::debug!("Loaded config from {}", path.display());
                        return Some(config);
                    }
                    Err(e) => {
                        log::warn!("Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }

    /// Grid parameters from this file, unvalidated
    pub fn map_config(&self) -> MapConfig {
        MapConfig {
            map_size: self.map_size,
            downtown_size: self.downtown_size,
            arterial_spacing: self.arterial_spacing,
            street_spacing: self.street_spacing,
            suburb_block_size: self.suburb_block_size,
            seed: self.seed,
            downtown_lane_keep: self.downtown_lane_keep,
            suburb_lane_keep: self.suburb_lane_keep,
        }
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("gridcity.toml"));
    paths.push(PathBuf::from(".gridcity.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("gridcity").join("config.toml"));
        paths.push(config_dir.join("gridcity.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".gridcity.toml"));
        paths.push(home.join(".config").join("gridcity").join("config.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MapConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.half_size(), 1000);
        assert_eq!(config.downtown_half(), 600);
    }

    #[test]
    fn test_small_scenario_is_valid() {
        let config = MapConfig::new(400, 200, 400, 100, 200, 7).unwrap();
        assert_eq!(config.grid_lines().collect::<Vec<_>>(), vec![-200, -100, 0, 100, 200]);
    }

    #[test]
    fn test_rejects_non_positive_spacing() {
        let err = MapConfig::new(2000, 1200, 400, 0, 200, 1).unwrap_err();
        assert_eq!(
            err,
            ConfigError::NonPositive {
                name: "street_spacing",
                value: 0
            }
        );
    }

    #[test]
    fn test_rejects_arterial_not_multiple_of_street() {
        let err = MapConfig::new(2000, 1200, 300, 100, 200, 1).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Misaligned {
                name: "map_size",
                base_name: "arterial_spacing",
                ..
            }
        ));

        let err = MapConfig::new(2000, 1200, 250, 100, 200, 1).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Misaligned {
                name: "arterial_spacing",
                base_name: "street_spacing",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_misaligned_downtown() {
        let err = MapConfig::new(2000, 1100, 400, 100, 200, 1).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Misaligned {
                name: "downtown_size / 2",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_odd_extent() {
        let err = MapConfig::new(2000, 1201, 400, 100, 200, 1).unwrap_err();
        assert_eq!(
            err,
            ConfigError::OddExtent {
                name: "downtown_size",
                value: 1201
            }
        );
    }

    #[test]
    fn test_rejects_oversized_downtown() {
        let err = MapConfig::new(2000, 2400, 400, 100, 200, 1).unwrap_err();
        assert_eq!(
            err,
            ConfigError::DowntownTooLarge {
                downtown: 2400,
                map: 2000
            }
        );
    }

    #[test]
    fn test_rejects_bad_probability() {
        let config = MapConfig::default().with_lane_keep(1.5, 0.8);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidProbability {
                name: "downtown_lane_keep",
                ..
            })
        ));
    }

    #[test]
    fn test_file_config_defaults() {
        let file: FileConfig = toml::from_str("seed = 9\nmap_size = 800").unwrap();
        let config = file.map_config();
        assert_eq!(config.seed, 9);
        assert_eq!(config.map_size, 800);
        assert_eq!(config.street_spacing, 100);
        assert!(!file.pretty);
    }

    #[test]
    fn test_error_message_is_descriptive() {
        let err = MapConfig::new(2000, 1200, 400, 100, 300, 1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "map_size (2000) must be a multiple of suburb_block_size (300)"
        );
    }
}
