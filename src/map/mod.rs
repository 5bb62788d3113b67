pub mod file;
pub mod validation;

pub use file::{LoadedMap, parse_map, read_map, to_json, write_map};
pub use validation::{ValidationResult, validate_and_clean, validate_records};
