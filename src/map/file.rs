use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::domain::{EntityKind, Params, PlacementRecord, Vec3};
use crate::generator::GenerationResult;

/// A map file as read from disk, before entity types are resolved
#[derive(Debug, Deserialize)]
struct RawMapFile {
    #[serde(default)]
    objects: Vec<serde_json::Value>,
}

/// Lenient record shape: hand-edited files may omit params or rotation
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    params: Params,
    #[serde(default)]
    position: Vec3,
    #[serde(default)]
    rotation: Vec3,
}

/// Records recovered from a map file plus a note for each one dropped
#[derive(Debug, Default)]
pub struct LoadedMap {
    pub map: GenerationResult,
    pub skipped: Vec<String>,
}

/// Serialize a map to the `{ "objects": [...] }` JSON format
pub fn to_json(map: &GenerationResult, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(map)
    } else {
        serde_json::to_string(map)
    };
    json.context("Failed to serialize map")
}

/// Write a map file
///
/// # Arguments
/// * `path` - Output file path
/// * `map` - Records to write
/// * `pretty` - Indent the JSON for hand editing
pub fn write_map(path: &Path, map: &GenerationResult, pretty: bool) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create map file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    if pretty {
        serde_json::to_writer_pretty(&mut writer, map)?;
    } else {
        serde_json::to_writer(&mut writer, map)?;
    }
    writer.flush()?;

    Ok(())
}

/// Read a map file, skipping records the entity registry would reject
pub fn read_map(path: &Path) -> Result<LoadedMap> {
    let file =
        File::open(path).with_context(|| format!("Failed to open map file: {}", path.display()))?;
    let raw: RawMapFile = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse map file: {}", path.display()))?;
    Ok(resolve(raw))
}

/// Parse map JSON held in memory
pub fn parse_map(json: &str) -> Result<LoadedMap> {
    let raw: RawMapFile = serde_json::from_str(json).context("Failed to parse map JSON")?;
    Ok(resolve(raw))
}

/// Turn raw objects into records.
///
/// A malformed object or an unknown type drops that one record with a warning;
/// the rest of the map still loads.
fn resolve(raw: RawMapFile) -> LoadedMap {
    let mut loaded = LoadedMap::default();

    for (i, value) in raw.objects.into_iter().enumerate() {
        let record = serde_json::from_value::<RawRecord>(value)
            .map_err(|e| format!("object {} is malformed: {}", i, e))
            .and_then(|raw| {
                let kind = raw
                    .kind
                    .parse::<EntityKind>()
                    .map_err(|e| format!("object {}: {}", i, e))?;
                Ok(PlacementRecord {
                    kind,
                    params: raw.params,
                    position: raw.position,
                    rotation: raw.rotation,
                })
            });

        match record {
            Ok(record) => loaded.map.objects.push(record),
            Err(reason) => {
                log::warn!("Skipping map {}", reason);
                loaded.skipped.push(reason);
            }
        }
    }

    loaded
}
