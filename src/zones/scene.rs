use super::{Point, Polygon, Zone};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors from loading or interpreting zone files
#[derive(Debug, Error)]
pub enum ZoneError {
    #[error("failed to read or write zone file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed zone file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("zone '{name}' has no geometry")]
    EmptyGeometry { name: String },
}

/// The richer record shape callers typically parse zones from: a named area
/// whose geometry is a list of elements, each a list of rings, each a list
/// of `[x, y]` pairs. The engine only ever consumes the first ring of the
/// first element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneRecord {
    pub name: String,
    pub area: ZoneGeometry,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneGeometry {
    pub coordinates: Vec<Vec<Vec<[f64; 2]>>>,
}

impl ZoneRecord {
    /// Extract the outer ring of the first geometry element
    pub fn into_zone(self) -> Result<Zone, ZoneError> {
        let ring = self
            .area
            .coordinates
            .first()
            .and_then(|element| element.first())
            .ok_or(ZoneError::EmptyGeometry {
                name: self.name.clone(),
            })?;

        let vertices = ring.iter().map(|&[x, y]| Point::new(x, y)).collect();
        Ok(Zone::new(self.name, Polygon::from_vertices(vertices)))
    }
}

/// A zone set contains all named zones for one detection/render pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneSet {
    pub name: String,
    pub zones: Vec<Zone>,
}

impl ZoneSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            zones: Vec::new(),
        }
    }

    pub fn add_zone(&mut self, zone: Zone) {
        self.zones.push(zone);
    }

    /// Find a zone by its user-facing name
    pub fn zone(&self, name: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.name == name)
    }

    /// Build a set from rich records, keeping input order
    pub fn from_records(
        name: impl Into<String>,
        records: Vec<ZoneRecord>,
    ) -> Result<Self, ZoneError> {
        let zones = records
            .into_iter()
            .map(ZoneRecord::into_zone)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: name.into(),
            zones,
        })
    }

    /// Save the set to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ZoneError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load a set from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ZoneError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load a set from a JSON file of rich records (`[{name, area}, ...]`)
    pub fn load_records(path: impl AsRef<Path>) -> Result<Self, ZoneError> {
        let json = fs::read_to_string(&path)?;
        let records: Vec<ZoneRecord> = serde_json::from_str(&json)?;
        let name = path
            .as_ref()
            .file_stem()
            .map_or_else(|| "untitled".to_string(), |s| s.to_string_lossy().into_owned());
        Self::from_records(name, records)
    }
}

impl Default for ZoneSet {
    fn default() -> Self {
        Self::new("untitled")
    }
}
