use super::Snapshot;
use crate::error::PersistenceError;
use std::fs;

impl Snapshot {
    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Saves the snapshot to a file as pretty-printed JSON.
    pub fn save(&self, path: &str) -> Result<(), PersistenceError> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| PersistenceError::Io {
            path: path.to_string(),
            source,
        })
    }

    /// Loads a snapshot from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, PersistenceError> {
        let content = fs::read_to_string(path).map_err(|source| PersistenceError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&content)
    }
}
