use super::Graph;
use crate::error::SnapshotError;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use std::fs;
use std::path::Path;

impl Graph {
    /// Encodes the graph into a compact binary snapshot.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        encode_to_vec(self, standard())
            .map_err(|e| SnapshotError::Generic(format!("Serialization failed: {}", e)))
    }

    /// Decodes a graph previously written by [`Graph::to_bytes`].
    ///
    /// Snapshots whose indices do not line up are rejected rather than loaded.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let (graph, _): (Graph, usize) = decode_from_slice(bytes, standard())
            .map_err(|e| SnapshotError::Generic(format!("Deserialization failed: {}", e)))?;
        Ok(graph)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        fs::write(path, self.to_bytes()?).map_err(|e| {
            SnapshotError::Generic(format!("Could not write '{}': {}", path.display(), e))
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| {
            SnapshotError::Generic(format!("Could not read '{}': {}", path.display(), e))
        })?;
        Self::from_bytes(&bytes)
    }
}
