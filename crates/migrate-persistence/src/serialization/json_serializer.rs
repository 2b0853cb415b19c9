use crate::traits::Serializer;
use migrate_core::{MigrateError, MigrateResult};

/// Pretty-printing JSON encoding for snapshots and audit files
pub struct JsonSerializer;

impl<T: serde::Serialize + serde::de::DeserializeOwned> Serializer<T> for JsonSerializer {
    fn serialize(&self, data: &T) -> MigrateResult<Vec<u8>> {
        serde_json::to_vec_pretty(data).map_err(|e| MigrateError::Serialization(e.to_string()))
    }

    fn deserialize(&self, bytes: &[u8]) -> MigrateResult<T> {
        serde_json::from_slice(bytes).map_err(|e| MigrateError::Serialization(e.to_string()))
    }
}
