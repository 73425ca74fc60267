//! RFC 6902 JSON patch documents, built in application order.

use json_patch::jsonptr::PointerBuf;
use json_patch::{AddOperation, Patch, PatchOperation, RemoveOperation};

/// Ordered list of patch operations. Operations are applied in sequence by
/// the API server, so the order of the calls is the order of application.
#[derive(Clone, Debug, Default)]
pub struct PatchBuilder {
    operations: Vec<PatchOperation>,
}

impl PatchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remove(&mut self, path: PointerBuf) -> &mut Self {
        self.operations.push(PatchOperation::Remove(RemoveOperation { path }));
        self
    }

    pub fn add(&mut self, path: PointerBuf, value: serde_json::Value) -> &mut Self {
        self.operations.push(PatchOperation::Add(AddOperation { path, value }));
        self
    }

    /// Adds `key` with `value` into the string map at `map_path`. When the map
    /// does not exist yet, an operation creating it is emitted right before.
    pub fn add_map_entry(
        &mut self,
        map_path: PointerBuf,
        map_exists: bool,
        key: &str,
        value: &str,
    ) -> &mut Self {
        if !map_exists {
            self.add(map_path.clone(), serde_json::json!({}));
        }
        let mut entry_path = map_path;
        entry_path.push_back(key);
        self.add(entry_path, serde_json::Value::from(value))
    }

    pub fn build(self) -> Vec<PatchOperation> {
        self.operations
    }
}

/// Serialize a list of operations into a JSON patch document.
pub fn encode(operations: Vec<PatchOperation>) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(&Patch(operations))
}
