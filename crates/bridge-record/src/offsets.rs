//! The `AeroflyBridge_offsets.json` descriptor: the only contract with
//! out-of-process consumers that read the shared record directly instead of
//! going over the network (spec §4.1, §6, §9 "Offsets descriptor").

use serde::Serialize;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OffsetsError {
    #[error("failed to write offsets descriptor to {0}: {1}")]
    Io(String, std::io::Error),
    #[error("failed to serialize offsets descriptor: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize)]
pub struct VariableOffset {
    pub name: String,
    pub group: String,
    pub logical_index: usize,
    pub data_type: &'static str,
    pub storage: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub struct_field_name: Option<String>,
    pub byte_offset: usize,
    pub byte_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_order: Option<&'static [&'static str]>,
    pub unit: String,
    pub message_id: u64,
    pub access: &'static str,
    pub flag: &'static str,
    pub is_event: bool,
    pub is_toggle: bool,
    pub is_active_flag: bool,
    pub is_value: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct OffsetsDescriptor {
    pub schema: &'static str,
    pub schema_version: u32,
    pub layout_version: u32,
    pub array_base_offset: usize,
    pub stride_bytes: usize,
    pub count: usize,
    pub variables: Vec<VariableOffset>,
}

impl OffsetsDescriptor {
    /// Serialize and write atomically: write to a sibling temp file, then
    /// rename over the destination so a reader never observes a partial
    /// descriptor (spec §9: "regenerating the descriptor atomically on init").
    pub fn write_atomic(&self, path: &Path) -> Result<(), OffsetsError> {
        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_vec_pretty(self)?;
        {
            let mut file = std::fs::File::create(&tmp_path)
                .map_err(|e| OffsetsError::Io(tmp_path.display().to_string(), e))?;
            file.write_all(&json)
                .map_err(|e| OffsetsError::Io(tmp_path.display().to_string(), e))?;
            file.sync_all()
                .map_err(|e| OffsetsError::Io(tmp_path.display().to_string(), e))?;
        }
        std::fs::rename(&tmp_path, path)
            .map_err(|e| OffsetsError::Io(path.display().to_string(), e))?;
        Ok(())
    }
}
