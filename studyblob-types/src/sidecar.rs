use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::EncodingDescriptor;

/// Sidecar уровня исследования: таблица смещений блоков + метаданные.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySidecar {
    /// Смещение каждого блока от начала области блоков
    pub block_starts: Vec<u32>,
    #[serde(default)]
    pub study_metadata: Value,
}

/// Sidecar блока: дескриптор кодирования + исходные метаданные.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSidecar {
    pub encoding_metadata: EncodingDescriptor,
    #[serde(default)]
    pub original_metadata: Value,
}
