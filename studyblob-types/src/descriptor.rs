use serde::{Deserialize, Serialize};

use crate::DataType;

/// Дескриптор кодирования блока (`encodingMetadata`).
///
/// Единственный источник информации о том, как интерпретировать сырые
/// байты блока.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodingDescriptor {
    /// Непрозрачный тег вызывающей стороны (например, `"Image2D"`)
    #[serde(default)]
    pub original_type: Option<String>,
    /// Класс данных: `int`, `float` или `json`
    pub data_type: DataType,
    /// Ширина элемента в байтах: 1, 2, 4 или 8
    pub bytes_per_element: u32,
    /// Флаг знаковости (см. `SignednessConvention` в studyblob-core)
    pub signed: bool,
    /// Длина сырых данных блока в байтах
    pub byte_length: u32,
}

impl EncodingDescriptor {
    /// Количество элементов, если `byte_length` кратна ширине элемента.
    pub fn element_count(&self) -> Option<usize> {
        if self.bytes_per_element == 0 || self.byte_length % self.bytes_per_element != 0 {
            return None;
        }

        Some((self.byte_length / self.bytes_per_element) as usize)
    }
}
