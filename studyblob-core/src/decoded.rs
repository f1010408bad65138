use std::borrow::Cow;

use serde_json::Value;
use studyblob_types::{DataType, EncodingDescriptor};

use crate::view::NumericView;

/// Восстановленные данные блока.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockPayload<'a> {
    /// Числовой буфер (представление поверх байтов blob-а)
    Numeric(NumericView<'a>),
    /// JSON-объект и его исходные байты UTF-16LE
    Json { value: Value, bytes: Cow<'a, [u8]> },
}

/// Один декодированный блок.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedBlock<'a> {
    pub encoding_metadata: EncodingDescriptor,
    pub original_metadata: Value,
    pub data: BlockPayload<'a>,
}

/// Результат декодирования blob-а.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedStudy<'a> {
    pub study_metadata: Value,
    /// Таблица смещений в том виде, в каком она записана в blob
    pub block_starts: Vec<u32>,
    pub blocks: Vec<DecodedBlock<'a>>,
}

impl<'a> BlockPayload<'a> {
    pub fn raw_bytes(&self) -> &[u8] {
        match self {
            BlockPayload::Numeric(view) => view.raw_bytes(),
            BlockPayload::Json { bytes, .. } => bytes.as_ref(),
        }
    }

    pub fn as_numeric(&self) -> Option<&NumericView<'a>> {
        match self {
            BlockPayload::Numeric(view) => Some(view),
            BlockPayload::Json { .. } => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            BlockPayload::Json { value, .. } => Some(value),
            BlockPayload::Numeric(_) => None,
        }
    }

    pub fn into_owned(self) -> BlockPayload<'static> {
        match self {
            BlockPayload::Numeric(view) => BlockPayload::Numeric(view.into_owned()),
            BlockPayload::Json { value, bytes } => BlockPayload::Json {
                value,
                bytes: Cow::Owned(bytes.into_owned()),
            },
        }
    }
}

impl<'a> DecodedBlock<'a> {
    /// Непрозрачный тег `originalType` из дескриптора.
    pub fn original_type(&self) -> Option<&str> {
        self.encoding_metadata.original_type.as_deref()
    }

    pub fn data_type(&self) -> DataType {
        self.encoding_metadata.data_type
    }

    /// Сырые байты блока, побайтно равные записанным.
    pub fn raw_bytes(&self) -> &[u8] {
        self.data.raw_bytes()
    }

    pub fn into_owned(self) -> DecodedBlock<'static> {
        DecodedBlock {
            encoding_metadata: self.encoding_metadata,
            original_metadata: self.original_metadata,
            data: self.data.into_owned(),
        }
    }
}

impl<'a> DecodedStudy<'a> {
    /// Количество блоков
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DecodedBlock<'a>> {
        self.blocks.iter()
    }

    /// Отвязывает результат от исходного blob-а.
    pub fn into_owned(self) -> DecodedStudy<'static> {
        DecodedStudy {
            study_metadata: self.study_metadata,
            block_starts: self.block_starts,
            blocks: self
                .blocks
                .into_iter()
                .map(DecodedBlock::into_owned)
                .collect(),
        }
    }
}

impl<'a> IntoIterator for DecodedStudy<'a> {
    type Item = DecodedBlock<'a>;
    type IntoIter = std::vec::IntoIter<DecodedBlock<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.into_iter()
    }
}

impl<'s, 'a> IntoIterator for &'s DecodedStudy<'a> {
    type Item = &'s DecodedBlock<'a>;
    type IntoIter = std::slice::Iter<'s, DecodedBlock<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
