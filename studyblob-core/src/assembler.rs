use std::io::Write;

use log::{debug, trace};
use serde::Serialize;
use serde_json::Value;
use studyblob_types::{BlobError, BlobResult, BlockSidecar, EncodingDescriptor, StudySidecar};

use crate::{
    classifier::{encode_payload, BlockData},
    config::FormatConfig,
    format::{to_u32, write_frame, LENGTH_PREFIX_SIZE},
    unicode_json,
};

/// Сборщик blob-а исследования.
///
/// Накапливает блоки в порядке вызовов `add_block` и метаданные
/// исследования; `build` потребляет сборщик и выдаёт готовый blob.
pub struct BlobAssembler {
    config: FormatConfig,
    /// Сериализованные sidecar-ы блоков (UTF-16LE JSON)
    sidecars: Vec<Vec<u8>>,
    /// Сырые данные блоков
    payloads: Vec<Vec<u8>>,
    /// Ошибка конвертации откладывается до `build`
    study_metadata: Result<Value, serde_json::Error>,
}

impl BlobAssembler {
    pub fn new() -> Self {
        Self::with_config(FormatConfig::default())
    }

    pub fn with_config(config: FormatConfig) -> Self {
        Self {
            config,
            sidecars: Vec::new(),
            payloads: Vec::new(),
            study_metadata: Ok(Value::Null),
        }
    }

    /// Добавляет блок в конец списка.
    ///
    /// При ошибке сериализации метаданных ничего не добавляется.
    pub fn add_block<M: Serialize + ?Sized>(
        &mut self,
        data: impl Into<BlockData>,
        metadata: &M,
        original_type: Option<&str>,
    ) -> BlobResult<()> {
        let data = data.into();
        let (class, raw) = encode_payload(&data, self.config.signedness)?;

        let sidecar = BlockSidecar {
            encoding_metadata: EncodingDescriptor {
                original_type: original_type.map(str::to_owned),
                data_type: class.data_type,
                bytes_per_element: class.bytes_per_element,
                signed: class.signed,
                byte_length: to_u32(raw.len(), "byteLength")?,
            },
            original_metadata: unicode_json::to_value(metadata)?,
        };
        let sidecar_bytes = unicode_json::encode(&sidecar)?;

        trace!(
            "block #{}: {} {} B, sidecar {} B",
            self.payloads.len(),
            class.data_type,
            raw.len(),
            sidecar_bytes.len()
        );

        self.sidecars.push(sidecar_bytes);
        self.payloads.push(raw);

        Ok(())
    }

    /// Заменяет метаданные исследования (последняя запись побеждает).
    pub fn set_study_metadata<S: Serialize + ?Sized>(
        &mut self,
        value: &S,
    ) {
        self.study_metadata = unicode_json::to_value_checked(value);
    }

    /// Количество добавленных блоков.
    pub fn block_count(&self) -> usize {
        self.payloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    /// Точный размер blob-а, который вернёт `build`.
    pub fn encoded_len(&self) -> BlobResult<usize> {
        let (sidecar, blocks_len) = self.study_sidecar()?;
        let study_len = unicode_json::encoded_len(&sidecar)?;
        to_u32(study_len, "study sidecar length")?;

        Ok(LENGTH_PREFIX_SIZE + study_len + blocks_len)
    }

    /// Собирает blob.
    pub fn build(self) -> BlobResult<Vec<u8>> {
        let (sidecar, blocks_len) = self.study_sidecar()?;
        let study = unicode_json::encode(&sidecar)?;
        to_u32(study.len(), "study sidecar length")?;
        let mut out = Vec::with_capacity(LENGTH_PREFIX_SIZE + study.len() + blocks_len);

        write_frame(&mut out, &study)?;

        for (sidecar, raw) in self.sidecars.iter().zip(&self.payloads) {
            write_frame(&mut out, sidecar)?;
            out.extend_from_slice(raw);
        }

        debug!(
            "built blob: {} blocks, study sidecar {} B, total {} B",
            self.payloads.len(),
            study.len(),
            out.len()
        );

        Ok(out)
    }

    /// Собирает blob и передаёт его во `writer`. Возвращает число байт.
    pub fn write_to<W: Write>(
        self,
        writer: &mut W,
    ) -> BlobResult<usize> {
        let blob = self.build()?;

        writer.write_all(&blob)?;
        writer.flush()?;

        Ok(blob.len())
    }

    /// Таблица смещений: `blockStarts[i] = Σ_{k<i} (4 + sidecar_k + data_k)`.
    fn block_starts(&self) -> BlobResult<(Vec<u32>, usize)> {
        if self.sidecars.len() != self.payloads.len() {
            return Err(BlobError::Consistency {
                sidecars: self.sidecars.len(),
                payloads: self.payloads.len(),
            });
        }

        let mut starts = Vec::with_capacity(self.payloads.len());
        let mut offset = 0usize;

        for (sidecar, raw) in self.sidecars.iter().zip(&self.payloads) {
            starts.push(to_u32(offset, "block offset")?);
            offset += LENGTH_PREFIX_SIZE + sidecar.len() + raw.len();
        }

        Ok((starts, offset))
    }

    /// Sidecar исследования и длина области блоков.
    fn study_sidecar(&self) -> BlobResult<(StudySidecar, usize)> {
        let (block_starts, blocks_len) = self.block_starts()?;
        let study_metadata = self
            .study_metadata
            .as_ref()
            .map_err(|e| BlobError::Serialization(serde::ser::Error::custom(e)))?
            .clone();

        let sidecar = StudySidecar {
            block_starts,
            study_metadata,
        };

        Ok((sidecar, blocks_len))
    }
}

impl Default for BlobAssembler {
    fn default() -> Self {
        Self::new()
    }
}
