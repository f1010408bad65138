use std::{borrow::Cow, io::Read};

use log::{debug, trace};
use studyblob_types::{BlobError, BlobResult, BlockSidecar, DataType, StudySidecar};

use crate::{
    classifier::element_kind_for,
    config::FormatConfig,
    decoded::{BlockPayload, DecodedBlock, DecodedStudy},
    format::{read_u32_at, slice_at, JSON_BYTES_PER_ELEMENT, LENGTH_PREFIX_SIZE},
    unicode_json,
    view::NumericView,
};

/// Парсер blob-ов исследования.
///
/// Не хранит изменяемого состояния: каждый вызов `decode` — чистая функция
/// от входных байтов. Декодирование "всё или ничего": ошибка в любом блоке
/// прерывает разбор без частичного результата.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlobParser {
    config: FormatConfig,
}

impl BlobParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FormatConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    /// Читает sidecar исследования. Возвращает его и абсолютное смещение
    /// начала области блоков.
    pub fn read_study_sidecar(
        &self,
        blob: &[u8],
    ) -> BlobResult<(StudySidecar, usize)> {
        let study_len = read_u32_at(blob, 0, blob.len(), "study sidecar length")? as usize;
        let payload = slice_at(
            blob,
            LENGTH_PREFIX_SIZE,
            study_len,
            blob.len(),
            "study sidecar",
        )?;
        let sidecar: StudySidecar = unicode_json::decode(payload)?;

        validate_block_starts(&sidecar.block_starts)?;

        Ok((sidecar, LENGTH_PREFIX_SIZE + study_len))
    }

    /// Декодирует blob целиком.
    pub fn decode<'a>(
        &self,
        blob: &'a [u8],
    ) -> BlobResult<DecodedStudy<'a>> {
        let (sidecar, region_start) = self.read_study_sidecar(blob)?;
        let StudySidecar {
            block_starts,
            study_metadata,
        } = sidecar;

        let mut blocks = Vec::with_capacity(block_starts.len());

        for (index, &start) in block_starts.iter().enumerate() {
            let limit = match block_starts.get(index + 1) {
                Some(&next) => absolute(region_start, next)?.min(blob.len()),
                None => blob.len(),
            };
            let offset = absolute(region_start, start)?;

            blocks.push(self.decode_block(blob, index, offset, limit)?);
        }

        debug!(
            "decoded blob: {} blocks, {} B, blocks region at {region_start}",
            blocks.len(),
            blob.len()
        );

        Ok(DecodedStudy {
            study_metadata,
            block_starts,
            blocks,
        })
    }

    /// Полностью читает blob из `reader` и декодирует его.
    pub fn decode_reader<R: Read>(
        &self,
        reader: &mut R,
    ) -> BlobResult<DecodedStudy<'static>> {
        let blob = read_blob(reader)?;

        Ok(self.decode(&blob)?.into_owned())
    }

    /// Разбирает один блок, не выходя за `limit` (начало следующего блока
    /// или конец blob-а).
    fn decode_block<'a>(
        &self,
        blob: &'a [u8],
        index: usize,
        offset: usize,
        limit: usize,
    ) -> BlobResult<DecodedBlock<'a>> {
        let sidecar_len = read_u32_at(
            blob,
            offset,
            limit,
            &format!("block #{index} sidecar length"),
        )? as usize;

        let sidecar_off = offset + LENGTH_PREFIX_SIZE;
        let sidecar_bytes = slice_at(
            blob,
            sidecar_off,
            sidecar_len,
            limit,
            &format!("block #{index} sidecar"),
        )?;
        let sidecar: BlockSidecar = unicode_json::decode(sidecar_bytes)?;
        let desc = &sidecar.encoding_metadata;

        let data_off = sidecar_off + sidecar_len;
        let raw = slice_at(
            blob,
            data_off,
            desc.byte_length as usize,
            limit,
            &format!("block #{index} data"),
        )?;

        let (data, elements) = match desc.data_type {
            DataType::Json => {
                if desc.bytes_per_element != JSON_BYTES_PER_ELEMENT {
                    return Err(BlobError::mismatch(format!(
                        "block #{index}: json block with bytesPerElement {}",
                        desc.bytes_per_element
                    )));
                }
                let value = unicode_json::decode_value(raw)?;
                (
                    BlockPayload::Json {
                        value,
                        bytes: Cow::Borrowed(raw),
                    },
                    raw.len() / JSON_BYTES_PER_ELEMENT as usize,
                )
            }
            DataType::Int | DataType::Float => {
                let kind = element_kind_for(
                    desc.data_type,
                    desc.bytes_per_element,
                    desc.signed,
                    self.config.signedness,
                )?;
                let elements = desc.element_count().ok_or_else(|| {
                    BlobError::mismatch(format!(
                        "block #{index}: byteLength {} is not a multiple of bytesPerElement {}",
                        desc.byte_length, desc.bytes_per_element
                    ))
                })?;
                (BlockPayload::Numeric(NumericView::new(kind, raw)?), elements)
            }
        };

        let end = data_off + raw.len();
        if end < limit {
            debug!("block #{index}: {} unused bytes after data", limit - end);
        }
        trace!(
            "block #{index} at {offset}: {} × {elements}, {} B",
            desc.data_type,
            raw.len()
        );

        Ok(DecodedBlock {
            encoding_metadata: sidecar.encoding_metadata,
            original_metadata: sidecar.original_metadata,
            data,
        })
    }
}

/// Декодирует blob с конфигурацией по умолчанию.
pub fn decode(blob: &[u8]) -> BlobResult<DecodedStudy<'_>> {
    BlobParser::new().decode(blob)
}

/// Читает весь blob в память до начала разбора.
pub fn read_blob<R: Read>(reader: &mut R) -> BlobResult<Vec<u8>> {
    let mut blob = Vec::new();
    reader.read_to_end(&mut blob)?;

    Ok(blob)
}

/// `blockStarts[0] == 0` и строгое возрастание.
fn validate_block_starts(starts: &[u32]) -> BlobResult<()> {
    if let Some(&first) = starts.first() {
        if first != 0 {
            return Err(BlobError::malformed(format!(
                "blockStarts[0] must be 0, found {first}"
            )));
        }
    }

    for (i, pair) in starts.windows(2).enumerate() {
        if pair[1] <= pair[0] {
            return Err(BlobError::malformed(format!(
                "blockStarts not strictly increasing at index {}: {} -> {}",
                i + 1,
                pair[0],
                pair[1]
            )));
        }
    }

    Ok(())
}

fn absolute(
    region_start: usize,
    start: u32,
) -> BlobResult<usize> {
    region_start
        .checked_add(start as usize)
        .ok_or_else(|| BlobError::malformed(format!("block offset {start} overflows")))
}

#[cfg(test)]
mod tests {
    use byteorder::{LittleEndian, WriteBytesExt};
    use serde_json::json;
    use studyblob_types::ElementKind;

    use super::*;
    use crate::{assembler::BlobAssembler, config::SignednessConvention, format::write_frame};

    /// Собирает blob вручную из готовых sidecar-ов и данных.
    fn handmade_blob(
        block_starts: Vec<u32>,
        blocks: &[(serde_json::Value, Vec<u8>)],
    ) -> Vec<u8> {
        let study = unicode_json::encode(&json!({
            "blockStarts": block_starts,
            "studyMetadata": {"source": "handmade"},
        }))
        .unwrap();

        let mut out = Vec::new();
        write_frame(&mut out, &study).unwrap();
        for (sidecar, raw) in blocks {
            write_frame(&mut out, &unicode_json::encode(sidecar).unwrap()).unwrap();
            out.extend_from_slice(raw);
        }
        out
    }

    fn int_sidecar(
        bytes_per_element: u32,
        signed: bool,
        byte_length: u32,
    ) -> serde_json::Value {
        json!({
            "encodingMetadata": {
                "originalType": null,
                "dataType": "int",
                "bytesPerElement": bytes_per_element,
                "signed": signed,
                "byteLength": byte_length,
            },
            "originalMetadata": {},
        })
    }

    #[test]
    fn test_too_short_for_length() {
        for len in 0..4 {
            let err = decode(&vec![0u8; len]).unwrap_err();
            assert!(err.is_malformed(), "len={len}");
        }
    }

    #[test]
    fn test_study_length_exceeds_blob() {
        let mut blob = Vec::new();
        blob.write_u32::<LittleEndian>(100).unwrap();
        blob.extend_from_slice(&[b'{', 0, b'}', 0]);

        assert!(decode(&blob).unwrap_err().is_malformed());
    }

    #[test]
    fn test_handmade_single_block() {
        let blob = handmade_blob(vec![0], &[(int_sidecar(2, false, 4), vec![0xFF, 0xFF, 1, 0])]);
        let study = decode(&blob).unwrap();

        assert_eq!(study.study_metadata, json!({"source": "handmade"}));
        assert_eq!(study.len(), 1);

        // Legacy: signed=false у целых означает знаковый тип
        let view = study.blocks[0].data.as_numeric().unwrap();
        assert_eq!(view.kind(), ElementKind::Int16);
        assert_eq!(view.as_slice::<i16>().unwrap().as_ref(), &[-1, 1]);
    }

    #[test]
    fn test_natural_convention_reads_same_flag_differently() {
        let blob = handmade_blob(vec![0], &[(int_sidecar(2, false, 4), vec![0xFF, 0xFF, 1, 0])]);
        let parser = BlobParser::with_config(FormatConfig::new(SignednessConvention::Natural));
        let study = parser.decode(&blob).unwrap();

        let view = study.blocks[0].data.as_numeric().unwrap();
        assert_eq!(view.kind(), ElementKind::Uint16);
        assert_eq!(view.as_slice::<u16>().unwrap().as_ref(), &[0xFFFF, 1]);
    }

    #[test]
    fn test_byte_length_not_multiple() {
        let blob = handmade_blob(vec![0], &[(int_sidecar(4, true, 6), vec![0u8; 6])]);
        assert!(matches!(
            decode(&blob),
            Err(BlobError::EncodingMismatch(_))
        ));
    }

    #[test]
    fn test_unknown_descriptor_combination() {
        let blob = handmade_blob(vec![0], &[(int_sidecar(8, true, 8), vec![0u8; 8])]);
        assert!(matches!(
            decode(&blob),
            Err(BlobError::EncodingMismatch(_))
        ));
    }

    #[test]
    fn test_data_overruns_next_block() {
        // Первый блок заявляет 8 байт, но следующий начинается через 4
        let first = unicode_json::encode(&int_sidecar(1, true, 8)).unwrap();
        let second_start = (4 + first.len() + 4) as u32;
        let blob = handmade_blob(
            vec![0, second_start],
            &[
                (int_sidecar(1, true, 8), vec![1u8; 4]),
                (int_sidecar(1, true, 4), vec![2u8; 4]),
            ],
        );

        assert!(decode(&blob).unwrap_err().is_malformed());
    }

    #[test]
    fn test_block_starts_validated() {
        let blob = handmade_blob(vec![4], &[]);
        assert!(decode(&blob).unwrap_err().is_malformed());

        let blob = handmade_blob(vec![0, 0], &[]);
        assert!(decode(&blob).unwrap_err().is_malformed());
    }

    #[test]
    fn test_block_beyond_blob() {
        let blob = handmade_blob(vec![0, 1000], &[(int_sidecar(1, true, 2), vec![1u8, 2])]);
        assert!(decode(&blob).unwrap_err().is_malformed());
    }

    #[test]
    fn test_json_block_odd_length() {
        let sidecar = json!({
            "encodingMetadata": {
                "originalType": null,
                "dataType": "json",
                "bytesPerElement": 2,
                "signed": false,
                "byteLength": 3,
            },
            "originalMetadata": null,
        });
        let blob = handmade_blob(vec![0], &[(sidecar, vec![b'1', 0, 0])]);
        assert!(decode(&blob).unwrap_err().is_malformed());
    }

    #[test]
    fn test_json_block_wrong_width() {
        let sidecar = json!({
            "encodingMetadata": {
                "originalType": null,
                "dataType": "json",
                "bytesPerElement": 4,
                "signed": false,
                "byteLength": 4,
            },
            "originalMetadata": null,
        });
        let blob = handmade_blob(vec![0], &[(sidecar, vec![b'1', 0, b'2', 0])]);
        assert!(matches!(
            decode(&blob),
            Err(BlobError::EncodingMismatch(_))
        ));
    }

    #[test]
    fn test_trailing_gap_tolerated() {
        let mut blob = handmade_blob(vec![0], &[(int_sidecar(1, true, 2), vec![7u8, 8])]);
        blob.extend_from_slice(&[0u8; 5]);

        let study = decode(&blob).unwrap();
        assert_eq!(study.blocks[0].raw_bytes(), &[7, 8]);
    }

    #[test]
    fn test_assembler_parser_round_trip() {
        let mut asm = BlobAssembler::new();
        asm.add_block(vec![1.0f32, 2.0, 3.0], &json!({"unit": "mm"}), Some("Image2D"))
            .unwrap();
        asm.add_block(json!({"operator": "QA"}), &json!({"kind": "provenance"}), None)
            .unwrap();
        asm.set_study_metadata(&json!({"series": 2}));
        let blob = asm.build().unwrap();

        let study = decode(&blob).unwrap();
        assert_eq!(study.study_metadata, json!({"series": 2}));
        assert_eq!(study.blocks[0].original_type(), Some("Image2D"));
        assert_eq!(study.blocks[1].original_type(), None);
        assert_eq!(
            study.blocks[1].data.as_json(),
            Some(&json!({"operator": "QA"}))
        );
        assert_eq!(study.blocks[1].data_type(), DataType::Json);
    }

    #[test]
    fn test_read_blob_from_reader() {
        let mut asm = BlobAssembler::new();
        asm.add_block(vec![5u8; 3], &json!({}), None).unwrap();
        let blob = asm.build().unwrap();

        let study = BlobParser::new()
            .decode_reader(&mut std::io::Cursor::new(blob.clone()))
            .unwrap();
        assert_eq!(study.blocks[0].raw_bytes(), &[5, 5, 5]);
    }
}
