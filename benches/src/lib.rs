//! Общие генераторы данных для бенчмарков.

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde_json::json;
use studyblob_core::BlobAssembler;
use studyblob_types::{BlobResult, TypedArray};

/// Исследование из `volumes` томов float32 по `elements` элементов.
pub fn make_volumes(
    volumes: usize,
    elements: usize,
) -> Vec<TypedArray> {
    let mut rng = StdRng::seed_from_u64(42);

    (0..volumes)
        .map(|_| TypedArray::Float32((0..elements).map(|_| rng.gen::<f32>()).collect()))
        .collect()
}

/// Собирает blob из томов с типовыми метаданными.
pub fn build_blob(volumes: &[TypedArray]) -> BlobResult<Vec<u8>> {
    let mut asm = BlobAssembler::new();
    for (i, v) in volumes.iter().enumerate() {
        asm.add_block(v.clone(), &json!({"index": i, "unit": "HU"}), Some("Volume3D"))?;
    }
    asm.set_study_metadata(&json!({"modality": "CT"}));
    asm.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_blob_decodes() {
        let blob = build_blob(&make_volumes(2, 16)).unwrap();
        let study = studyblob_core::decode(&blob).unwrap();
        assert_eq!(study.len(), 2);
        assert_eq!(study.blocks[1].raw_bytes().len(), 64);
    }
}
