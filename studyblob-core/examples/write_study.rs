//! Пример: сборка blob-а исследования через BlobAssembler
//!
//! Демонстрирует:
//! - добавление числовых блоков (синтетический срез 64×64 и профиль)
//! - добавление JSON-блока с протоколом реконструкции
//! - запись готового blob-а в файл

use std::fs::File;

use serde_json::json;
use studyblob_core::BlobAssembler;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let output_path = "studyblob-core/test_output.sblob";
    let mut asm = BlobAssembler::new();

    // --- Синтетический срез: радиальный градиент 64×64, uint16 ---
    let (width, height) = (64usize, 64usize);
    let slice: Vec<u16> = (0..width * height)
        .map(|i| {
            let (x, y) = ((i % width) as f32 - 32.0, (i / width) as f32 - 32.0);
            (4095.0 * (1.0 - (x * x + y * y).sqrt() / 45.3)).max(0.0) as u16
        })
        .collect();
    asm.add_block(
        slice,
        &json!({"dimensions": [width, height], "spacing": [0.5, 0.5], "unit": "mm"}),
        Some("Image2D"),
    )?;

    // --- Профиль интенсивности по центральной строке, float32 ---
    let profile: Vec<f32> = (0..width).map(|x| (x as f32 / 8.0).sin()).collect();
    asm.add_block(profile, &json!({"row": height / 2}), Some("Profile"))?;

    // --- Протокол реконструкции как произвольный JSON ---
    asm.add_block(
        json!({"kernel": "B30f", "iterations": 4, "operator": "anon"}),
        &json!({"kind": "provenance"}),
        None,
    )?;

    asm.set_study_metadata(&json!({"studyUid": "1.2.826.0.1.3680043", "modality": "CT"}));

    let blocks = asm.block_count();
    let mut file = File::create(output_path)?;
    let written = asm.write_to(&mut file)?;

    println!("✓ Записано: {output_path}");
    println!("  Blocks : {blocks}");
    println!("  Bytes  : {written}");

    Ok(())
}
