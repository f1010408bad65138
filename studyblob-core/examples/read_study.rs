//! Пример: чтение blob-а исследования через BlobParser
//!
//! Демонстрирует:
//! - чтение blob-а целиком в память и декодирование
//! - вывод метаданных исследования и дескрипторов блоков
//! - доступ к числовым данным без копирования

use std::fs;

use studyblob_core::{BlobParser, BlockPayload};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let input_path = "studyblob-core/test_output.sblob";

    // --- Весь blob должен быть в памяти до начала разбора ---
    let blob = fs::read(input_path)?;
    let study = match BlobParser::new().decode(&blob) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("✗ Decode failed: {e}");
            return Err(Box::new(e));
        }
    };

    println!("✓ Blob decoded ({} bytes)", blob.len());
    println!("  Study metadata : {}", study.study_metadata);
    println!("  Block starts   : {:?}", study.block_starts);

    for (i, block) in study.iter().enumerate() {
        let desc = &block.encoding_metadata;
        println!(
            "\n  [{i}] {} × {} B (signed={}), {} B, type={}",
            desc.data_type,
            desc.bytes_per_element,
            desc.signed,
            desc.byte_length,
            block.original_type().unwrap_or("-"),
        );
        println!("      metadata : {}", block.original_metadata);

        match &block.data {
            BlockPayload::Numeric(view) => println!(
                "      elements : {} {} (zero-copy={})",
                view.len(),
                view.kind(),
                view.is_borrowed()
            ),
            BlockPayload::Json { value, .. } => println!("      value    : {value}"),
        }
    }

    Ok(())
}
