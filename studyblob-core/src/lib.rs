//! Библиотека основного формата STUDYBLOB
//!
//! Эталонная реализация самоописывающего бинарного контейнера: несколько
//! типизированных блоков (числовые буферы или произвольные JSON-объекты) с
//! метаданными блоков и исследования в одной непрерывной последовательности
//! байт.
//!
//! # Быстрый старт
//!
//! ```
//! use serde_json::json;
//! use studyblob_core::{decode, BlobAssembler};
//!
//! let mut asm = BlobAssembler::new();
//! asm.add_block(vec![1.0f32, 2.0, 3.0], &json!({"unit": "mm"}), Some("Image2D"))?;
//! asm.set_study_metadata(&json!({"patient": "anon"}));
//! let blob = asm.build()?;
//!
//! let study = decode(&blob)?;
//! assert_eq!(study.blocks[0].original_type(), Some("Image2D"));
//! assert_eq!(study.blocks[0].raw_bytes().len(), 12);
//! # Ok::<(), studyblob_types::BlobError>(())
//! ```

pub mod assembler;
pub mod classifier;
pub mod config;
pub mod decoded;
pub mod format;
mod finite;
pub mod parser;
pub mod unicode_json;
pub mod view;

pub use assembler::*;
pub use classifier::*;
pub use config::*;
pub use decoded::*;
pub use parser::*;
pub use view::*;

/// Версия библиотеки.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
