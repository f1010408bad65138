//! Классификатор типизированных данных.
//!
//! Замкнутая таблица `ElementKind -> (dataType, bytesPerElement, signed)` и
//! обратное отображение для парсера.

use byteorder::{ByteOrder, LittleEndian};
use serde::Serialize;
use serde_json::Value;
use studyblob_types::{BlobError, BlobResult, DataType, ElementKind, TypedArray};

use crate::{config::SignednessConvention, format::JSON_BYTES_PER_ELEMENT, unicode_json};

/// Данные блока на входе сборщика.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockData {
    /// Числовой буфер одного из 9 видов
    Numeric(TypedArray),
    /// Произвольный JSON-объект
    Json(Value),
}

/// Результат классификации: `{dataType, bytesPerElement, signed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub data_type: DataType,
    pub bytes_per_element: u32,
    pub signed: bool,
}

/// Классификация любого не числового значения.
pub const JSON_CLASSIFICATION: Classification = Classification {
    data_type: DataType::Json,
    bytes_per_element: JSON_BYTES_PER_ELEMENT,
    signed: false,
};

impl BlockData {
    /// Переводит сериализуемое значение в JSON-блок.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> BlobResult<Self> {
        unicode_json::to_value(value).map(BlockData::Json)
    }
}

impl From<TypedArray> for BlockData {
    fn from(a: TypedArray) -> Self {
        BlockData::Numeric(a)
    }
}

impl From<Value> for BlockData {
    fn from(v: Value) -> Self {
        BlockData::Json(v)
    }
}

macro_rules! impl_block_data_from_vec {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<Vec<$ty>> for BlockData {
                fn from(v: Vec<$ty>) -> Self {
                    BlockData::Numeric(TypedArray::from(v))
                }
            }
        )*
    };
}

impl_block_data_from_vec!(i8, u8, i16, u16, i32, u32, f32, f64);

/// Классифицирует вид числового элемента.
pub fn classify_kind(
    kind: ElementKind,
    convention: SignednessConvention,
) -> Classification {
    Classification {
        data_type: kind.data_type(),
        bytes_per_element: kind.bytes_per_element() as u32,
        signed: convention.signed_flag(kind),
    }
}

/// Классифицирует данные блока.
pub fn classify(
    data: &BlockData,
    convention: SignednessConvention,
) -> Classification {
    match data {
        BlockData::Numeric(array) => classify_kind(array.kind(), convention),
        BlockData::Json(_) => JSON_CLASSIFICATION,
    }
}

/// Обратное отображение дескриптора в вид элемента.
///
/// Clamped-вид делит дескриптор с `Uint8` и восстанавливается как `Uint8`.
/// Для чисел с плавающей точкой флаг `signed` не учитывается.
pub fn element_kind_for(
    data_type: DataType,
    bytes_per_element: u32,
    signed: bool,
    convention: SignednessConvention,
) -> BlobResult<ElementKind> {
    // Под Legacy флаг signed инвертирован для целых
    let is_signed = match convention {
        SignednessConvention::Legacy => !signed,
        SignednessConvention::Natural => signed,
    };

    let kind = match (data_type, bytes_per_element, is_signed) {
        (DataType::Int, 1, true) => ElementKind::Int8,
        (DataType::Int, 1, false) => ElementKind::Uint8,
        (DataType::Int, 2, true) => ElementKind::Int16,
        (DataType::Int, 2, false) => ElementKind::Uint16,
        (DataType::Int, 4, true) => ElementKind::Int32,
        (DataType::Int, 4, false) => ElementKind::Uint32,
        (DataType::Float, 4, _) => ElementKind::Float32,
        (DataType::Float, 8, _) => ElementKind::Float64,
        _ => {
            return Err(BlobError::mismatch(format!(
                "no element kind for dataType={data_type}, bytesPerElement={bytes_per_element}, signed={signed}"
            )))
        }
    };

    Ok(kind)
}

/// Байты числового буфера в порядке little-endian.
pub fn typed_array_bytes(array: &TypedArray) -> Vec<u8> {
    let mut out = vec![0u8; array.byte_len()];

    match array {
        TypedArray::Int8(v) => {
            for (dst, src) in out.iter_mut().zip(v) {
                *dst = *src as u8;
            }
        }
        TypedArray::Uint8(v) | TypedArray::Uint8Clamped(v) => out.copy_from_slice(v),
        TypedArray::Int16(v) => LittleEndian::write_i16_into(v, &mut out),
        TypedArray::Uint16(v) => LittleEndian::write_u16_into(v, &mut out),
        TypedArray::Int32(v) => LittleEndian::write_i32_into(v, &mut out),
        TypedArray::Uint32(v) => LittleEndian::write_u32_into(v, &mut out),
        TypedArray::Float32(v) => LittleEndian::write_f32_into(v, &mut out),
        TypedArray::Float64(v) => LittleEndian::write_f64_into(v, &mut out),
    }

    out
}

/// Классифицирует данные и строит их сырые байты.
pub fn encode_payload(
    data: &BlockData,
    convention: SignednessConvention,
) -> BlobResult<(Classification, Vec<u8>)> {
    let raw = match data {
        BlockData::Numeric(array) => typed_array_bytes(array),
        BlockData::Json(value) => unicode_json::encode(value)?,
    };

    Ok((classify(data, convention), raw))
}
