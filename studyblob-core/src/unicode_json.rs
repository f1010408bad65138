//! Кодек UTF-16 JSON.
//!
//! Значение сериализуется в JSON-текст, затем каждая кодовая единица UTF-16
//! записывается двумя байтами little-endian.

use byteorder::{ByteOrder, LittleEndian};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use studyblob_types::{BlobError, BlobResult};

use crate::{finite::ensure_finite, format::CODE_UNIT_SIZE};

/// Сериализует значение в байты UTF-16LE JSON.
///
/// При ошибке сериализации (ключ map-а не строка, NaN или ±∞) байты не
/// создаются.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> BlobResult<Vec<u8>> {
    Ok(encode_text(&to_json_text(value)?))
}

/// Кодирует уже готовый текст в UTF-16LE.
pub fn encode_text(text: &str) -> Vec<u8> {
    let units: Vec<u16> = text.encode_utf16().collect();
    let mut out = vec![0u8; units.len() * CODE_UNIT_SIZE];

    LittleEndian::write_u16_into(&units, &mut out);
    out
}

/// Длина закодированного значения в байтах.
pub fn encoded_len<T: Serialize + ?Sized>(value: &T) -> BlobResult<usize> {
    Ok(to_json_text(value)?.encode_utf16().count() * CODE_UNIT_SIZE)
}

/// Переводит значение в `Value` с теми же правилами, что и `encode`.
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> BlobResult<Value> {
    to_value_checked(value).map_err(BlobError::Serialization)
}

pub(crate) fn to_value_checked<T: Serialize + ?Sized>(
    value: &T,
) -> Result<Value, serde_json::Error> {
    ensure_finite(value)?;
    serde_json::to_value(value)
}

fn to_json_text<T: Serialize + ?Sized>(value: &T) -> BlobResult<String> {
    ensure_finite(value)
        .and_then(|()| serde_json::to_string(value))
        .map_err(BlobError::Serialization)
}

/// Декодирует байты UTF-16LE обратно в текст.
pub fn decode_text(bytes: &[u8]) -> BlobResult<String> {
    if bytes.len() % CODE_UNIT_SIZE != 0 {
        return Err(BlobError::malformed(format!(
            "UTF-16 payload has odd length {}",
            bytes.len()
        )));
    }

    let mut units = vec![0u16; bytes.len() / CODE_UNIT_SIZE];
    LittleEndian::read_u16_into(bytes, &mut units);

    String::from_utf16(&units)
        .map_err(|e| BlobError::malformed(format!("invalid UTF-16 payload: {e}")))
}

/// Декодирует байты UTF-16LE JSON в значение типа `T`.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> BlobResult<T> {
    let text = decode_text(bytes)?;

    serde_json::from_str(&text)
        .map_err(|e| BlobError::malformed(format!("invalid JSON payload: {e}")))
}

/// Декодирует в динамическое JSON-значение.
pub fn decode_value(bytes: &[u8]) -> BlobResult<Value> {
    decode(bytes)
}
