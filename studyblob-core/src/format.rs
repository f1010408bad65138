//! Спецификация формата STUDYBLOB версия 1.0
//!
//! Бинарное представление blob-а исследования: sidecar исследования с
//! таблицей смещений, затем блоки `[sidecar блока][сырые данные]`.
//! Все целые числа хранятся в порядке little-endian, весь JSON-текст — в
//! кодовых единицах UTF-16 (2 байта на единицу).
//!
//! ```text
//! [0..4)          u32   studySidecarLength = L0
//! [4..4+L0)       UTF-16 JSON { blockStarts, studyMetadata }
//! [4+L0..)        блоки, blockStarts[i] отсчитывается от 4+L0:
//!   [+0..+4)      u32   blockSidecarLength = L1
//!   [+4..+4+L1)   UTF-16 JSON { encodingMetadata, originalMetadata }
//!   [+4+L1..)     byteLength байт сырых данных
//! ```

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use studyblob_types::{BlobError, BlobResult};

/// Размер префикса длины любого sidecar-а (u32)
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Размер кодовой единицы UTF-16 в байтах
pub const CODE_UNIT_SIZE: usize = 2;

/// Ширина "элемента" JSON-блока: одна кодовая единица UTF-16
pub const JSON_BYTES_PER_ELEMENT: u32 = CODE_UNIT_SIZE as u32;

/// Читает u32 little-endian по смещению `off`, не выходя за `limit`.
pub fn read_u32_at(
    buf: &[u8],
    off: usize,
    limit: usize,
    what: &str,
) -> BlobResult<u32> {
    let bytes = slice_at(buf, off, LENGTH_PREFIX_SIZE, limit, what)?;

    Ok(LittleEndian::read_u32(bytes))
}

/// Возвращает `buf[off..off + len]`, если диапазон целиком лежит в
/// `buf[..limit]`.
pub fn slice_at<'a>(
    buf: &'a [u8],
    off: usize,
    len: usize,
    limit: usize,
    what: &str,
) -> BlobResult<&'a [u8]> {
    let limit = limit.min(buf.len());
    let end = off
        .checked_add(len)
        .ok_or_else(|| BlobError::malformed(format!("{what}: length overflow")))?;

    if end > limit {
        return Err(BlobError::malformed(format!(
            "{what}: needs bytes [{off}..{end}), only {limit} available"
        )));
    }

    Ok(&buf[off..end])
}

/// Дописывает кадр `[u32 длина][payload]` в выходной буфер.
pub fn write_frame(
    out: &mut Vec<u8>,
    payload: &[u8],
) -> BlobResult<()> {
    let len = to_u32(payload.len(), "sidecar length")?;

    out.write_u32::<LittleEndian>(len)?;
    out.extend_from_slice(payload);

    Ok(())
}

/// Проверяет, что значение помещается в 32-битное поле формата.
pub fn to_u32(
    n: usize,
    what: &str,
) -> BlobResult<u32> {
    u32::try_from(n)
        .map_err(|_| BlobError::mismatch(format!("{what} {n} does not fit in a 32-bit field")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_frame_layout() {
        let mut out = Vec::new();
        write_frame(&mut out, &[0xAA, 0xBB, 0xCC]).unwrap();
        assert_eq!(out, vec![3, 0, 0, 0, 0xAA, 0xBB, 0xCC]);
    }

    #[test]
    fn test_read_u32_le() {
        let buf = [0x78, 0x56, 0x34, 0x12, 0xFF];
        assert_eq!(read_u32_at(&buf, 0, buf.len(), "len").unwrap(), 0x1234_5678);
    }

    #[test]
    fn test_read_u32_out_of_bounds() {
        let buf = [1u8, 2, 3];
        let err = read_u32_at(&buf, 0, buf.len(), "study sidecar length").unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("study sidecar length"));
    }

    #[test]
    fn test_slice_respects_limit() {
        let buf = [0u8; 16];
        assert!(slice_at(&buf, 4, 4, 8, "block").is_ok());
        assert!(slice_at(&buf, 4, 5, 8, "block").is_err());
        // limit больше буфера обрезается до длины буфера
        assert!(slice_at(&buf, 12, 8, 64, "block").is_err());
        assert!(slice_at(&buf, usize::MAX, 2, 64, "block").is_err());
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_to_u32_overflow() {
        assert_eq!(to_u32(12, "n").unwrap(), 12);
        assert!(matches!(
            to_u32(u32::MAX as usize + 1, "byteLength"),
            Err(BlobError::EncodingMismatch(_))
        ));
    }
}
