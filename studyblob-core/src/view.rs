//! Типизированные представления сырых байтов блока.
//!
//! `NumericView` хранит вид элемента и байты блока. Если срез выровнен под
//! `T` (и платформа little-endian), `as_slice` возвращает заимствование без
//! копирования, иначе копирует с разбором little-endian.

use std::borrow::Cow;

use byteorder::{ByteOrder, LittleEndian};
use studyblob_types::{BlobError, BlobResult, ElementKind, TypedArray};

/// Числовой тип элемента, в который можно интерпретировать байты блока.
pub trait Element: bytemuck::Pod {
    /// Подходит ли тип для данного вида элемента.
    fn matches(kind: ElementKind) -> bool;

    /// Читает одно значение little-endian (`chunk.len() == size_of::<Self>()`).
    fn read_le(chunk: &[u8]) -> Self;
}

macro_rules! impl_element {
    ($ty:ty, [$($kind:ident),+], |$chunk:ident| $read:expr) => {
        impl Element for $ty {
            fn matches(kind: ElementKind) -> bool {
                matches!(kind, $(ElementKind::$kind)|+)
            }

            fn read_le($chunk: &[u8]) -> Self {
                $read
            }
        }
    };
}

impl_element!(i8, [Int8], |c| c[0] as i8);
impl_element!(u8, [Uint8, Uint8Clamped], |c| c[0]);
impl_element!(i16, [Int16], |c| LittleEndian::read_i16(c));
impl_element!(u16, [Uint16], |c| LittleEndian::read_u16(c));
impl_element!(i32, [Int32], |c| LittleEndian::read_i32(c));
impl_element!(u32, [Uint32], |c| LittleEndian::read_u32(c));
impl_element!(f32, [Float32], |c| LittleEndian::read_f32(c));
impl_element!(f64, [Float64], |c| LittleEndian::read_f64(c));

/// Представление числового блока поверх его сырых байтов.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericView<'a> {
    kind: ElementKind,
    bytes: Cow<'a, [u8]>,
}

impl<'a> NumericView<'a> {
    /// Создаёт представление; длина должна быть кратна ширине элемента.
    pub fn new(
        kind: ElementKind,
        bytes: impl Into<Cow<'a, [u8]>>,
    ) -> BlobResult<Self> {
        let bytes = bytes.into();
        let width = kind.bytes_per_element();

        if bytes.len() % width != 0 {
            return Err(BlobError::mismatch(format!(
                "byteLength {} is not a multiple of bytesPerElement {width} ({kind})",
                bytes.len()
            )));
        }

        Ok(Self { kind, bytes })
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Количество элементов
    pub fn len(&self) -> usize {
        self.bytes.len() / self.kind.bytes_per_element()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Сырые байты блока без изменений.
    pub fn raw_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// `true`, если байты заимствованы из исходного blob-а.
    pub fn is_borrowed(&self) -> bool {
        matches!(self.bytes, Cow::Borrowed(_))
    }

    /// Интерпретирует байты как срез `T`.
    ///
    /// `EncodingMismatch`, если `T` не соответствует виду элемента.
    pub fn as_slice<T: Element>(&self) -> BlobResult<Cow<'_, [T]>> {
        if !T::matches(self.kind) {
            return Err(BlobError::mismatch(format!(
                "block holds {} elements, requested {}",
                self.kind,
                std::any::type_name::<T>()
            )));
        }

        Ok(self.cast())
    }

    fn cast<T: Element>(&self) -> Cow<'_, [T]> {
        if cfg!(target_endian = "little") {
            if let Ok(slice) = bytemuck::try_cast_slice::<u8, T>(&self.bytes) {
                return Cow::Borrowed(slice);
            }
        }

        Cow::Owned(
            self.bytes
                .chunks_exact(std::mem::size_of::<T>())
                .map(T::read_le)
                .collect(),
        )
    }

    /// Копирует данные в собственный `TypedArray`.
    pub fn to_typed_array(&self) -> TypedArray {
        match self.kind {
            ElementKind::Int8 => TypedArray::Int8(self.cast::<i8>().into_owned()),
            ElementKind::Uint8 => TypedArray::Uint8(self.bytes.to_vec()),
            ElementKind::Uint8Clamped => TypedArray::Uint8Clamped(self.bytes.to_vec()),
            ElementKind::Int16 => TypedArray::Int16(self.cast::<i16>().into_owned()),
            ElementKind::Uint16 => TypedArray::Uint16(self.cast::<u16>().into_owned()),
            ElementKind::Int32 => TypedArray::Int32(self.cast::<i32>().into_owned()),
            ElementKind::Uint32 => TypedArray::Uint32(self.cast::<u32>().into_owned()),
            ElementKind::Float32 => TypedArray::Float32(self.cast::<f32>().into_owned()),
            ElementKind::Float64 => TypedArray::Float64(self.cast::<f64>().into_owned()),
        }
    }

    /// Отвязывает представление от исходного blob-а.
    pub fn into_owned(self) -> NumericView<'static> {
        NumericView {
            kind: self.kind,
            bytes: Cow::Owned(self.bytes.into_owned()),
        }
    }
}
