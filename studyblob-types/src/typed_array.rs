use crate::ElementKind;

/// Числовой буфер одного из поддерживаемых видов элементов.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedArray {
    Int8(Vec<i8>),
    Uint8(Vec<u8>),
    /// Те же байты, что и `Uint8`, но значения получены с насыщением
    Uint8Clamped(Vec<u8>),
    Int16(Vec<i16>),
    Uint16(Vec<u16>),
    Int32(Vec<i32>),
    Uint32(Vec<u32>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

impl TypedArray {
    pub fn kind(&self) -> ElementKind {
        match self {
            TypedArray::Int8(_) => ElementKind::Int8,
            TypedArray::Uint8(_) => ElementKind::Uint8,
            TypedArray::Uint8Clamped(_) => ElementKind::Uint8Clamped,
            TypedArray::Int16(_) => ElementKind::Int16,
            TypedArray::Uint16(_) => ElementKind::Uint16,
            TypedArray::Int32(_) => ElementKind::Int32,
            TypedArray::Uint32(_) => ElementKind::Uint32,
            TypedArray::Float32(_) => ElementKind::Float32,
            TypedArray::Float64(_) => ElementKind::Float64,
        }
    }

    /// Количество элементов
    pub fn len(&self) -> usize {
        match self {
            TypedArray::Int8(v) => v.len(),
            TypedArray::Uint8(v) | TypedArray::Uint8Clamped(v) => v.len(),
            TypedArray::Int16(v) => v.len(),
            TypedArray::Uint16(v) => v.len(),
            TypedArray::Int32(v) => v.len(),
            TypedArray::Uint32(v) => v.len(),
            TypedArray::Float32(v) => v.len(),
            TypedArray::Float64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Размер буфера в байтах (`len * bytes_per_element`)
    pub fn byte_len(&self) -> usize {
        self.len() * self.kind().bytes_per_element()
    }

    /// Строит clamped-буфер, насыщая значения в диапазон `0..=255`.
    pub fn clamped_from_f64(values: &[f64]) -> Self {
        TypedArray::Uint8Clamped(
            values
                .iter()
                .map(|v| if v.is_nan() { 0 } else { v.round().clamp(0.0, 255.0) as u8 })
                .collect(),
        )
    }
}

macro_rules! impl_from_vec {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<Vec<$ty>> for TypedArray {
                fn from(v: Vec<$ty>) -> Self {
                    TypedArray::$variant(v)
                }
            }
        )*
    };
}

impl_from_vec! {
    i8 => Int8,
    u8 => Uint8,
    i16 => Int16,
    u16 => Uint16,
    i32 => Int32,
    u32 => Uint32,
    f32 => Float32,
    f64 => Float64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec_kinds() {
        assert_eq!(TypedArray::from(vec![1i8]).kind(), ElementKind::Int8);
        assert_eq!(TypedArray::from(vec![1u8]).kind(), ElementKind::Uint8);
        assert_eq!(TypedArray::from(vec![1i16]).kind(), ElementKind::Int16);
        assert_eq!(TypedArray::from(vec![1u16]).kind(), ElementKind::Uint16);
        assert_eq!(TypedArray::from(vec![1i32]).kind(), ElementKind::Int32);
        assert_eq!(TypedArray::from(vec![1u32]).kind(), ElementKind::Uint32);
        assert_eq!(TypedArray::from(vec![1f32]).kind(), ElementKind::Float32);
        assert_eq!(TypedArray::from(vec![1f64]).kind(), ElementKind::Float64);
    }

    #[test]
    fn test_byte_len() {
        let a = TypedArray::from(vec![1.0f64, 2.0, 3.0]);
        assert_eq!(a.len(), 3);
        assert_eq!(a.byte_len(), 24);
        assert!(TypedArray::Int16(Vec::new()).is_empty());
    }

    #[test]
    fn test_clamped_saturates() {
        let a = TypedArray::clamped_from_f64(&[-5.0, 12.4, 300.0, f64::NAN]);
        assert_eq!(a, TypedArray::Uint8Clamped(vec![0, 12, 255, 0]));
        assert_eq!(a.kind(), ElementKind::Uint8Clamped);
    }
}
