use crate::DataType;

/// Тип элемента числового буфера (замкнутое множество из 9 видов)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// 8-битное знаковое целое
    Int8,
    /// 8-битное беззнаковое целое
    Uint8,
    /// 8-битное беззнаковое целое с насыщением (clamped)
    Uint8Clamped,
    /// 16-битное знаковое целое
    Int16,
    /// 16-битное беззнаковое целое
    Uint16,
    /// 32-битное знаковое целое
    Int32,
    /// 32-битное беззнаковое целое
    Uint32,
    /// 32-битное число с плавающей точкой
    Float32,
    /// 64-битное число с плавающей точкой
    Float64,
}

impl ElementKind {
    /// Все виды элементов в фиксированном порядке.
    pub const ALL: [ElementKind; 9] = [
        ElementKind::Int8,
        ElementKind::Uint8,
        ElementKind::Uint8Clamped,
        ElementKind::Int16,
        ElementKind::Uint16,
        ElementKind::Int32,
        ElementKind::Uint32,
        ElementKind::Float32,
        ElementKind::Float64,
    ];

    /// Размер одного элемента в байтах
    pub fn bytes_per_element(&self) -> usize {
        match self {
            ElementKind::Int8 | ElementKind::Uint8 | ElementKind::Uint8Clamped => 1,
            ElementKind::Int16 | ElementKind::Uint16 => 2,
            ElementKind::Int32 | ElementKind::Uint32 | ElementKind::Float32 => 4,
            ElementKind::Float64 => 8,
        }
    }

    pub fn data_type(&self) -> DataType {
        match self {
            ElementKind::Float32 | ElementKind::Float64 => DataType::Float,
            _ => DataType::Int,
        }
    }

    /// Знаковость значений самого типа (без учёта соглашения формата).
    pub fn is_signed_type(&self) -> bool {
        matches!(
            self,
            ElementKind::Int8
                | ElementKind::Int16
                | ElementKind::Int32
                | ElementKind::Float32
                | ElementKind::Float64
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Int8 => "int8",
            ElementKind::Uint8 => "uint8",
            ElementKind::Uint8Clamped => "uint8_clamped",
            ElementKind::Int16 => "int16",
            ElementKind::Uint16 => "uint16",
            ElementKind::Int32 => "int32",
            ElementKind::Uint32 => "uint32",
            ElementKind::Float32 => "float32",
            ElementKind::Float64 => "float64",
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_sizes() {
        let sizes: Vec<usize> = ElementKind::ALL
            .iter()
            .map(|k| k.bytes_per_element())
            .collect();
        assert_eq!(sizes, vec![1, 1, 1, 2, 2, 4, 4, 4, 8]);
    }

    #[test]
    fn test_data_types() {
        for kind in ElementKind::ALL {
            let expected = match kind {
                ElementKind::Float32 | ElementKind::Float64 => DataType::Float,
                _ => DataType::Int,
            };
            assert_eq!(kind.data_type(), expected, "{kind}");
        }
    }

    #[test]
    fn test_clamped_is_unsigned() {
        assert!(!ElementKind::Uint8Clamped.is_signed_type());
        assert!(ElementKind::Int8.is_signed_type());
    }
}
