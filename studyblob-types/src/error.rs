use thiserror::Error;

/// Результат для операций STUDYBLOB
pub type BlobResult<T> = std::result::Result<T, BlobError>;

/// Типы ошибок формата STUDYBLOB.
#[derive(Debug, Error)]
pub enum BlobError {
    /// Значение не может быть представлено как JSON
    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Нарушен внутренний инвариант сборщика (ошибка в коде, а не во входе)
    #[error("Consistency error: {sidecars} sidecars vs {payloads} payloads")]
    Consistency { sidecars: usize, payloads: usize },

    /// Объявленные длины выходят за пределы данных, битый UTF-16 или JSON
    #[error("Malformed blob: {0}")]
    MalformedBlob(String),

    /// `byteLength` не согласуется с `bytesPerElement` или с данными
    #[error("Encoding mismatch: {0}")]
    EncodingMismatch(String),

    /// Ошибки ввода/вывода при получении или передаче blob
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BlobError {
    /// Удобные конструкторы
    pub fn malformed<S: Into<String>>(s: S) -> Self {
        Self::MalformedBlob(s.into())
    }

    pub fn mismatch<S: Into<String>>(s: S) -> Self {
        Self::EncodingMismatch(s.into())
    }

    /// `true` для ошибок, вызванных повреждённым или усечённым входом.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedBlob(_))
    }
}
