use serde::{Deserialize, Serialize};

/// Класс данных блока (`dataType` в дескрипторе кодирования)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Целые числа фиксированной ширины
    Int,
    /// Числа с плавающей точкой IEEE 754
    Float,
    /// Произвольный объект, закодированный как UTF-16 JSON
    Json,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Int => "int",
            DataType::Float => "float",
            DataType::Json => "json",
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, DataType::Json)
    }
}

impl std::fmt::Display for DataType {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_names() {
        for dt in [DataType::Int, DataType::Float, DataType::Json] {
            let wire = format!("\"{}\"", dt.as_str());
            assert_eq!(serde_json::to_string(&dt).unwrap(), wire);
            assert_eq!(serde_json::from_str::<DataType>(&wire).unwrap(), dt);
        }
        assert!(serde_json::from_str::<DataType>("\"uint\"").is_err());
    }

    #[test]
    fn test_is_numeric() {
        assert!(DataType::Int.is_numeric());
        assert!(DataType::Float.is_numeric());
        assert!(!DataType::Json.is_numeric());
    }
}
