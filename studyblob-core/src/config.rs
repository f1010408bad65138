use studyblob_types::ElementKind;

/// Соглашение о флаге `signed` в дескрипторе кодирования.
///
/// Существующие blob-ы помечают знаковые целые `signed=false`, а
/// беззнаковые (и clamped) `signed=true` для ширин 8/16/32 бит. Пока нет
/// фикстуры, подтверждающей намеренность, это поведение остаётся
/// соглашением по умолчанию (`Legacy`). Числа с плавающей точкой в обоих
/// соглашениях помечаются `signed=false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignednessConvention {
    /// Флаги существующих blob-ов (инвертированы для целых)
    #[default]
    Legacy,
    /// Знаковые целые → `true`, беззнаковые → `false`
    Natural,
}

/// Конфигурация кодека: должна совпадать у сборщика и парсера.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatConfig {
    pub signedness: SignednessConvention,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl SignednessConvention {
    /// Значение флага `signed` для вида элемента.
    pub fn signed_flag(
        &self,
        kind: ElementKind,
    ) -> bool {
        match kind {
            ElementKind::Float32 | ElementKind::Float64 => false,
            _ => match self {
                SignednessConvention::Legacy => !kind.is_signed_type(),
                SignednessConvention::Natural => kind.is_signed_type(),
            },
        }
    }
}

impl FormatConfig {
    pub fn new(signedness: SignednessConvention) -> Self {
        Self { signedness }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов
////////////////////////////////////////////////////////////////////////////////

impl std::fmt::Display for SignednessConvention {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            SignednessConvention::Legacy => write!(f, "legacy"),
            SignednessConvention::Natural => write!(f, "natural"),
        }
    }
}

impl std::str::FromStr for SignednessConvention {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "legacy" | "reference" => Ok(SignednessConvention::Legacy),
            "natural" => Ok(SignednessConvention::Natural),
            _ => Err(format!(
                "Unknown signedness convention: '{s}'. Use: legacy, natural"
            )),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
