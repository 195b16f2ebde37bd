use thiserror::Error;

/// Why a key could not be resolved inside a single [`Language`](crate::Language).
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum::Display)]
pub enum MissingReason {
    #[strum(to_string = "no such entry")]
    Absent,
    #[strum(to_string = "entry is empty")]
    Empty,
    #[strum(to_string = "entry is a nested table, not text")]
    NotText,
}

/// A key lookup failure local to one language.
///
/// [`Catalog`](crate::Catalog) turns this into a fallback attempt or an
/// [`I18nError::InvalidTranslationKey`]; it is only seen directly when a
/// [`Language`](crate::Language) is queried on its own.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("translation key '{key}' not resolved: {reason}")]
pub struct MissingKey {
    pub key: String,
    pub reason: MissingReason,
}

impl MissingKey {
    pub(crate) fn new(key: &str, reason: MissingReason) -> Self {
        Self {
            key: key.to_string(),
            reason,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The fallback code names no language in the catalog.
    #[error("no language with code '{code}' to use as fallback")]
    UnknownFallbackCode { code: String },
    /// The fallback index is past the end of the language list.
    #[error("fallback index {index} is out of range for {len} language(s)")]
    FallbackIndexOutOfRange { index: usize, len: usize },
    /// Failed to read a configuration file.
    #[error("failed to read catalog configuration: {0}")]
    Read(#[from] std::io::Error),
    /// Failed to parse a configuration file.
    #[error("failed to parse catalog configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Error)]
pub enum I18nError {
    #[error("locale '{locale}' does not exist")]
    InvalidLocale { locale: String },
    #[error("translation '{key}' not found for locale '{locale}'")]
    InvalidTranslationKey { key: String, locale: String },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("no default contextual catalog has been initialized")]
    NoDefaultInstance,
}

pub type I18nResult<T> = Result<T, I18nError>;
