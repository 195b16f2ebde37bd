//! Locale-aware lookup across several languages.

use crate::args::TextArgs;
use crate::config::CatalogConfig;
use crate::error::{ConfigError, I18nError, I18nResult};
use crate::language::Language;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Designates the fallback language of a [`Catalog`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Fallback {
    /// The language with this code.
    Code(String),
    /// The language at this position of the list given to [`Catalog::new`].
    Index(usize),
}

impl From<&str> for Fallback {
    fn from(code: &str) -> Self {
        Fallback::Code(code.to_string())
    }
}

impl From<String> for Fallback {
    fn from(code: String) -> Self {
        Fallback::Code(code)
    }
}

impl From<usize> for Fallback {
    fn from(index: usize) -> Self {
        Fallback::Index(index)
    }
}

/// Languages indexed by locale code, with one fallback locale.
///
/// A key missing from the requested locale is looked up once more in the
/// fallback locale. A miss there is final.
#[derive(Clone, Debug)]
pub struct Catalog {
    languages: IndexMap<String, Language>,
    fallback: String,
}

impl Catalog {
    /// Builds a catalog. When two languages share a code the later one wins.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `fallback` names an unknown code or an
    /// out-of-range index.
    pub fn new(
        languages: impl IntoIterator<Item = Language>,
        fallback: impl Into<Fallback>,
    ) -> Result<Self, ConfigError> {
        let ordered: Vec<Language> = languages.into_iter().collect();

        let fallback = match fallback.into() {
            Fallback::Code(code) => code,
            Fallback::Index(index) => ordered
                .get(index)
                .map(|language| language.code().to_string())
                .ok_or(ConfigError::FallbackIndexOutOfRange {
                    index,
                    len: ordered.len(),
                })?,
        };

        let languages: IndexMap<String, Language> = ordered
            .into_iter()
            .map(|language| (language.code().to_string(), language))
            .collect();

        if !languages.contains_key(&fallback) {
            return Err(ConfigError::UnknownFallbackCode { code: fallback });
        }

        tracing::debug!(
            "Built catalog with {} language(s), fallback '{}'",
            languages.len(),
            fallback
        );

        Ok(Self {
            languages,
            fallback,
        })
    }

    pub fn from_config(
        languages: impl IntoIterator<Item = Language>,
        config: &CatalogConfig,
    ) -> Result<Self, ConfigError> {
        Self::new(languages, config.fallback.clone())
    }

    pub fn fallback_locale(&self) -> &str {
        &self.fallback
    }

    pub fn fallback_language(&self) -> &Language {
        &self.languages[self.fallback.as_str()]
    }

    pub fn language(&self, locale: &str) -> Option<&Language> {
        self.languages.get(locale)
    }

    pub fn contains_locale(&self, locale: &str) -> bool {
        self.languages.contains_key(locale)
    }

    /// Languages in the order they were first given.
    pub fn languages(&self) -> impl Iterator<Item = &Language> {
        self.languages.values()
    }

    /// Resolves and formats `key` for `locale`.
    ///
    /// # Errors
    ///
    /// - [`I18nError::InvalidLocale`] if `locale` is not in the catalog.
    /// - [`I18nError::InvalidTranslationKey`] if the key is missing from
    ///   `locale` and fallback is disabled, `locale` is the fallback locale, or
    ///   the fallback locale misses it too.
    pub fn get_text(&self, key: &str, locale: &str, args: &TextArgs) -> I18nResult<String> {
        let language = self
            .languages
            .get(locale)
            .ok_or_else(|| I18nError::InvalidLocale {
                locale: locale.to_string(),
            })?;

        let missing = match language.get_text(key, args) {
            Ok(text) => return Ok(text),
            Err(missing) => missing,
        };

        let invalid_key = || I18nError::InvalidTranslationKey {
            key: key.to_string(),
            locale: locale.to_string(),
        };

        if !args.falls_back() || locale == self.fallback {
            return Err(invalid_key());
        }

        tracing::trace!(
            "'{}' unresolved in '{}' ({}), trying fallback '{}'",
            key,
            locale,
            missing.reason,
            self.fallback
        );

        self.fallback_language()
            .get_text(key, args)
            .map_err(|_| invalid_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translations;

    fn languages() -> Vec<Language> {
        vec![
            Language::new("English", "en", translations! {
                "hello" => "Hello",
                "goodbye" => "Goodbye",
                "english" => "English",
            }),
            Language::new("French", "fr", translations! {
                "hello" => "Bonjour",
                "goodbye" => "Au revoir",
                "francais" => "Français",
            }),
        ]
    }

    #[test]
    fn fallback_by_code() {
        let catalog = Catalog::new(languages(), "fr").unwrap();
        assert_eq!(catalog.fallback_locale(), "fr");
        assert_eq!(catalog.fallback_language().name(), "French");
    }

    #[test]
    fn fallback_by_index() {
        let catalog = Catalog::new(languages(), 1usize).unwrap();
        assert_eq!(catalog.fallback_locale(), "fr");
    }

    #[test]
    fn unknown_fallback_code_is_rejected() {
        let err = Catalog::new(languages(), "de").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownFallbackCode { code } if code == "de"));
    }

    #[test]
    fn fallback_index_out_of_range_is_rejected() {
        let err = Catalog::new(languages(), 2usize).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::FallbackIndexOutOfRange { index: 2, len: 2 }
        ));
    }

    #[test]
    fn empty_catalog_has_no_fallback() {
        assert!(Catalog::new(Vec::new(), "en").is_err());
        assert!(Catalog::new(Vec::new(), 0usize).is_err());
    }

    #[test]
    fn duplicate_codes_keep_the_last_language() {
        let mut langs = languages();
        langs.push(Language::new("English (UK)", "en", translations! { "hello" => "Hiya" }));

        let catalog = Catalog::new(langs, 0usize).unwrap();
        assert_eq!(catalog.languages().count(), 2);
        assert_eq!(catalog.language("en").map(Language::name), Some("English (UK)"));
        assert_eq!(
            catalog.get_text("hello", "en", &TextArgs::new()).unwrap(),
            "Hiya"
        );
    }

    #[test]
    fn missing_key_falls_back_once() {
        let catalog = Catalog::new(languages(), "en").unwrap();
        let args = TextArgs::new();

        assert_eq!(catalog.get_text("english", "fr", &args).unwrap(), "English");
        assert!(matches!(
            catalog.get_text("francais", "en", &args),
            Err(I18nError::InvalidTranslationKey { key, locale }) if key == "francais" && locale == "en"
        ));
    }
}
