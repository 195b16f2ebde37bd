//! One language's translation table and its text resolution.

use crate::args::{FormatArg, TextArgs};
use crate::error::{MissingKey, MissingReason};
use crate::list::join_list;
use crate::template::{self, Placeholders};
use crate::translations::{TranslationValue, Translations};
use rustc_hash::FxHashMap;
use std::borrow::Cow;
use std::fmt;

/// Separator between segments of a nested key.
pub const KEY_SEPARATOR: char = '.';

/// Translation key holding the word used by [`Language::and_`].
pub const AND_KEY: &str = "and_";

/// Translation key holding the word used by [`Language::or_`].
pub const OR_KEY: &str = "or_";

/// A language and its translations.
///
/// Resolution is locale-agnostic: a missing key is reported as [`MissingKey`]
/// and fallback to another language is left to [`Catalog`](crate::Catalog).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Language {
    name: String,
    code: String,
    translations: Translations,
}

impl Language {
    pub fn new(name: impl Into<String>, code: impl Into<String>, translations: Translations) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            translations,
        }
    }

    /// Human-readable language name, such as `"English"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Locale code the catalog indexes this language by, such as `"en"`.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn translations(&self) -> &Translations {
        &self.translations
    }

    /// Resolves `key` to its raw template.
    ///
    /// Dotted keys descend through nested tables one segment at a time. When
    /// `raise_on_empty` is set an empty leaf counts as missing, which lets a
    /// translation mark an entry as intentionally untranslated.
    pub fn resolve_key(&self, key: &str, raise_on_empty: bool) -> Result<&str, MissingKey> {
        let absent = || MissingKey::new(key, MissingReason::Absent);

        let (first, nested) = match key.split_once(KEY_SEPARATOR) {
            Some((first, nested)) => (first, Some(nested)),
            None => (key, None),
        };

        let mut current = self.translations.get(first).ok_or_else(absent)?;
        for segment in nested.into_iter().flat_map(|rest| rest.split(KEY_SEPARATOR)) {
            current = current
                .as_nested()
                .and_then(|table| table.get(segment))
                .ok_or_else(absent)?;
        }

        match current {
            TranslationValue::Text(text) if raise_on_empty && text.is_empty() => {
                Err(MissingKey::new(key, MissingReason::Empty))
            },
            TranslationValue::Text(text) => Ok(text.as_str()),
            TranslationValue::Nested(_) => Err(MissingKey::new(key, MissingReason::NotText)),
        }
    }

    /// Joins items with the `and_` translation: `"a, b and c"` style.
    pub fn and_<T: fmt::Display>(&self, items: &[T]) -> Result<String, MissingKey> {
        self.join_with_key(items, AND_KEY)
    }

    /// Joins items with the `or_` translation.
    pub fn or_<T: fmt::Display>(&self, items: &[T]) -> Result<String, MissingKey> {
        self.join_with_key(items, OR_KEY)
    }

    fn join_with_key<T: fmt::Display>(&self, items: &[T], key: &str) -> Result<String, MissingKey> {
        let word = self.resolve_key(key, true)?;
        Ok(join_list(items, &format!(" {word} ")))
    }

    /// Resolves `key` and fills its placeholders.
    ///
    /// List-valued substitutions go through the list formatter first, if one
    /// is set. Substitutions then take precedence over top-level text entries
    /// of this language's table, which are consulted only when
    /// [`TextArgs::use_translations`] is enabled. Unknown placeholders follow
    /// the [`MissingPlaceholder`](crate::MissingPlaceholder) policy.
    pub fn get_text(&self, key: &str, args: &TextArgs) -> Result<String, MissingKey> {
        let template = self.resolve_key(key, true)?;

        let mut overrides = FxHashMap::default();
        for (name, value) in args.substitutions() {
            let text = match (value, args.get_list_formatter()) {
                (FormatArg::List(items), Some(formatter)) => {
                    Cow::Owned(formatter.format(self, items)?)
                },
                _ => value.as_text(),
            };
            overrides.insert(name, text);
        }

        let values = Substitutions {
            overrides,
            table: args.uses_translations().then_some(&self.translations),
        };

        Ok(template::render(template, &values, args.get_missing_placeholder()))
    }
}

/// Per-call values layered over the language's own flat entries.
struct Substitutions<'a> {
    overrides: FxHashMap<&'a str, Cow<'a, str>>,
    table: Option<&'a Translations>,
}

impl Placeholders for Substitutions<'_> {
    fn lookup(&self, name: &str) -> Option<&str> {
        if let Some(value) = self.overrides.get(name) {
            return Some(&**value);
        }
        self.table?.get(name)?.as_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ListFormatter, MissingPlaceholder, translations};

    fn english() -> Language {
        Language::new(
            "English",
            "en",
            translations! {
                "you_lost" => "You lost the {game}",
                "game" => "game",
                "hello" => "Hello, {place}!",
                "and_" => "and",
                "blank" => "",
                "menu" => {
                    "file" => {
                        "open" => "Open {game}",
                        "blank" => "",
                    },
                },
            },
        )
    }

    #[test]
    fn basic_get() {
        let args = TextArgs::new().arg("place", "World");
        assert_eq!(english().get_text("hello", &args).unwrap(), "Hello, World!");
    }

    #[test]
    fn templated_from_translations() {
        assert_eq!(
            english().get_text("you_lost", &TextArgs::new()).unwrap(),
            "You lost the game"
        );
    }

    #[test]
    fn substitutions_take_priority() {
        let args = TextArgs::new().arg("game", "lottery");
        assert_eq!(
            english().get_text("you_lost", &args).unwrap(),
            "You lost the lottery"
        );
    }

    #[test]
    fn translations_can_be_disabled() {
        let args = TextArgs::new().use_translations(false);
        assert_eq!(
            english().get_text("you_lost", &args).unwrap(),
            "You lost the {game}"
        );
    }

    #[test]
    fn formatted_list() {
        let args = TextArgs::new()
            .list_formatter(ListFormatter::And)
            .arg("place", ["World", "Universe"]);
        assert_eq!(
            english().get_text("hello", &args).unwrap(),
            "Hello, World and Universe!"
        );
    }

    #[test]
    fn list_formatter_missing_connector_fails() {
        let args = TextArgs::new()
            .list_formatter(ListFormatter::Or)
            .arg("place", ["World", "Universe"]);
        let err = english().get_text("hello", &args).unwrap_err();
        assert_eq!(err, MissingKey::new("or_", MissingReason::Absent));
    }

    #[test]
    fn unknown_placeholder_is_kept() {
        assert_eq!(
            english().get_text("hello", &TextArgs::new()).unwrap(),
            "Hello, {place}!"
        );
        let args = TextArgs::new().missing_placeholder(MissingPlaceholder::Remove);
        assert_eq!(english().get_text("hello", &args).unwrap(), "Hello, !");
    }

    #[test]
    fn nested_keys_descend() {
        assert_eq!(english().resolve_key("menu.file.open", true).unwrap(), "Open {game}");
        assert_eq!(
            english().get_text("menu.file.open", &TextArgs::new()).unwrap(),
            "Open game"
        );
    }

    #[test]
    fn nested_tables_are_not_placeholder_values() {
        let language = Language::new("English", "en", translations! {
            "show" => "{menu}",
            "menu" => { "file" => "File" },
        });
        assert_eq!(language.get_text("show", &TextArgs::new()).unwrap(), "{menu}");
    }

    #[test]
    fn missing_keys_report_reason() {
        let en = english();
        assert_eq!(en.resolve_key("nope", true).unwrap_err().reason, MissingReason::Absent);
        assert_eq!(
            en.resolve_key("menu.edit.open", true).unwrap_err().reason,
            MissingReason::Absent
        );
        assert_eq!(
            en.resolve_key("game.more", true).unwrap_err().reason,
            MissingReason::Absent
        );
        assert_eq!(en.resolve_key("menu.file", true).unwrap_err().reason, MissingReason::NotText);
        assert_eq!(en.resolve_key("nope.x", true).unwrap_err().key, "nope.x");
    }

    #[test]
    fn empty_leaf_is_missing_only_when_requested() {
        let en = english();
        assert_eq!(en.resolve_key("blank", true).unwrap_err().reason, MissingReason::Empty);
        assert_eq!(en.resolve_key("blank", false).unwrap(), "");
        assert_eq!(
            en.resolve_key("menu.file.blank", true).unwrap_err().reason,
            MissingReason::Empty
        );
    }

    #[test]
    fn and_or_join_with_translated_words() {
        let en = english();
        assert_eq!(en.and_(&["a", "b", "c"]).unwrap(), "a,b and c");
        assert_eq!(en.and_(&["solo"]).unwrap(), "solo");
        assert!(en.or_(&["a", "b"]).is_err());
    }
}
