//! In-memory translation tables.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A language's translation table, keyed by entry name in insertion order.
pub type Translations = IndexMap<String, TranslationValue>;

/// One entry of a [`Translations`] table: either template text or a nested
/// table reachable through dotted keys.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TranslationValue {
    Text(String),
    Nested(Translations),
}

impl TranslationValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TranslationValue::Text(text) => Some(text),
            TranslationValue::Nested(_) => None,
        }
    }

    pub fn as_nested(&self) -> Option<&Translations> {
        match self {
            TranslationValue::Text(_) => None,
            TranslationValue::Nested(table) => Some(table),
        }
    }
}

impl From<&str> for TranslationValue {
    fn from(text: &str) -> Self {
        TranslationValue::Text(text.to_string())
    }
}

impl From<String> for TranslationValue {
    fn from(text: String) -> Self {
        TranslationValue::Text(text)
    }
}

impl From<Translations> for TranslationValue {
    fn from(table: Translations) -> Self {
        TranslationValue::Nested(table)
    }
}

/// Builds a [`Translations`] table from literal entries.
///
/// Values are either string literals or braced nested tables:
///
/// ```rust
/// use lexis_core::translations;
///
/// let table = translations! {
///     "hello" => "Hello",
///     "menu" => {
///         "open" => "Open",
///     },
/// };
/// assert_eq!(table.len(), 2);
/// ```
#[macro_export]
macro_rules! translations {
    (@value { $($inner:tt)* }) => {
        $crate::TranslationValue::Nested($crate::translations!($($inner)*))
    };
    (@value $text:expr) => {
        $crate::TranslationValue::from($text)
    };
    ($($key:literal => $value:tt),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut table = $crate::Translations::new();
        $(
            table.insert(
                ::std::string::String::from($key),
                $crate::translations!(@value $value),
            );
        )*
        table
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macro_builds_nested_tables() {
        let table = translations! {
            "a" => "x",
            "b" => { "c" => { "d" => "deep" } },
        };

        assert_eq!(table["a"].as_text(), Some("x"));
        let deep = table["b"].as_nested().and_then(|b| b["c"].as_nested());
        assert_eq!(deep.and_then(|c| c["d"].as_text()), Some("deep"));
    }

    #[test]
    fn deserializes_untagged_json() {
        let table: Translations = serde_json::from_value(serde_json::json!({
            "hello": "Hello",
            "menu": { "open": "Open" }
        }))
        .unwrap();

        assert_eq!(table["hello"], TranslationValue::from("Hello"));
        assert_eq!(
            table["menu"],
            TranslationValue::Nested(translations! { "open" => "Open" })
        );
    }

    #[test]
    fn keeps_insertion_order() {
        let table = translations! { "z" => "1", "a" => "2", "m" => "3" };
        let keys: Vec<_> = table.keys().map(String::as_str).collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }
}
