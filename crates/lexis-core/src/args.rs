//! Per-call options and substitution values for text lookups.

use crate::list::ListFormatter;
use crate::template::MissingPlaceholder;
use indexmap::IndexMap;
use std::borrow::Cow;
use std::fmt;

/// A named substitution value: plain text, or a list that a
/// [`ListFormatter`] can join.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FormatArg {
    Text(String),
    List(Vec<String>),
}

impl FormatArg {
    /// The value as template text. Lists without a formatter are joined with
    /// `", "`.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FormatArg::Text(text) => Cow::Borrowed(text),
            FormatArg::List(items) => Cow::Owned(items.join(", ")),
        }
    }
}

impl fmt::Display for FormatArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for FormatArg {
    fn from(text: &str) -> Self {
        FormatArg::Text(text.to_string())
    }
}

impl From<&String> for FormatArg {
    fn from(text: &String) -> Self {
        FormatArg::Text(text.clone())
    }
}

impl From<String> for FormatArg {
    fn from(text: String) -> Self {
        FormatArg::Text(text)
    }
}

impl From<Cow<'_, str>> for FormatArg {
    fn from(text: Cow<'_, str>) -> Self {
        FormatArg::Text(text.into_owned())
    }
}

macro_rules! impl_from_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for FormatArg {
                fn from(value: $ty) -> Self {
                    FormatArg::Text(value.to_string())
                }
            }
        )*
    };
}

impl_from_display!(
    bool, char, f32, f64, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize,
);

impl<T: fmt::Display> From<Vec<T>> for FormatArg {
    fn from(items: Vec<T>) -> Self {
        FormatArg::List(items.iter().map(ToString::to_string).collect())
    }
}

impl<T: fmt::Display> From<&[T]> for FormatArg {
    fn from(items: &[T]) -> Self {
        FormatArg::List(items.iter().map(ToString::to_string).collect())
    }
}

impl<T: fmt::Display, const N: usize> From<[T; N]> for FormatArg {
    fn from(items: [T; N]) -> Self {
        FormatArg::List(items.iter().map(ToString::to_string).collect())
    }
}

/// Options and substitutions for a single text lookup.
///
/// Defaults: translations are used as substitution sources, a missing key
/// falls back to the catalog's fallback locale, and unknown placeholders are
/// kept verbatim.
#[derive(Clone, Debug)]
pub struct TextArgs {
    substitutions: IndexMap<String, FormatArg>,
    list_formatter: Option<ListFormatter>,
    use_translations: bool,
    should_fallback: bool,
    missing_placeholder: MissingPlaceholder,
}

impl Default for TextArgs {
    fn default() -> Self {
        Self {
            substitutions: IndexMap::new(),
            list_formatter: None,
            use_translations: true,
            should_fallback: true,
            missing_placeholder: MissingPlaceholder::Keep,
        }
    }
}

impl TextArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named substitution. A later value for the same name replaces the
    /// earlier one.
    pub fn arg(mut self, name: impl Into<String>, value: impl Into<FormatArg>) -> Self {
        self.substitutions.insert(name.into(), value.into());
        self
    }

    pub fn list_formatter(mut self, formatter: ListFormatter) -> Self {
        self.list_formatter = Some(formatter);
        self
    }

    /// Whether entries of the translation table fill placeholders that no
    /// substitution covers.
    pub fn use_translations(mut self, use_translations: bool) -> Self {
        self.use_translations = use_translations;
        self
    }

    pub fn should_fallback(mut self, should_fallback: bool) -> Self {
        self.should_fallback = should_fallback;
        self
    }

    pub fn missing_placeholder(mut self, policy: MissingPlaceholder) -> Self {
        self.missing_placeholder = policy;
        self
    }

    pub fn substitutions(&self) -> impl Iterator<Item = (&str, &FormatArg)> {
        self.substitutions.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn get_list_formatter(&self) -> Option<&ListFormatter> {
        self.list_formatter.as_ref()
    }

    pub fn uses_translations(&self) -> bool {
        self.use_translations
    }

    pub fn falls_back(&self) -> bool {
        self.should_fallback
    }

    pub fn get_missing_placeholder(&self) -> MissingPlaceholder {
        self.missing_placeholder
    }
}

impl<K: Into<String>, V: Into<FormatArg>> FromIterator<(K, V)> for TextArgs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |args, (name, value)| args.arg(name, value))
    }
}
