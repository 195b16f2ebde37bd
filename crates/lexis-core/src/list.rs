use crate::error::MissingKey;
use crate::language::Language;
use std::fmt;
use std::sync::Arc;

/// Joins items into a natural-language list.
///
/// One item is returned as is, two are joined by `connector`, and longer lists
/// join all but the last item with `,` before attaching the last one with
/// `connector`. `connector` is used verbatim, so callers supply its spacing.
///
/// ```rust
/// use lexis_core::join_list;
///
/// assert_eq!(join_list(&["a", "b", "c"], " and "), "a,b and c");
/// ```
pub fn join_list<T: fmt::Display>(items: &[T], connector: &str) -> String {
    match items {
        [] => String::new(),
        [only] => only.to_string(),
        [first, second] => format!("{first}{connector}{second}"),
        [head @ .., last] => {
            let head: Vec<String> = head.iter().map(ToString::to_string).collect();
            format!("{}{connector}{last}", head.join(","))
        },
    }
}

type CustomListFormatter = dyn Fn(&[String]) -> String + Send + Sync;

/// Turns list-valued substitutions into text before a template is rendered.
#[derive(Clone)]
pub enum ListFormatter {
    /// Joins with the language's `and_` entry.
    And,
    /// Joins with the language's `or_` entry.
    Or,
    /// Joins with a fixed connector, used verbatim.
    Join(String),
    Custom(Arc<CustomListFormatter>),
}

impl ListFormatter {
    pub fn custom(format: impl Fn(&[String]) -> String + Send + Sync + 'static) -> Self {
        ListFormatter::Custom(Arc::new(format))
    }

    /// Formats `items` for `language`, which supplies the connector words.
    pub fn format(&self, language: &Language, items: &[String]) -> Result<String, MissingKey> {
        match self {
            ListFormatter::And => language.and_(items),
            ListFormatter::Or => language.or_(items),
            ListFormatter::Join(connector) => Ok(join_list(items, connector)),
            ListFormatter::Custom(format) => Ok(format(items)),
        }
    }
}

impl fmt::Debug for ListFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListFormatter::And => f.write_str("And"),
            ListFormatter::Or => f.write_str("Or"),
            ListFormatter::Join(connector) => f.debug_tuple("Join").field(connector).finish(),
            ListFormatter::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
