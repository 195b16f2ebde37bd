//! Safe `{name}` template substitution.
//!
//! A placeholder is an identifier wrapped in single braces. `{{` and `}}`
//! render literal braces, and any brace that does not open a well-formed
//! placeholder is copied through untouched. Placeholders with no value are
//! handled by [`MissingPlaceholder`] and never fail.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::BuildHasher;

/// What to write in place of a placeholder that has no value.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPlaceholder {
    /// Leave `{name}` in the output.
    #[default]
    Keep,
    /// Drop the placeholder entirely.
    Remove,
    /// Render the placeholder name through a function.
    #[serde(skip)]
    Custom(fn(&str) -> String),
}

impl MissingPlaceholder {
    fn write(self, name: &str, out: &mut String) {
        match self {
            MissingPlaceholder::Keep => {
                out.push('{');
                out.push_str(name);
                out.push('}');
            },
            MissingPlaceholder::Remove => {},
            MissingPlaceholder::Custom(render) => out.push_str(&render(name)),
        }
    }
}

/// A source of placeholder values.
pub trait Placeholders {
    fn lookup(&self, name: &str) -> Option<&str>;
}

impl<V: AsRef<str>, S: BuildHasher> Placeholders for HashMap<String, V, S> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(AsRef::as_ref)
    }
}

/// Substitutes every `{name}` in `template` with its value from `values`.
pub fn render(template: &str, values: &impl Placeholders, missing: MissingPlaceholder) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if tail.starts_with("{{") {
            out.push('{');
            rest = &tail[2..];
        } else if tail.starts_with("}}") {
            out.push('}');
            rest = &tail[2..];
        } else if tail.starts_with('}') {
            out.push('}');
            rest = &tail[1..];
        } else if let Some(name) = placeholder_name(&tail[1..]) {
            match values.lookup(name) {
                Some(value) => out.push_str(value),
                None => missing.write(name, &mut out),
            }
            rest = &tail[name.len() + 2..];
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }

    out.push_str(rest);
    out
}

/// Returns the identifier at the start of `s` if it is closed by `}`.
fn placeholder_name(s: &str) -> Option<&str> {
    let end = s.find(|c: char| !(c.is_alphanumeric() || c == '_'))?;
    let name = &s[..end];
    let starts_ok = name
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_');

    (starts_ok && s[end..].starts_with('}')).then_some(name)
}
