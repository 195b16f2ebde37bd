#![doc = include_str!("../README.md")]

pub mod args;
pub mod catalog;
pub mod config;
pub mod error;
pub mod language;
pub mod list;
pub mod template;
pub mod translations;

pub use args::{FormatArg, TextArgs};
pub use catalog::{Catalog, Fallback};
pub use config::CatalogConfig;
pub use error::{ConfigError, I18nError, I18nResult, MissingKey, MissingReason};
pub use language::Language;
pub use list::{ListFormatter, join_list};
pub use template::MissingPlaceholder;
pub use translations::{TranslationValue, Translations};
