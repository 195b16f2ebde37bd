#![doc = include_str!("../README.md")]

pub mod ambient;
pub mod contextual;
pub mod hook;

pub use ambient::{scope, sync_scope};
pub use contextual::ContextualCatalog;
pub use hook::{
    AsyncSource, BeforeDispatch, BoxedSource, Dispatcher, LocaleSource, SyncSource, async_source,
    before_dispatch, boxed_source, sync_source,
};

pub use lexis_core::{
    Catalog, CatalogConfig, ConfigError, Fallback, FormatArg, I18nError, I18nResult, Language,
    ListFormatter, MissingPlaceholder, TextArgs, TranslationValue, Translations, join_list,
    translations,
};

/// Looks up a key on the default [`ContextualCatalog`] for the current
/// context's locale.
///
/// Named substitutions follow the key; a full [`TextArgs`] can be passed after
/// a semicolon instead.
///
/// ```rust
/// use lexis::{Catalog, ContextualCatalog, Language, ListFormatter, TextArgs, tr, translations};
///
/// let catalog = Catalog::new(
///     [Language::new("English", "en", translations! {
///         "hello" => "Hello, {name}!",
///         "team" => "Team: {members}",
///         "and_" => "and",
///     })],
///     "en",
/// )
/// .unwrap();
/// let _i18n = ContextualCatalog::builder().catalog(catalog).build();
///
/// assert_eq!(tr!("hello", name = "Ada").unwrap(), "Hello, Ada!");
/// assert_eq!(
///     tr!("team"; TextArgs::new()
///         .list_formatter(ListFormatter::And)
///         .arg("members", ["Ada", "Grace"]))
///     .unwrap(),
///     "Team: Ada and Grace"
/// );
/// ```
#[macro_export]
macro_rules! tr {
    ($key:expr; $args:expr) => {
        $crate::ContextualCatalog::contextual_get_text($key, &$args)
    };
    ($key:expr $(, $name:ident = $value:expr)* $(,)?) => {
        $crate::ContextualCatalog::contextual_get_text(
            $key,
            &$crate::TextArgs::new()$(.arg(::core::stringify!($name), $value))*,
        )
    };
}
