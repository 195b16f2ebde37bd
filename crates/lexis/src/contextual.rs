//! A catalog bound to an ambient current locale.

use crate::ambient::{self, InstanceId};
use lexis_core::{Catalog, CatalogConfig, ConfigError, I18nError, I18nResult, Language, TextArgs};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(0);

/// The process-wide default used by [`ContextualCatalog::contextual_get_text`].
///
/// Holds a weak reference: the default does not keep a catalog alive.
static DEFAULT_INSTANCE: RwLock<Option<Weak<ContextualCatalog>>> = RwLock::new(None);

/// Wraps a [`Catalog`] with a current locale stored per logical context.
///
/// The current locale is kept in task-local storage inside
/// [`scope`](crate::scope)/[`sync_scope`](crate::sync_scope) and in
/// thread-local storage otherwise. When unset it is the catalog's fallback
/// locale.
///
/// Building an instance may make it the process-wide default: it does when
/// `default` is requested (the builder's default) or when no live default
/// exists. The latest instance built with `default(true)` wins and silently
/// demotes the previous one.
#[derive(Debug)]
pub struct ContextualCatalog {
    id: InstanceId,
    /// Ambient cells hold a weak handle to this, so they lapse with the
    /// instance.
    liveness: Arc<()>,
    catalog: Catalog,
}

#[bon::bon]
impl ContextualCatalog {
    #[builder]
    pub fn new(catalog: Catalog, #[builder(default = true)] default: bool) -> Arc<Self> {
        let instance = Arc::new(Self {
            id: NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed),
            liveness: Arc::new(()),
            catalog,
        });

        let mut slot = DEFAULT_INSTANCE.write();
        let vacant = slot.as_ref().and_then(Weak::upgrade).is_none();
        if default || vacant {
            tracing::debug!("Contextual catalog #{} is now the default instance", instance.id);
            *slot = Some(Arc::downgrade(&instance));
        }

        instance
    }
}

impl ContextualCatalog {
    /// Builds the catalog and the wrapper from a [`CatalogConfig`].
    pub fn from_config(
        languages: impl IntoIterator<Item = Language>,
        config: &CatalogConfig,
    ) -> Result<Arc<Self>, ConfigError> {
        let catalog = Catalog::from_config(languages, config)?;
        Ok(Self::builder()
            .catalog(catalog)
            .default(config.default)
            .build())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn fallback_locale(&self) -> &str {
        self.catalog.fallback_locale()
    }

    /// Sets the current locale for the calling context.
    ///
    /// The locale is not checked here; an unknown locale surfaces as
    /// [`I18nError::InvalidLocale`] on the next lookup.
    ///
    /// On an async runtime the call must happen inside
    /// [`scope`](crate::scope). Elsewhere on a runtime it is ignored with a
    /// warning, since the worker thread is shared with unrelated tasks.
    pub fn set_current_locale(&self, locale: impl Into<String>) {
        ambient::set(self.id, Arc::downgrade(&self.liveness), locale.into());
    }

    /// The calling context's current locale, or the fallback locale if none
    /// was set.
    pub fn get_current_locale(&self) -> String {
        ambient::get(self.id).unwrap_or_else(|| self.fallback_locale().to_string())
    }

    /// Looks up `key` for an explicit `locale`. See [`Catalog::get_text`].
    pub fn get_text(&self, key: &str, locale: &str, args: &TextArgs) -> I18nResult<String> {
        self.catalog.get_text(key, locale, args)
    }

    /// Looks up `key` for this context's current locale.
    pub fn current_get_text(&self, key: &str, args: &TextArgs) -> I18nResult<String> {
        self.get_text(key, &self.get_current_locale(), args)
    }

    /// Looks up `key` on the default instance for the current context's
    /// locale.
    ///
    /// # Errors
    ///
    /// [`I18nError::NoDefaultInstance`] when no default is registered, plus
    /// everything [`Catalog::get_text`] returns.
    pub fn contextual_get_text(key: &str, args: &TextArgs) -> I18nResult<String> {
        Self::default_instance()
            .ok_or(I18nError::NoDefaultInstance)?
            .current_get_text(key, args)
    }

    /// The current process-wide default, if it is still alive.
    pub fn default_instance() -> Option<Arc<Self>> {
        DEFAULT_INSTANCE.read().as_ref().and_then(Weak::upgrade)
    }

    pub fn is_default(&self) -> bool {
        Self::default_instance().is_some_and(|default| default.id == self.id)
    }

    /// Makes this instance the process-wide default.
    pub fn set_as_default(self: &Arc<Self>) {
        *DEFAULT_INSTANCE.write() = Some(Arc::downgrade(self));
    }

    /// Unregisters the process-wide default.
    pub fn clear_default() {
        *DEFAULT_INSTANCE.write() = None;
    }
}

impl Drop for ContextualCatalog {
    fn drop(&mut self) {
        ambient::forget(self.id);
    }
}
