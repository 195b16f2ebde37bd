//! Binding the current locale to a host's dispatch cycle.
//!
//! A host, such as a chat-bot command framework, exposes a [`Dispatcher`]
//! that runs registered callbacks before every dispatch.
//! [`ContextualCatalog::bind_host`] registers one that derives the locale of
//! the incoming invocation and stores it as the current locale.

use crate::contextual::ContextualCatalog;
use futures::future::{self, BoxFuture};
use std::future::Future;
use std::sync::Arc;

/// A callback run before each dispatch, with the dispatch's context object.
pub type BeforeDispatch<C> = Box<dyn for<'a> Fn(&'a C) -> BoxFuture<'a, ()> + Send + Sync>;

/// A host registration point for pre-dispatch callbacks.
pub trait Dispatcher<C> {
    fn before_dispatch(&mut self, hook: BeforeDispatch<C>);
}

/// Derives the locale for a dispatch context.
pub trait LocaleSource<C>: Send + Sync {
    fn locale_for<'a>(&'a self, ctx: &'a C) -> BoxFuture<'a, String>;
}

/// A [`LocaleSource`] backed by a plain function.
pub struct SyncSource<F>(F);

/// A [`LocaleSource`] backed by a function returning an owned future.
pub struct AsyncSource<F>(F);

/// A [`LocaleSource`] backed by a function returning a boxed future that may
/// borrow the context.
pub struct BoxedSource<F>(F);

pub fn sync_source<F>(derive: F) -> SyncSource<F> {
    SyncSource(derive)
}

/// Wraps an async locale function.
///
/// The returned future must not borrow the context: copy what it needs out of
/// `ctx` before the `async move` block. Use [`boxed_source`] for functions
/// that keep borrowing it, such as `async fn locale(ctx: &Ctx) -> String`.
pub fn async_source<F>(derive: F) -> AsyncSource<F> {
    AsyncSource(derive)
}

/// Wraps a function whose future borrows the context.
///
/// ```rust
/// use lexis::boxed_source;
///
/// struct Invocation {
///     guild_locale: String,
/// }
///
/// async fn guild_locale(ctx: &Invocation) -> String {
///     ctx.guild_locale.clone()
/// }
///
/// let _source = boxed_source(|ctx: &Invocation| Box::pin(guild_locale(ctx)));
/// ```
pub fn boxed_source<C, F>(derive: F) -> BoxedSource<F>
where
    F: for<'a> Fn(&'a C) -> BoxFuture<'a, String> + Send + Sync,
{
    BoxedSource(derive)
}

impl<C, F> LocaleSource<C> for SyncSource<F>
where
    F: Fn(&C) -> String + Send + Sync,
{
    fn locale_for<'a>(&'a self, ctx: &'a C) -> BoxFuture<'a, String> {
        Box::pin(future::ready((self.0)(ctx)))
    }
}

impl<C, F, Fut> LocaleSource<C> for AsyncSource<F>
where
    F: Fn(&C) -> Fut + Send + Sync,
    Fut: Future<Output = String> + Send + 'static,
{
    fn locale_for<'a>(&'a self, ctx: &'a C) -> BoxFuture<'a, String> {
        Box::pin((self.0)(ctx))
    }
}

impl<C, F> LocaleSource<C> for BoxedSource<F>
where
    F: for<'a> Fn(&'a C) -> BoxFuture<'a, String> + Send + Sync,
{
    fn locale_for<'a>(&'a self, ctx: &'a C) -> BoxFuture<'a, String> {
        (self.0)(ctx)
    }
}

/// Boxes `hook`, pinning down its higher-ranked signature.
pub fn before_dispatch<C, F>(hook: F) -> BeforeDispatch<C>
where
    F: for<'a> Fn(&'a C) -> BoxFuture<'a, ()> + Send + Sync + 'static,
{
    Box::new(hook)
}

impl ContextualCatalog {
    /// Registers a pre-dispatch callback that sets the current locale from
    /// `source`.
    ///
    /// The locale is stored in whatever context polls the callback, so the
    /// host should await it inside the dispatch's [`scope`](crate::scope).
    pub fn bind_host<C, D>(
        self: &Arc<Self>,
        dispatcher: &mut D,
        source: impl LocaleSource<C> + 'static,
    ) where
        C: Sync + 'static,
        D: Dispatcher<C> + ?Sized,
    {
        let source: Arc<dyn LocaleSource<C>> = Arc::new(source);
        self.register_hook(dispatcher, Some(source));
    }

    /// Registers a pre-dispatch callback that resets the current locale to
    /// the fallback locale.
    pub fn bind_host_with_fallback<C, D>(self: &Arc<Self>, dispatcher: &mut D)
    where
        C: Sync + 'static,
        D: Dispatcher<C> + ?Sized,
    {
        self.register_hook(dispatcher, None);
    }

    fn register_hook<C, D>(
        self: &Arc<Self>,
        dispatcher: &mut D,
        source: Option<Arc<dyn LocaleSource<C>>>,
    ) where
        C: Sync + 'static,
        D: Dispatcher<C> + ?Sized,
    {
        tracing::debug!(
            "Binding contextual catalog to host dispatch (locale source: {})",
            if source.is_some() { "custom" } else { "fallback" }
        );

        let catalog = Arc::clone(self);
        dispatcher.before_dispatch(before_dispatch(move |ctx: &C| {
            let catalog = Arc::clone(&catalog);
            let source = source.clone();
            Box::pin(async move {
                let locale = match source {
                    Some(source) => source.locale_for(ctx).await,
                    None => catalog.fallback_locale().to_string(),
                };
                tracing::trace!("Dispatch locale set to '{}'", locale);
                catalog.set_current_locale(locale);
            })
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    struct Invocation {
        guild_locale: &'static str,
    }

    #[test]
    fn sync_source_derives_from_context() {
        let source = sync_source(|ctx: &Invocation| ctx.guild_locale.to_string());
        let ctx = Invocation { guild_locale: "fr" };
        assert_eq!(block_on(source.locale_for(&ctx)), "fr");
    }

    #[test]
    fn async_source_derives_from_context() {
        let source = async_source(|ctx: &Invocation| {
            let locale = ctx.guild_locale.to_string();
            async move { locale }
        });
        let ctx = Invocation { guild_locale: "de" };
        assert_eq!(block_on(source.locale_for(&ctx)), "de");
    }

    async fn borrowed_locale(ctx: &Invocation) -> String {
        futures::future::ready(()).await;
        ctx.guild_locale.to_string()
    }

    #[test]
    fn boxed_source_borrows_the_context() {
        let source = boxed_source(|ctx: &Invocation| Box::pin(borrowed_locale(ctx)));
        let ctx = Invocation { guild_locale: "es" };
        assert_eq!(block_on(source.locale_for(&ctx)), "es");
    }
}
