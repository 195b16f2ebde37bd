//! Per-context storage for the current locale.
//!
//! Inside [`scope`] or [`sync_scope`] the locale cells live in a tokio
//! task-local, so concurrently running tasks never observe each other's
//! locale even when they share a worker thread. Synchronous callers outside
//! any scope and outside any runtime use thread-local cells.
//!
//! Code running on a tokio runtime without a scope has no context of its
//! own: reads see no locale and writes are dropped with a warning. Worker
//! threads are shared by every task they poll, so thread-local cells there
//! would leak a locale from one task into the next.
//!
//! A new scope starts with a copy of the cells that were visible where it was
//! created. Changes made inside a scope never leak out of it. A spawned task
//! does not inherit its parent's scope; wrap the spawned future in [`scope`]
//! from the parent to hand it a copy.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::future::Future;
use std::sync::Weak;

/// Identifies the [`ContextualCatalog`](crate::ContextualCatalog) a cell
/// belongs to.
pub(crate) type InstanceId = u64;

/// A locale stored for one instance, dropped once that instance is gone.
#[derive(Clone, Debug)]
struct LocaleCell {
    owner: Weak<()>,
    locale: String,
}

impl LocaleCell {
    fn is_live(&self) -> bool {
        self.owner.strong_count() > 0
    }
}

type LocaleCells = RefCell<FxHashMap<InstanceId, LocaleCell>>;

tokio::task_local! {
    static TASK_LOCALES: LocaleCells;
}

thread_local! {
    static THREAD_LOCALES: LocaleCells = RefCell::new(FxHashMap::default());
}

fn in_task_scope() -> bool {
    TASK_LOCALES.try_with(|_| ()).is_ok()
}

fn in_runtime() -> bool {
    tokio::runtime::Handle::try_current().is_ok()
}

/// Runs `f` on the calling context's cells, or returns `None` when the caller
/// is on a runtime without a scope.
fn with_cells<R>(f: impl FnOnce(&LocaleCells) -> R) -> Option<R> {
    if in_task_scope() {
        Some(TASK_LOCALES.with(f))
    } else if in_runtime() {
        None
    } else {
        Some(THREAD_LOCALES.with(f))
    }
}

fn snapshot() -> LocaleCells {
    let cells = with_cells(|cells| {
        cells
            .borrow()
            .iter()
            .filter(|(_, cell)| cell.is_live())
            .map(|(id, cell)| (*id, cell.clone()))
            .collect()
    });
    RefCell::new(cells.unwrap_or_default())
}

/// Runs `future` in its own locale context.
///
/// Wrap each request or command invocation in a scope when the host runs
/// several of them concurrently. The context is copied when `scope` is
/// called, so `tokio::spawn(lexis::scope(fut))` hands the spawned task the
/// caller's locales.
pub fn scope<F: Future>(future: F) -> impl Future<Output = F::Output> {
    TASK_LOCALES.scope(snapshot(), future)
}

/// Runs `f` in its own locale context.
pub fn sync_scope<R>(f: impl FnOnce() -> R) -> R {
    TASK_LOCALES.sync_scope(snapshot(), f)
}

pub(crate) fn set(id: InstanceId, owner: Weak<()>, locale: String) {
    let stored = with_cells(|cells| {
        let mut cells = cells.borrow_mut();
        cells.retain(|_, cell| cell.is_live());
        cells.insert(id, LocaleCell { owner, locale });
    });

    if stored.is_none() {
        tracing::warn!(
            "Current locale set outside of a locale scope on an async runtime; ignoring it. \
             Wrap the task in `lexis::scope`"
        );
    }
}

pub(crate) fn get(id: InstanceId) -> Option<String> {
    with_cells(|cells| {
        cells
            .borrow()
            .get(&id)
            .filter(|cell| cell.is_live())
            .map(|cell| cell.locale.clone())
    })
    .flatten()
}

/// Drops the calling context's cell for `id`.
///
/// Safe to call while the thread's locals are being torn down.
pub(crate) fn forget(id: InstanceId) {
    let remove = |cells: &LocaleCells| {
        cells.borrow_mut().remove(&id);
    };
    if in_task_scope() {
        TASK_LOCALES.with(remove);
    } else if !in_runtime() {
        let _ = THREAD_LOCALES.try_with(remove);
    }
}

#[cfg(test)]
pub(crate) fn cell_count() -> usize {
    with_cells(|cells| cells.borrow().len()).unwrap_or_default()
}
