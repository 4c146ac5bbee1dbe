//! Project modal state, derived from the URL query.

use log::debug;

use crate::query::QueryStore;
use crate::{Project, ProjectCatalog};

/// Something whose background scrolling can be switched off, such as the
/// page body.
pub trait ScrollLock {
    fn suspend(&mut self);
    fn restore(&mut self);
}

/// Suspends scrolling on creation and restores it exactly once, on
/// [`ScrollGuard::release`] or drop.
pub struct ScrollGuard<L: ScrollLock> {
    lock: L,
    released: bool,
}

impl<L: ScrollLock> ScrollGuard<L> {
    pub fn acquire(mut lock: L) -> Self {
        lock.suspend();
        Self {
            lock,
            released: false,
        }
    }

    pub fn release(mut self) {
        self.restore_once();
    }

    fn restore_once(&mut self) {
        if !self.released {
            self.released = true;
            self.lock.restore();
        }
    }
}

impl<L: ScrollLock> Drop for ScrollGuard<L> {
    fn drop(&mut self) {
        self.restore_once();
    }
}

/// Maps the query parameter to a selected project and keeps the background
/// scroll lock in step with it. No selection state is stored here.
pub struct ModalController<L: ScrollLock + Clone> {
    key: String,
    lock: L,
    guard: Option<ScrollGuard<L>>,
}

impl<L: ScrollLock + Clone> ModalController<L> {
    pub fn new(key: impl Into<String>, lock: L) -> Self {
        Self {
            key: key.into(),
            lock,
            guard: None,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn selected_id<Q: QueryStore + ?Sized>(&self, query: &Q) -> Option<String> {
        query.get(&self.key).filter(|id| !id.is_empty())
    }

    /// Selected project, or `None` when the parameter is absent or unknown.
    pub fn selected<'c, Q: QueryStore + ?Sized>(
        &self,
        query: &Q,
        catalog: &'c ProjectCatalog,
    ) -> Option<&'c Project> {
        let id = self.selected_id(query)?;
        let project = catalog.get(&id);
        if project.is_none() {
            debug!("unknown project id {id:?}, treating modal as closed");
        }
        project
    }

    pub fn open<Q: QueryStore + ?Sized>(&self, query: &mut Q, id: &str) {
        query.set(&self.key, id);
    }

    pub fn close<Q: QueryStore + ?Sized>(&self, query: &mut Q) {
        query.clear(&self.key);
    }

    /// Resolve the selection and suspend or restore scrolling to match.
    pub fn refresh<'c, Q: QueryStore + ?Sized>(
        &mut self,
        query: &Q,
        catalog: &'c ProjectCatalog,
    ) -> Option<&'c Project> {
        let project = self.selected(query, catalog);
        self.sync(project.is_some());
        project
    }

    pub fn sync(&mut self, open: bool) {
        match (open, self.guard.is_some()) {
            (true, false) => self.guard = Some(ScrollGuard::acquire(self.lock.clone())),
            (false, true) => {
                if let Some(guard) = self.guard.take() {
                    guard.release();
                }
            }
            _ => {}
        }
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.guard.is_some()
    }
}
