//! Optimistic local state with rollback on persistence failure.

use std::future::Future;

/// A locally cached list whose mutations are applied before the backend
/// confirms them and reverted if the backend write fails.
#[derive(Debug, Clone, Default)]
pub struct Optimistic<T> {
    items: Vec<T>,
}

impl<T: Clone> Optimistic<T> {
    #[must_use]
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Apply `mutate` locally, then await `persist`.
    ///
    /// On `Err` the list is restored to its pre-mutation snapshot.
    ///
    /// # Errors
    ///
    /// Returns whatever error `persist` produced.
    pub async fn apply<M, P, Fut, E>(&mut self, mutate: M, persist: P) -> Result<(), E>
    where
        M: FnOnce(&mut Vec<T>),
        P: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: std::fmt::Display,
    {
        let snapshot = self.items.clone();
        mutate(&mut self.items);
        match persist().await {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::warn!(error = %e, "persist failed; rolling back local change");
                self.items = snapshot;
                Err(e)
            }
        }
    }
}
