//! Variante async de `SingletonHandle`.
//!
//! Los llamadores que llegan durante `Initializing` esperan (`.await`) en
//! lugar de bloquear el hilo. Si la tarea que construye se cancela, otra
//! tarea en espera toma el relevo; la construcción sigue completándose una
//! sola vez.

use std::future::Future;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use log::debug;
use tokio::sync::OnceCell;

use super::{decode_state, InitGuard, SingletonState, UNINITIALIZED};
use crate::errors::KitError;

pub struct AsyncSingletonHandle<T> {
    cell: OnceCell<Arc<T>>,
    state: AtomicU8,
}

impl<T> AsyncSingletonHandle<T> {
    pub fn new() -> Self {
        Self { cell: OnceCell::new(),
               state: AtomicU8::new(UNINITIALIZED) }
    }

    pub fn state(&self) -> SingletonState {
        decode_state(self.state.load(Ordering::Acquire), self.cell.get().is_some())
    }

    pub fn get_if_ready(&self) -> Option<Arc<T>> {
        self.cell.get().cloned()
    }

    /// Devuelve la instancia compartida, construyéndola con `init` si es la
    /// primera vez. Los `init` de llamadas posteriores no se ejecutan.
    pub async fn get<F, Fut>(&self, init: F) -> Arc<T>
        where F: FnOnce() -> Fut,
              Fut: Future<Output = T>
    {
        let instance = self.cell
                           .get_or_init(|| async move {
                               let guard = InitGuard::enter(&self.state);
                               debug!("async singleton: constructing shared instance");
                               let instance = Arc::new(init().await);
                               guard.complete();
                               instance
                           })
                           .await;
        Arc::clone(instance)
    }

    /// Como `get`, para inicializadores que pueden fallar. Un fallo deja el
    /// handle en `Uninitialized`.
    pub async fn try_get<F, Fut>(&self, init: F) -> Result<Arc<T>, KitError>
        where F: FnOnce() -> Fut,
              Fut: Future<Output = Result<T, KitError>>
    {
        let instance = self.cell
                           .get_or_try_init(|| async move {
                               let guard = InitGuard::enter(&self.state);
                               debug!("async singleton: constructing shared instance (fallible)");
                               let instance = Arc::new(init().await?);
                               guard.complete();
                               Ok::<_, KitError>(instance)
                           })
                           .await?;
        Ok(Arc::clone(instance))
    }

    /// Descarta la instancia. Sólo para tests; mismas advertencias que
    /// `SingletonHandle::reset`.
    pub fn reset(&mut self) {
        self.cell = OnceCell::new();
        *self.state.get_mut() = UNINITIALIZED;
    }
}

impl<T> Default for AsyncSingletonHandle<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_async_get_initializes_once() {
        let handle = AsyncSingletonHandle::new();
        tokio_test::block_on(async {
            let a = handle.get(|| async { 7u8 }).await;
            let b = handle.get(|| async { 9u8 }).await;
            assert!(Arc::ptr_eq(&a, &b));
            assert_eq!(*b, 7);
        });
        assert_eq!(handle.state(), SingletonState::Ready);
    }

    #[test]
    fn test_async_try_get_failure_leaves_uninitialized() {
        let handle: AsyncSingletonHandle<u8> = AsyncSingletonHandle::new();
        let res = tokio_test::block_on(handle.try_get(|| async { Err(KitError::creation("x", "down")) }));
        assert_eq!(res, Err(KitError::creation("x", "down")));
        assert_eq!(handle.state(), SingletonState::Uninitialized);
        assert!(handle.get_if_ready().is_none());
    }
}
