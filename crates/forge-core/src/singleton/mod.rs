//! Instancia única con inicialización perezosa.
//!
//! Máquina de estados:
//!
//! ```text
//! Uninitialized --primer get()--> Initializing --construcción completa--> Ready
//! ```
//!
//! La construcción se ejecuta como mucho una vez aunque varios llamadores
//! invoquen `get()` a la vez; los que llegan durante `Initializing` se
//! bloquean (o esperan, en la versión async) hasta `Ready` y reciben la misma
//! instancia. Nadie observa una instancia a medio construir.
//!
//! El handle es un valor explícito: se construye donde vive el recurso y se
//! inyecta por referencia a quien lo consume, en lugar de consultarse a
//! través de un global ambiental. Así cada test puede usar uno propio.

pub mod async_handle;

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use log::debug;
use once_cell::sync::OnceCell;

use crate::errors::KitError;

pub use async_handle::AsyncSingletonHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingletonState {
    Uninitialized,
    Initializing,
    Ready,
}

const UNINITIALIZED: u8 = 0;
const INITIALIZING: u8 = 1;

/// `Ready` sólo se deriva de la celda ya poblada; el atómico distingue
/// únicamente `Uninitialized` de `Initializing`.
pub(crate) fn decode_state(raw: u8, populated: bool) -> SingletonState {
    if populated {
        return SingletonState::Ready;
    }
    match raw {
        INITIALIZING => SingletonState::Initializing,
        _ => SingletonState::Uninitialized,
    }
}

/// Marca `Initializing` mientras vive y vuelve a `Uninitialized` si la
/// construcción no llega a completarse (error o pánico). Al completarse no
/// escribe nada: `Ready` lo decide la celda.
pub(crate) struct InitGuard<'a> {
    state: &'a AtomicU8,
    done: bool,
}

impl<'a> InitGuard<'a> {
    pub(crate) fn enter(state: &'a AtomicU8) -> Self {
        state.store(INITIALIZING, Ordering::Release);
        Self { state, done: false }
    }

    pub(crate) fn complete(mut self) {
        self.done = true;
    }
}

impl Drop for InitGuard<'_> {
    fn drop(&mut self) {
        if !self.done {
            self.state.store(UNINITIALIZED, Ordering::Release);
        }
    }
}

/// Handle de una instancia compartida `T` construida por `init`.
///
/// `new` es `const`, de modo que el handle también puede declararse en un
/// `static` cuando el host lo necesita, aunque la forma preferida es
/// crearlo una vez y pasarlo por referencia.
pub struct SingletonHandle<T, F = fn() -> T> {
    cell: OnceCell<Arc<T>>,
    state: AtomicU8,
    init: F,
}

impl<T, F> SingletonHandle<T, F> {
    pub const fn new(init: F) -> Self {
        Self { cell: OnceCell::new(),
               state: AtomicU8::new(UNINITIALIZED),
               init }
    }

    pub fn state(&self) -> SingletonState {
        decode_state(self.state.load(Ordering::Acquire), self.cell.get().is_some())
    }

    /// Instancia ya construida, sin disparar la construcción.
    pub fn get_if_ready(&self) -> Option<Arc<T>> {
        self.cell.get().cloned()
    }

    /// Descarta la instancia y vuelve a `Uninitialized`. Sólo para tests.
    ///
    /// Invalida todas las referencias emitidas: los `Arc` que ya tengan los
    /// llamadores siguen vivos, pero quedan desligados del handle y el
    /// siguiente `get()` construirá una instancia distinta. Requiere `&mut`,
    /// así que no puede correr en paralelo con `get()`.
    pub fn reset(&mut self) {
        debug!("singleton: reset requested");
        self.cell = OnceCell::new();
        *self.state.get_mut() = UNINITIALIZED;
    }
}

impl<T, F> SingletonHandle<T, F> where F: Fn() -> T
{
    /// Devuelve la instancia compartida, construyéndola si es la primera vez.
    pub fn get(&self) -> Arc<T> {
        Arc::clone(self.cell.get_or_init(|| {
                                let guard = InitGuard::enter(&self.state);
                                debug!("singleton: constructing shared instance");
                                let instance = Arc::new((self.init)());
                                guard.complete();
                                instance
                            }))
    }
}

impl<T, F> SingletonHandle<T, F> where F: Fn() -> Result<T, KitError>
{
    /// Como `get`, para inicializadores que pueden fallar.
    ///
    /// Si la construcción falla el error se devuelve sin cambios y el handle
    /// queda en `Uninitialized`; una llamada posterior lo reintentará.
    pub fn try_get(&self) -> Result<Arc<T>, KitError> {
        self.cell
            .get_or_try_init(|| {
                let guard = InitGuard::enter(&self.state);
                debug!("singleton: constructing shared instance (fallible)");
                let instance = Arc::new((self.init)()?);
                guard.complete();
                Ok(instance)
            })
            .map(Arc::clone)
    }
}

impl<T, F> fmt::Debug for SingletonHandle<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingletonHandle").field("state", &self.state()).finish()
    }
}
