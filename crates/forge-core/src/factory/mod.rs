//! Creación diferida de un único tipo de producto.
//!
//! Cada variante implementa su propio `ProductFactory`; el llamador sólo
//! elige la variante (implementando el trait o pasando un token al
//! `FactoryDispatcher`) y nunca ve los detalles internos de la concreta.
//! Las implementaciones son planas e intercambiables: no hay jerarquías de
//! herencia, sólo un trait con una implementación por variante.

pub mod dispatcher;

use async_trait::async_trait;

use crate::errors::KitError;

pub use dispatcher::FactoryDispatcher;

/// Valor producido por un creador. Informa la variante que lo produjo.
pub trait Product: Send + Sync {
    fn variant(&self) -> &str;
}

impl<P: Product + ?Sized> Product for Box<P> {
    fn variant(&self) -> &str {
        (**self).variant()
    }
}

/// Creador de productos de una sola variante.
///
/// Contrato:
/// - `create` no tiene efectos secundarios más allá de reservar el nuevo
///   producto.
/// - Si la variante no puede construir (prerrequisito no cumplido) devuelve
///   `KitError::Creation`; el error se propaga sin cambios.
pub trait ProductFactory: Send + Sync {
    type Output;

    /// Token de la variante que implementa este creador.
    fn variant(&self) -> &str;

    fn create(&self) -> Result<Self::Output, KitError>;
}

/// Variante asíncrona de `ProductFactory` para hooks de creación que
/// necesitan esperar (sin I/O bloqueante dentro del toolkit).
#[async_trait]
pub trait AsyncProductFactory: Send + Sync {
    type Output: Send;

    fn variant(&self) -> &str;

    async fn create(&self) -> Result<Self::Output, KitError>;
}
