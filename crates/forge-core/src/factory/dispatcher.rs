//! Tabla de despacho: token de variante -> creador.

use indexmap::IndexMap;
use log::debug;

use super::ProductFactory;
use crate::errors::KitError;

/// Creador registrado en la tabla, con el tipo de producto fijado.
pub type BoxedFactory<P> = Box<dyn ProductFactory<Output = P>>;

/// Selecciona un `ProductFactory` a partir de un token de variante.
///
/// Mantiene el orden de registro para que `variants()` sea determinista.
/// Registrar dos veces el mismo token reemplaza el creador anterior.
pub struct FactoryDispatcher<P> {
    factories: IndexMap<String, BoxedFactory<P>>,
}

impl<P> FactoryDispatcher<P> {
    pub fn new() -> Self {
        Self { factories: IndexMap::new() }
    }

    /// Registra un creador bajo el token que él mismo declara.
    pub fn register<F>(&mut self, factory: F) -> &mut Self
        where F: ProductFactory<Output = P> + 'static
    {
        let variant = factory.variant().to_string();
        debug!("dispatcher: registering variant '{variant}'");
        self.factories.insert(variant, Box::new(factory));
        self
    }

    /// Versión consumidora de `register`, útil al construir la tabla.
    pub fn with<F>(mut self, factory: F) -> Self
        where F: ProductFactory<Output = P> + 'static
    {
        self.register(factory);
        self
    }

    /// Crea un producto de la variante indicada.
    ///
    /// # Errores
    /// - `KitError::UnknownVariant` si el token no está registrado.
    /// - Cualquier error del creador, sin modificar.
    pub fn create(&self, variant: &str) -> Result<P, KitError> {
        let factory = self.factory(variant)?;
        debug!("dispatcher: creating product for variant '{variant}'");
        factory.create()
    }

    /// Devuelve el creador registrado para `variant`.
    pub fn factory(&self, variant: &str) -> Result<&dyn ProductFactory<Output = P>, KitError> {
        self.factories
            .get(variant)
            .map(|f| f.as_ref())
            .ok_or_else(|| KitError::UnknownVariant(variant.to_string()))
    }

    pub fn contains(&self, variant: &str) -> bool {
        self.factories.contains_key(variant)
    }

    /// Tokens registrados, en orden de registro.
    pub fn variants(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl<P> Default for FactoryDispatcher<P> {
    fn default() -> Self {
        Self::new()
    }
}
