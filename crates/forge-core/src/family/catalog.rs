//! Catálogo de factories de familia indexado por variante.

use indexmap::IndexMap;
use log::debug;

use super::FamilyFactory;
use crate::errors::KitError;

/// Asocia tokens de variante con factories de familia.
///
/// `F` suele ser un trait object (`dyn DatabaseFactory`) para que todas las
/// variantes convivan en el mismo catálogo.
pub struct FamilyCatalog<F: ?Sized> {
    factories: IndexMap<String, Box<F>>,
}

impl<F: ?Sized> FamilyCatalog<F> {
    pub fn new() -> Self {
        Self { factories: IndexMap::new() }
    }

    /// Registra `factory` bajo `variant`, reemplazando uno previo.
    pub fn register(&mut self, variant: impl Into<String>, factory: Box<F>) -> &mut Self {
        let variant = variant.into();
        debug!("family catalog: registering variant '{variant}'");
        self.factories.insert(variant, factory);
        self
    }

    /// Elige el factory concreto para `variant`.
    ///
    /// Una vez elegido, todas las llamadas de creación a través de él
    /// producen miembros de esa variante.
    pub fn select(&self, variant: &str) -> Result<&F, KitError> {
        debug!("family catalog: selecting variant '{variant}'");
        self.factories
            .get(variant)
            .map(|f| f.as_ref())
            .ok_or_else(|| KitError::UnknownVariant(variant.to_string()))
    }

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

impl<F: ?Sized + FamilyFactory> FamilyCatalog<F> {
    /// Selecciona la variante y construye su familia en un solo paso.
    pub fn create_family(&self, variant: &str) -> Result<F::Family, KitError> {
        self.select(variant)?.create_family()
    }
}

impl<F: ?Sized> Default for FamilyCatalog<F> {
    fn default() -> Self {
        Self::new()
    }
}
