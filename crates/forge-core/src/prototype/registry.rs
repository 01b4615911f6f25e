//! Registro nombre -> plantilla.

use dashmap::DashMap;
use log::{debug, trace};

use super::Prototype;
use crate::errors::KitError;

/// Registro concurrente de plantillas.
///
/// `register`/`unregister` se serializan sobre el mapa (bloqueo de escritura
/// por shard); `clone_of` sólo toma bloqueo de lectura, por lo que varias
/// copias pueden emitirse en paralelo.
///
/// Registrar bajo un nombre existente reemplaza la plantilla: las copias
/// siguientes reflejan la nueva y las ya emitidas no cambian.
#[derive(Debug)]
pub struct PrototypeRegistry<T: Prototype> {
    templates: DashMap<String, T>,
}

impl<T: Prototype> PrototypeRegistry<T> {
    pub fn new() -> Self {
        Self { templates: DashMap::new() }
    }

    /// Registra `template` bajo `name` y devuelve la plantilla reemplazada.
    ///
    /// # Errores
    /// `KitError::Uncloneable` si la plantilla declara recursos que no
    /// admiten copia profunda; en ese caso el registro no cambia.
    pub fn register(&self, name: impl Into<String>, template: T) -> Result<Option<T>, KitError> {
        let name = name.into();
        let resources = template.uncloneable_resources();
        if !resources.is_empty() {
            return Err(KitError::Uncloneable { name, resources });
        }
        debug!("prototype registry: registering '{name}'");
        Ok(self.templates.insert(name, template))
    }

    /// Devuelve una copia profunda e independiente de la plantilla `name`.
    pub fn clone_of(&self, name: &str) -> Result<T, KitError> {
        let entry = self.templates
                        .get(name)
                        .ok_or_else(|| KitError::NotFound(name.to_string()))?;
        trace!("prototype registry: cloning '{name}'");
        Ok(entry.value().clone())
    }

    /// Elimina la plantilla `name` y la devuelve.
    pub fn unregister(&self, name: &str) -> Result<T, KitError> {
        debug!("prototype registry: unregistering '{name}'");
        self.templates
            .remove(name)
            .map(|(_, template)| template)
            .ok_or_else(|| KitError::NotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Nombres registrados, ordenados alfabéticamente.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.templates.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl<T: Prototype> Default for PrototypeRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
