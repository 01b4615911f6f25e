//! Errores del toolkit de construcción.
//!
//! Ningún componente recupera estos errores internamente: todos se devuelven
//! sin modificar al llamador inmediato. Tampoco existen resultados parciales
//! (una familia fallida no devuelve miembros, un `build` fallido no devuelve
//! producto).

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum KitError {
    /// Una variante no pudo producir su producto (prerrequisito no cumplido).
    #[error("variant '{variant}' failed to create product: {reason}")]
    Creation { variant: String, reason: String },

    #[error("unknown variant: {0}")] UnknownVariant(String),

    /// Un miembro de la familia falló; la familia completa se descarta.
    #[error("family '{variant}' failed on member '{member}': {source}")]
    FamilyCreation {
        variant: String,
        member: String,
        #[source]
        source: Box<KitError>,
    },

    #[error("variant mismatch: expected '{expected}', found '{found}'")]
    VariantMismatch { expected: String, found: String },

    #[error("missing mandatory field: {0}")] MissingField(String),

    #[error("validation failed: {0}")] Validation(String),

    #[error("prototype not found: {0}")] NotFound(String),

    /// La plantilla contiene recursos que no admiten copia profunda.
    #[error("prototype '{name}' holds uncloneable resources: {}", .resources.join(", "))]
    Uncloneable { name: String, resources: Vec<String> },
}

impl KitError {
    /// Atajo para construir `KitError::Creation`.
    pub fn creation(variant: impl Into<String>, reason: impl Into<String>) -> Self {
        KitError::Creation { variant: variant.into(),
                             reason: reason.into() }
    }

    /// Nombre del miembro que falló, si el error proviene de una familia.
    pub fn failed_member(&self) -> Option<&str> {
        match self {
            KitError::FamilyCreation { member, .. } => Some(member),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_missing_field_format() {
        let err = KitError::MissingField("to".into());
        assert_eq!(err.to_string(), "missing mandatory field: to");
    }

    #[test]
    fn test_family_creation_keeps_source() {
        let err = KitError::FamilyCreation { variant: "mysql".into(),
                                             member: "connection".into(),
                                             source: Box::new(KitError::creation("mysql", "no driver")) };
        assert_eq!(err.failed_member(), Some("connection"));
        assert!(err.source().is_some());
        assert_eq!(err.to_string(),
                   "family 'mysql' failed on member 'connection': variant 'mysql' failed to create product: no driver");
    }

    #[test]
    fn test_uncloneable_lists_resources() {
        let err = KitError::Uncloneable { name: "doc".into(),
                                          resources: vec!["file:a".into(), "socket:b".into()] };
        assert_eq!(err.to_string(), "prototype 'doc' holds uncloneable resources: file:a, socket:b");
    }
}
