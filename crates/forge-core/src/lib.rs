//! forge-core: capa de construcción de objetos.
//!
//! Cinco estrategias independientes para desacoplar "qué se crea" de "cómo y
//! cuándo se crea":
//! - `factory`: creación diferida de un producto por variante.
//! - `family`: creación de familias de productos de una misma variante.
//! - `builder`: construcción por pasos con campos obligatorios/por defecto.
//! - `prototype`: copias profundas a partir de plantillas registradas.
//! - `singleton`: instancia única, perezosa y segura ante acceso concurrente.
//!
//! Ningún componente registra ni reintenta errores: todos los fallos
//! (`KitError`) se devuelven al llamador inmediato.

pub mod builder;
pub mod errors;
pub mod factory;
pub mod family;
pub mod hashing;
pub mod prototype;
pub mod singleton;

pub use builder::{Field, StepBuilder};
pub use errors::KitError;
pub use factory::{AsyncProductFactory, FactoryDispatcher, Product, ProductFactory};
pub use family::{FamilyCatalog, FamilyFactory};
pub use prototype::{Prototype, PrototypeRegistry};
pub use singleton::{AsyncSingletonHandle, SingletonHandle, SingletonState};
