// forge-domain: productos ilustrativos para cada estrategia de construcción.
//
// - `wall`: un producto por variante (ProductFactory).
// - `database`: familias {conexión, ejecutor} por motor (FamilyFactory).
// - `email`: construcción por pasos (StepBuilder).
// - `document`: plantillas copiables (PrototypeRegistry).
// - `pool`: recurso compartido de instancia única (SingletonHandle).
pub mod database;
pub mod document;
pub mod email;
pub mod pool;
pub mod wall;

pub use database::{database_catalog, DatabaseFactory, DatabaseKit, DatabaseVariant};
pub use document::{standard_templates, Document, ResourceHandle};
pub use email::{Email, EmailBuilder, StrictEmailBuilder};
pub use pool::{pool_handle, ConnectionPool, PoolHandle, QueryService};
pub use wall::{wall_dispatcher, Wall, WallVariant};
