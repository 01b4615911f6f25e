//! forge-kit
//!
//! Librería anfitriona del toolkit de construcción:
//! - Se apoya en `forge_core` (las cinco estrategias) y `forge_domain`
//!   (productos de ejemplo).
//! - Expone `config` para elegir variantes desde el entorno (.env).
//! - Expone `errors` con el error de aplicación que envuelve a `KitError`.
//! - Expone `toolkit`, la raíz de composición que conecta todo.
//!
//! Puede usarse desde `main.rs` o por otros crates/clientes.

pub mod config;
pub mod errors;
pub mod toolkit;

pub use config::AppConfig;
pub use errors::AppError;
pub use toolkit::Toolkit;
