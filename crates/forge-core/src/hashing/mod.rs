//! Canonicalización JSON y huellas de contenido.
//!
//! Se usan para comparar productos por estructura (por ejemplo, una copia de
//! prototipo frente a su plantilla) sin depender de su identidad.

pub mod canonical_json;
pub mod hash;

pub use canonical_json::to_canonical_json;
pub use hash::{fingerprint, hash_str, hash_value};
