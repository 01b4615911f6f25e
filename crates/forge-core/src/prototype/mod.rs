//! Construcción por copia a partir de plantillas registradas.
//!
//! `clone_of(name)` devuelve siempre una copia estructural completa de la
//! plantilla: el resultado no comparte sub-estructura mutable con la
//! plantilla ni con copias emitidas antes. En Rust esto equivale a `Clone`
//! sobre datos poseídos (`Vec`, `String`, mapas...). Un tipo que guarde
//! estado compartido (`Arc<Mutex<_>>`, handles abiertos) no cumple la
//! garantía y debe declararlo en `uncloneable_resources`; el registro lo
//! rechaza al registrar.

pub mod registry;

pub use registry::PrototypeRegistry;

/// Plantilla clonable.
pub trait Prototype: Clone + Send + Sync + 'static {
    /// Recursos que no admiten copia profunda (handles abiertos, sockets...).
    ///
    /// Una lista vacía indica que `Clone` produce una copia aislada.
    fn uncloneable_resources(&self) -> Vec<String> {
        Vec::new()
    }
}

impl Prototype for String {}
impl<T: Prototype> Prototype for Vec<T> {
    fn uncloneable_resources(&self) -> Vec<String> {
        self.iter().flat_map(Prototype::uncloneable_resources).collect()
    }
}
impl Prototype for serde_json::Value {}
