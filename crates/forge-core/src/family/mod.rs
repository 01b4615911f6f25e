//! Creación de familias de productos relacionados.
//!
//! Una familia es un conjunto de productos que deben interoperar (por
//! ejemplo `{conexión, ejecutor}`). Un `FamilyFactory` concreto está ligado a
//! una sola variante: elegir el factory fija la variante para todas las
//! llamadas de creación de miembros hechas a través de esa instancia. Así
//! ninguna familia mezcla miembros de variantes distintas.
//!
//! # Guía de extensión
//!
//! La estrategia tiene una asimetría inherente que conviene conocer antes de
//! extenderla:
//!
//! - **Nueva variante (barato):** se escribe un único factory nuevo que
//!   implemente el mismo conjunto de operaciones y se registra en el
//!   `FamilyCatalog`. Nada existente cambia.
//! - **Nuevo tipo de producto en la familia (caro):** hay que añadir la
//!   operación al trait de la familia y, por tanto, implementarla en *todos*
//!   los factories concretos existentes. El compilador señala cada uno.
//!
//! Esto no es un defecto: es el coste de garantizar la consistencia de la
//! familia en tiempo de compilación.
//!
//! # Fallos
//!
//! Si un miembro no puede construirse, la creación devuelve
//! `KitError::FamilyCreation` con el nombre del miembro. Los miembros ya
//! construidos se descartan (se liberan al salir del ámbito); nunca se
//! devuelve una familia parcial. Ver [`member`].

pub mod catalog;

use log::debug;

use crate::errors::KitError;
use crate::factory::Product;

pub use catalog::FamilyCatalog;

/// Factory concreto de una familia, ligado a una variante.
pub trait FamilyFactory: Send + Sync {
    /// Tipo que agrupa a los miembros ya construidos.
    type Family;

    /// Variante fijada para todos los miembros.
    fn variant(&self) -> &str;

    /// Nombres de los miembros, en orden de construcción.
    fn members(&self) -> &'static [&'static str];

    /// Construye la familia completa o falla sin devolver nada parcial.
    fn create_family(&self) -> Result<Self::Family, KitError>;
}

/// Valida el resultado de construir un miembro de la familia.
///
/// - Un error del miembro se envuelve en `KitError::FamilyCreation`
///   identificando `member`.
/// - Un miembro cuya variante difiere de `variant` también se rechaza
///   (`VariantMismatch` envuelto), para que la invariante de consistencia no
///   dependa de la disciplina de cada implementación.
pub fn member<M>(variant: &str, member: &str, result: Result<M, KitError>) -> Result<M, KitError>
    where M: Product
{
    let wrap = |source: KitError| KitError::FamilyCreation { variant: variant.to_string(),
                                                             member: member.to_string(),
                                                             source: Box::new(source) };
    let built = result.map_err(wrap)?;
    if built.variant() != variant {
        return Err(wrap(KitError::VariantMismatch { expected: variant.to_string(),
                                                    found: built.variant().to_string() }));
    }
    debug!("family '{variant}': member '{member}' ready");
    Ok(built)
}
