//! Construcción por pasos.
//!
//! Un builder acumula parámetros (su `BuildSpec`, formado por `Field`s) a lo
//! largo de llamadas encadenadas y después materializa un producto
//! inmutable con `build`.
//!
//! Reglas:
//! - Los setters pueden llamarse en cualquier orden y cualquier número de
//!   veces; la última escritura gana por campo.
//! - `build` puede llamarse varias veces. Cada llamada devuelve una copia
//!   independiente del estado en ese momento: no comparte sub-campos mutables
//!   con el builder ni con productos anteriores.
//! - Un campo obligatorio sin valor hace fallar `build` con
//!   `KitError::MissingField`. Fuera de eso no hay validación implícita;
//!   la validación semántica es un punto de extensión (`validate`).
//! - Un builder tiene un único escritor. Quien necesite aislamiento usa su
//!   propia instancia.

pub mod field;

pub use field::Field;

use crate::errors::KitError;

pub trait StepBuilder {
    type Output;

    /// Materializa el `BuildSpec` actual en un producto nuevo.
    fn assemble(&self) -> Result<Self::Output, KitError>;

    /// Validación específica de la variante. Por defecto acepta todo.
    fn validate(&self, _product: &Self::Output) -> Result<(), KitError> {
        Ok(())
    }

    /// Devuelve todos los campos a su estado sin asignar.
    fn reset(&mut self);

    fn build(&self) -> Result<Self::Output, KitError> {
        let product = self.assemble()?;
        self.validate(&product)?;
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Pair {
        left: u32,
        right: Vec<u32>,
    }

    struct PairBuilder {
        left: Field<u32>,
        right: Field<Vec<u32>>,
    }

    impl PairBuilder {
        fn new() -> Self {
            Self { left: Field::mandatory("left"),
                   right: Field::optional("right") }
        }
        fn left(&mut self, v: u32) -> &mut Self {
            self.left.set(v);
            self
        }
        fn push_right(&mut self, v: u32) -> &mut Self {
            if let Some(items) = self.right.get_mut() {
                items.push(v);
            }
            self
        }
    }

    impl StepBuilder for PairBuilder {
        type Output = Pair;

        fn assemble(&self) -> Result<Pair, KitError> {
            Ok(Pair { left: self.left.resolve()?,
                      right: self.right.resolve()? })
        }

        fn validate(&self, product: &Pair) -> Result<(), KitError> {
            if product.left > 100 {
                return Err(KitError::Validation("left out of range".into()));
            }
            Ok(())
        }

        fn reset(&mut self) {
            self.left.clear();
            self.right.clear();
        }
    }

    #[test]
    fn test_build_twice_gives_independent_equal_products() {
        let mut b = PairBuilder::new();
        b.left(1).push_right(2);
        let mut first = b.build().unwrap();
        let second = b.build().unwrap();
        assert_eq!(first, second);
        first.right.push(99);
        assert_ne!(first, second);
        assert_eq!(b.build().unwrap().right, vec![2]);
    }

    #[test]
    fn test_validate_hook_runs_after_assemble() {
        let mut b = PairBuilder::new();
        b.left(500);
        assert_eq!(b.build(), Err(KitError::Validation("left out of range".into())));
        assert!(b.assemble().is_ok());
    }

    #[test]
    fn test_reset_clears_fields() {
        let mut b = PairBuilder::new();
        b.left(3);
        b.reset();
        assert_eq!(b.build(), Err(KitError::MissingField("left".into())));
    }
}
