//! Ranura de un campo dentro del `BuildSpec` de un builder.

use crate::errors::KitError;

#[derive(Debug, Clone, PartialEq)]
enum Requirement<T> {
    Mandatory,
    Default(T),
}

/// Campo acumulado por un builder.
///
/// El valor permanece sin asignar hasta que se llama a `set`; al resolver, un
/// campo sin asignar toma su valor por defecto documentado o, si es
/// obligatorio, produce `KitError::MissingField` con su nombre.
#[derive(Debug, Clone, PartialEq)]
pub struct Field<T> {
    name: &'static str,
    value: Option<T>,
    requirement: Requirement<T>,
}

impl<T: Clone> Field<T> {
    /// Campo obligatorio: `resolve` falla mientras no tenga valor.
    pub fn mandatory(name: &'static str) -> Self {
        Self { name,
               value: None,
               requirement: Requirement::Mandatory }
    }

    /// Campo opcional con valor por defecto explícito.
    pub fn with_default(name: &'static str, default: T) -> Self {
        Self { name,
               value: None,
               requirement: Requirement::Default(default) }
    }

    /// Campo opcional cuyo valor por defecto es `T::default()`.
    pub fn optional(name: &'static str) -> Self
        where T: Default
    {
        Self::with_default(name, T::default())
    }

    /// Asigna el valor; la última escritura gana.
    pub fn set(&mut self, value: T) {
        self.value = Some(value);
    }

    /// Modifica el valor en sitio partiendo del actual (o del defecto).
    ///
    /// Para un campo obligatorio sin valor no hay punto de partida, así que
    /// se devuelve `None` y el campo no cambia.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        if self.value.is_none() {
            if let Requirement::Default(default) = &self.requirement {
                self.value = Some(default.clone());
            }
        }
        self.value.as_mut()
    }

    /// Vuelve al estado sin asignar.
    pub fn clear(&mut self) {
        self.value = None;
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    pub fn is_mandatory(&self) -> bool {
        matches!(self.requirement, Requirement::Mandatory)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Valor efectivo como copia independiente.
    pub fn resolve(&self) -> Result<T, KitError> {
        match (&self.value, &self.requirement) {
            (Some(v), _) => Ok(v.clone()),
            (None, Requirement::Default(d)) => Ok(d.clone()),
            (None, Requirement::Mandatory) => Err(KitError::MissingField(self.name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mandatory_unset_fails_with_name() {
        let f: Field<String> = Field::mandatory("to");
        assert_eq!(f.resolve(), Err(KitError::MissingField("to".into())));
    }

    #[test]
    fn test_last_write_wins() {
        let mut f = Field::mandatory("n");
        f.set(1);
        f.set(2);
        assert_eq!(f.resolve(), Ok(2));
    }

    #[test]
    fn test_default_and_clear() {
        let mut f = Field::with_default("subject", "(none)".to_string());
        assert_eq!(f.resolve().unwrap(), "(none)");
        f.set("hi".into());
        f.clear();
        assert!(!f.is_set());
        assert_eq!(f.resolve().unwrap(), "(none)");
    }

    #[test]
    fn test_get_mut_starts_from_default() {
        let mut f: Field<Vec<u8>> = Field::optional("bytes");
        f.get_mut().unwrap().push(7);
        assert_eq!(f.resolve().unwrap(), vec![7]);

        let mut m: Field<Vec<u8>> = Field::mandatory("req");
        assert!(m.get_mut().is_none());
        assert!(!m.is_set());
    }
}
