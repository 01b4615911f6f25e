use forge_core::KitError;
use thiserror::Error;

/// Errores de la aplicación anfitriona.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error del toolkit: {0}")]
    Kit(#[from] KitError),
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Error de serialización: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kit_variant_from() {
        let err: AppError = KitError::NotFound("x".into()).into();
        assert_eq!(err.to_string(), "Error del toolkit: prototype not found: x");
    }

    #[test]
    fn test_config_variant_format() {
        let err = AppError::Config("mala configuración".into());
        assert_eq!(err.to_string(), "Error de configuración: mala configuración");
    }
}
