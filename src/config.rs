//! Configuración del host que consume el toolkit.
//! Carga variables de entorno (.env una sola vez) y expone `AppConfig`, que
//! decide qué variantes se usan por defecto. El toolkit no lee ficheros de
//! configuración: sólo recibe los tokens que salen de aquí.
use dotenvy::dotenv;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::env;

pub const ENV_DATABASE_VARIANT: &str = "FORGE_DATABASE_VARIANT";
pub const ENV_WALL_VARIANT: &str = "FORGE_WALL_VARIANT";
pub const ENV_POSTGRES_HOST: &str = "FORGE_POSTGRES_HOST";
pub const ENV_POOL_SIZE: &str = "FORGE_POOL_SIZE";
pub const ENV_SEASONED_PLANKS: &str = "FORGE_SEASONED_PLANKS";

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppConfig {
    /// Token del motor de base de datos (familia por defecto).
    pub database_variant: String,
    /// Token de la variante de muro por defecto.
    pub wall_variant: String,
    /// Host de PostgreSQL; sin él la familia `postgres` no se puede crear.
    pub postgres_host: Option<String>,
    /// Slots del pool compartido.
    pub pool_size: usize,
    /// Stock de tablones para la variante `wood`.
    pub seasoned_planks: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig { database_variant: "mysql".to_string(),
                    wall_variant: "stone".to_string(),
                    postgres_host: None,
                    pool_size: 4,
                    seasoned_planks: 0 }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        // asegura que .env se haya cargado
        init_dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construye la configuración a partir de una función de búsqueda.
    /// Valores numéricos inválidos caen en el valor por defecto.
    pub fn from_lookup<L>(lookup: L) -> Self
        where L: Fn(&str) -> Option<String>
    {
        let defaults = AppConfig::default();
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        AppConfig { database_variant: non_empty(ENV_DATABASE_VARIANT).unwrap_or(defaults.database_variant),
                    wall_variant: non_empty(ENV_WALL_VARIANT).unwrap_or(defaults.wall_variant),
                    postgres_host: non_empty(ENV_POSTGRES_HOST),
                    pool_size: non_empty(ENV_POOL_SIZE).and_then(|v| v.parse().ok())
                                                        .unwrap_or(defaults.pool_size),
                    seasoned_planks: non_empty(ENV_SEASONED_PLANKS).and_then(|v| v.parse().ok())
                                                                    .unwrap_or(defaults.seasoned_planks) }
    }
}
