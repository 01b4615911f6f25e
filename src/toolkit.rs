//! Raíz de composición: arma los cinco componentes a partir de `AppConfig`
//! y los entrega ya conectados. Cada instancia de `Toolkit` es independiente
//! (su propio pool, su propio registro), de modo que los tests pueden crear
//! una por caso sin estado global compartido.

use forge_core::family::FamilyCatalog;
use forge_core::{FactoryDispatcher, PrototypeRegistry, StepBuilder};
use forge_domain::{database_catalog, pool_handle, standard_templates, wall_dispatcher, DatabaseFactory,
                   DatabaseKit, DatabaseVariant, Document, Email, EmailBuilder, PoolHandle, QueryService, Wall,
                   WallVariant};
use log::debug;

use crate::config::AppConfig;
use crate::errors::AppError;

pub struct Toolkit {
    config: AppConfig,
    engine: DatabaseVariant,
    wall: WallVariant,
    walls: FactoryDispatcher<Wall>,
    databases: FamilyCatalog<dyn DatabaseFactory>,
    templates: PrototypeRegistry<Document>,
    emails: PrototypeRegistry<Email>,
    pool: PoolHandle,
}

impl Toolkit {
    /// # Errores
    /// - `AppError::Config` si el tamaño del pool es cero.
    /// - `AppError::Kit(UnknownVariant)` si el motor o el muro configurados
    ///   no existen.
    pub fn from_config(config: AppConfig) -> Result<Self, AppError> {
        if config.pool_size == 0 {
            return Err(AppError::Config("pool size must be at least 1".into()));
        }
        let engine: DatabaseVariant = config.database_variant.parse()?;
        let wall: WallVariant = config.wall_variant.parse()?;
        debug!("toolkit: wiring components (database={engine}, wall={wall})");
        Ok(Toolkit { engine,
                     wall,
                     walls: wall_dispatcher(config.seasoned_planks),
                     databases: database_catalog(config.postgres_host.clone()),
                     templates: standard_templates()?,
                     emails: PrototypeRegistry::new(),
                     pool: pool_handle(engine, config.pool_size),
                     config })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn walls(&self) -> &FactoryDispatcher<Wall> {
        &self.walls
    }

    pub fn databases(&self) -> &FamilyCatalog<dyn DatabaseFactory> {
        &self.databases
    }

    pub fn templates(&self) -> &PrototypeRegistry<Document> {
        &self.templates
    }

    pub fn pool(&self) -> &PoolHandle {
        &self.pool
    }

    /// Motor configurado, ya normalizado.
    pub fn engine(&self) -> DatabaseVariant {
        self.engine
    }

    /// Variante de muro configurada, ya normalizada.
    pub fn wall_variant(&self) -> WallVariant {
        self.wall
    }

    /// Muro de la variante configurada.
    pub fn default_wall(&self) -> Result<Wall, AppError> {
        Ok(self.walls.create(self.wall.as_str())?)
    }

    /// Familia del motor configurado.
    pub fn default_database_kit(&self) -> Result<DatabaseKit, AppError> {
        Ok(self.databases.create_family(self.engine.as_str())?)
    }

    pub fn query_service(&self) -> QueryService<'_> {
        QueryService::new(&self.pool)
    }

    /// Construye un correo con `configure` y lo registra como plantilla
    /// bajo `name`. Devuelve la plantilla reemplazada, si la había.
    pub fn register_email_template<C>(&self, name: &str, configure: C) -> Result<Option<Email>, AppError>
        where C: FnOnce(&mut EmailBuilder)
    {
        let mut builder = EmailBuilder::new();
        configure(&mut builder);
        let email = builder.build()?;
        Ok(self.emails.register(name, email)?)
    }

    /// Copia independiente de la plantilla de correo `name`.
    pub fn email_from_template(&self, name: &str) -> Result<Email, AppError> {
        Ok(self.emails.clone_of(name)?)
    }
}
