//! Familias de acceso a datos: `{conexión, ejecutor de consultas}`.
//!
//! Cada motor (MySQL, MongoDB, PostgreSQL) aporta un `DatabaseFactory`
//! concreto. Una vez elegido, todos los miembros de la familia salen de ese
//! motor, de modo que una conexión MySQL nunca acaba emparejada con un
//! ejecutor MongoDB.
//!
//! Añadir un motor nuevo = un struct más que implemente `DatabaseFactory`.
//! Añadir un miembro nuevo a la familia (p. ej. un `Migrator`) = una
//! operación más en el trait y en cada motor existente.

use chrono::{DateTime, Utc};
use forge_core::family::{self, FamilyCatalog, FamilyFactory};
use forge_core::{KitError, Product};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatabaseVariant {
    MySql,
    MongoDb,
    Postgres,
}

impl DatabaseVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseVariant::MySql => "mysql",
            DatabaseVariant::MongoDb => "mongodb",
            DatabaseVariant::Postgres => "postgres",
        }
    }

    pub fn all() -> [DatabaseVariant; 3] {
        [DatabaseVariant::MySql, DatabaseVariant::MongoDb, DatabaseVariant::Postgres]
    }
}

impl fmt::Display for DatabaseVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatabaseVariant {
    type Err = KitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(DatabaseVariant::MySql),
            "mongodb" | "mongo" => Ok(DatabaseVariant::MongoDb),
            "postgres" | "postgresql" => Ok(DatabaseVariant::Postgres),
            other => Err(KitError::UnknownVariant(other.to_string())),
        }
    }
}

/// Conexión a un motor concreto.
pub trait Connection: Product + fmt::Debug {
    fn dsn(&self) -> String;
    fn connect(&self) -> String;
}

/// Ejecutor de consultas que habla el dialecto de su motor.
pub trait QueryExecutor: Product + fmt::Debug {
    fn execute(&self, query: &str) -> String;
}

/// Familia completa, con todos sus miembros de la misma variante.
#[derive(Debug)]
pub struct DatabaseKit {
    pub variant: DatabaseVariant,
    pub connection: Box<dyn Connection>,
    pub executor: Box<dyn QueryExecutor>,
    pub created_at: DateTime<Utc>,
}

impl DatabaseKit {
    /// Conecta y ejecuta `query` con los miembros de la familia.
    pub fn run(&self, query: &str) -> String {
        format!("{} -> {}", self.connection.connect(), self.executor.execute(query))
    }
}

/// Operaciones de la familia de acceso a datos.
pub trait DatabaseFactory: FamilyFactory<Family = DatabaseKit> {
    fn kind(&self) -> DatabaseVariant;
    fn create_connection(&self) -> Result<Box<dyn Connection>, KitError>;
    fn create_query_executor(&self) -> Result<Box<dyn QueryExecutor>, KitError>;
}

pub const MEMBERS: &[&str] = &["connection", "query_executor"];

/// Construye la familia miembro a miembro; el primer fallo descarta lo ya
/// construido.
fn assemble<F: DatabaseFactory + ?Sized>(factory: &F) -> Result<DatabaseKit, KitError> {
    let variant = factory.kind().as_str();
    let connection = family::member(variant, MEMBERS[0], factory.create_connection())?;
    let executor = family::member(variant, MEMBERS[1], factory.create_query_executor())?;
    Ok(DatabaseKit { variant: factory.kind(),
                     connection,
                     executor,
                     created_at: Utc::now() })
}

// MySQL

#[derive(Debug)]
pub struct MySqlConnection {
    pub host: String,
}

impl Product for MySqlConnection {
    fn variant(&self) -> &str {
        DatabaseVariant::MySql.as_str()
    }
}

impl Connection for MySqlConnection {
    fn dsn(&self) -> String {
        format!("mysql://{}:3306", self.host)
    }
    fn connect(&self) -> String {
        format!("connected to MySQL at {}", self.dsn())
    }
}

#[derive(Debug)]
pub struct MySqlQueryExecutor;

impl Product for MySqlQueryExecutor {
    fn variant(&self) -> &str {
        DatabaseVariant::MySql.as_str()
    }
}

impl QueryExecutor for MySqlQueryExecutor {
    fn execute(&self, query: &str) -> String {
        format!("SQL[mysql] {query}")
    }
}

pub struct MySqlFactory;

impl FamilyFactory for MySqlFactory {
    type Family = DatabaseKit;
    fn variant(&self) -> &str { DatabaseVariant::MySql.as_str() }
    fn members(&self) -> &'static [&'static str] { MEMBERS }
    fn create_family(&self) -> Result<DatabaseKit, KitError> { assemble(self) }
}

impl DatabaseFactory for MySqlFactory {
    fn kind(&self) -> DatabaseVariant {
        DatabaseVariant::MySql
    }
    fn create_connection(&self) -> Result<Box<dyn Connection>, KitError> {
        Ok(Box::new(MySqlConnection { host: "localhost".into() }))
    }
    fn create_query_executor(&self) -> Result<Box<dyn QueryExecutor>, KitError> {
        Ok(Box::new(MySqlQueryExecutor))
    }
}

// MongoDB

#[derive(Debug)]
pub struct MongoConnection {
    pub replica_set: String,
}

impl Product for MongoConnection {
    fn variant(&self) -> &str {
        DatabaseVariant::MongoDb.as_str()
    }
}

impl Connection for MongoConnection {
    fn dsn(&self) -> String {
        format!("mongodb://localhost:27017/?replicaSet={}", self.replica_set)
    }
    fn connect(&self) -> String {
        format!("connected to MongoDB at {}", self.dsn())
    }
}

#[derive(Debug)]
pub struct MongoQueryExecutor;

impl Product for MongoQueryExecutor {
    fn variant(&self) -> &str {
        DatabaseVariant::MongoDb.as_str()
    }
}

impl QueryExecutor for MongoQueryExecutor {
    fn execute(&self, query: &str) -> String {
        format!("db.collection.find({query})")
    }
}

pub struct MongoFactory;

impl FamilyFactory for MongoFactory {
    type Family = DatabaseKit;
    fn variant(&self) -> &str { DatabaseVariant::MongoDb.as_str() }
    fn members(&self) -> &'static [&'static str] { MEMBERS }
    fn create_family(&self) -> Result<DatabaseKit, KitError> { assemble(self) }
}

impl DatabaseFactory for MongoFactory {
    fn kind(&self) -> DatabaseVariant {
        DatabaseVariant::MongoDb
    }
    fn create_connection(&self) -> Result<Box<dyn Connection>, KitError> {
        Ok(Box::new(MongoConnection { replica_set: "rs0".into() }))
    }
    fn create_query_executor(&self) -> Result<Box<dyn QueryExecutor>, KitError> {
        Ok(Box::new(MongoQueryExecutor))
    }
}

// PostgreSQL: la conexión exige un host configurado.

#[derive(Debug)]
pub struct PostgresConnection {
    pub host: String,
}

impl Product for PostgresConnection {
    fn variant(&self) -> &str {
        DatabaseVariant::Postgres.as_str()
    }
}

impl Connection for PostgresConnection {
    fn dsn(&self) -> String {
        format!("postgres://{}:5432", self.host)
    }
    fn connect(&self) -> String {
        format!("connected to PostgreSQL at {}", self.dsn())
    }
}

#[derive(Debug)]
pub struct PostgresQueryExecutor;

impl Product for PostgresQueryExecutor {
    fn variant(&self) -> &str {
        DatabaseVariant::Postgres.as_str()
    }
}

impl QueryExecutor for PostgresQueryExecutor {
    fn execute(&self, query: &str) -> String {
        format!("SQL[postgres] {query}")
    }
}

pub struct PostgresFactory {
    pub host: Option<String>,
}

impl FamilyFactory for PostgresFactory {
    type Family = DatabaseKit;
    fn variant(&self) -> &str { DatabaseVariant::Postgres.as_str() }
    fn members(&self) -> &'static [&'static str] { MEMBERS }
    fn create_family(&self) -> Result<DatabaseKit, KitError> { assemble(self) }
}

impl DatabaseFactory for PostgresFactory {
    fn kind(&self) -> DatabaseVariant {
        DatabaseVariant::Postgres
    }
    fn create_connection(&self) -> Result<Box<dyn Connection>, KitError> {
        match self.host.as_deref().map(str::trim) {
            Some(host) if !host.is_empty() => Ok(Box::new(PostgresConnection { host: host.to_string() })),
            _ => Err(KitError::creation(DatabaseVariant::Postgres.as_str(), "no host configured")),
        }
    }
    fn create_query_executor(&self) -> Result<Box<dyn QueryExecutor>, KitError> {
        Ok(Box::new(PostgresQueryExecutor))
    }
}

/// Catálogo con los tres motores registrados por su token.
pub fn database_catalog(postgres_host: Option<String>) -> FamilyCatalog<dyn DatabaseFactory> {
    let mut catalog: FamilyCatalog<dyn DatabaseFactory> = FamilyCatalog::new();
    catalog.register(DatabaseVariant::MySql.as_str(), Box::new(MySqlFactory))
           .register(DatabaseVariant::MongoDb.as_str(), Box::new(MongoFactory))
           .register(DatabaseVariant::Postgres.as_str(), Box::new(PostgresFactory { host: postgres_host }));
    catalog
}

/// Atajo: elige el motor por enum y construye su familia.
pub fn create_kit(catalog: &FamilyCatalog<dyn DatabaseFactory>, variant: DatabaseVariant) -> Result<DatabaseKit, KitError> {
    catalog.create_family(variant.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_engine_builds_consistent_family() {
        let catalog = database_catalog(Some("db.internal".into()));
        for v in DatabaseVariant::all() {
            let kit = create_kit(&catalog, v).unwrap();
            assert_eq!(kit.variant, v);
            assert_eq!(kit.connection.variant(), v.as_str());
            assert_eq!(kit.executor.variant(), v.as_str());
        }
    }

    #[test]
    fn test_postgres_without_host_fails_on_connection() {
        let err = PostgresFactory { host: None }.create_family().unwrap_err();
        assert_eq!(err.failed_member(), Some("connection"));
        assert_eq!(err,
                   KitError::FamilyCreation { variant: "postgres".into(),
                                              member: "connection".into(),
                                              source: Box::new(KitError::creation("postgres", "no host configured")) });
    }

    #[test]
    fn test_variant_tokens() {
        assert_eq!("Mongo".parse::<DatabaseVariant>().unwrap(), DatabaseVariant::MongoDb);
        assert_eq!("postgresql".parse::<DatabaseVariant>().unwrap(), DatabaseVariant::Postgres);
        assert!("oracle".parse::<DatabaseVariant>().is_err());
    }

    #[test]
    fn test_kit_runs_query_in_its_dialect() {
        let kit = MySqlFactory.create_family().unwrap();
        assert_eq!(kit.run("SELECT 1"), "connected to MySQL at mysql://localhost:3306 -> SQL[mysql] SELECT 1");
    }
}
