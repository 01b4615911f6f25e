//! Pool de conexiones compartido: el recurso de instancia única del dominio.

use chrono::{DateTime, Utc};
use forge_core::{Product, SingletonHandle};
use log::debug;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

use crate::database::DatabaseVariant;

/// Inicializador del pool, ya configurado.
pub type PoolInit = Box<dyn Fn() -> ConnectionPool + Send + Sync>;

/// Handle del pool que se inyecta en quienes lo consumen.
pub type PoolHandle = SingletonHandle<ConnectionPool, PoolInit>;

#[derive(Debug, Serialize)]
pub struct ConnectionPool {
    id: Uuid,
    variant: DatabaseVariant,
    size: usize,
    created_at: DateTime<Utc>,
    #[serde(skip)]
    leases: AtomicUsize,
}

impl ConnectionPool {
    pub fn new(variant: DatabaseVariant, size: usize) -> Self {
        let size = size.max(1);
        debug!("pool: opening {size} slots for {variant}");
        ConnectionPool { id: Uuid::new_v4(),
                         variant,
                         size,
                         created_at: Utc::now(),
                         leases: AtomicUsize::new(0) }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Entrega un slot en round-robin y devuelve su índice.
    pub fn lease(&self) -> usize {
        self.leases.fetch_add(1, Ordering::Relaxed) % self.size
    }

    pub fn leases(&self) -> usize {
        self.leases.load(Ordering::Relaxed)
    }
}

impl Product for ConnectionPool {
    fn variant(&self) -> &str {
        self.variant.as_str()
    }
}

/// Crea el handle del pool; el pool no se abre hasta el primer `get()`.
pub fn pool_handle(variant: DatabaseVariant, size: usize) -> PoolHandle {
    let init: PoolInit = Box::new(move || ConnectionPool::new(variant, size));
    SingletonHandle::new(init)
}

/// Consumidor del pool: recibe el handle por inyección.
pub struct QueryService<'a> {
    pool: &'a PoolHandle,
}

impl<'a> QueryService<'a> {
    pub fn new(pool: &'a PoolHandle) -> Self {
        Self { pool }
    }

    pub fn run(&self, query: &str) -> String {
        let pool = self.pool.get();
        let slot = pool.lease();
        format!("[{}#{} slot {}] {}", pool.variant(), pool.id(), slot, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forge_core::SingletonState;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_services_share_one_pool() {
        let handle = pool_handle(DatabaseVariant::MySql, 2);
        assert_eq!(handle.state(), SingletonState::Uninitialized);

        let a = QueryService::new(&handle);
        let b = QueryService::new(&handle);
        a.run("SELECT 1");
        b.run("SELECT 2");
        a.run("SELECT 3");

        let pool = handle.get();
        assert_eq!(pool.leases(), 3);
        assert!(Arc::ptr_eq(&pool, &handle.get()));
    }

    #[test]
    fn test_lease_round_robin() {
        let pool = ConnectionPool::new(DatabaseVariant::Postgres, 2);
        assert_eq!((pool.lease(), pool.lease(), pool.lease()), (0, 1, 0));
    }

    #[test]
    fn test_zero_size_is_clamped() {
        assert_eq!(ConnectionPool::new(DatabaseVariant::MongoDb, 0).size(), 1);
    }

    struct Capture(Mutex<Vec<String>>);

    impl log::Log for Capture {
        fn enabled(&self, _: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            if let Ok(mut lines) = self.0.lock() {
                lines.push(record.args().to_string());
            }
        }

        fn flush(&self) {}
    }

    static CAPTURE: Capture = Capture(Mutex::new(Vec::new()));

    #[test]
    fn test_open_log_reports_clamped_size() {
        if log::set_logger(&CAPTURE).is_ok() {
            log::set_max_level(log::LevelFilter::Debug);
        }
        ConnectionPool::new(DatabaseVariant::MongoDb, 0);
        let lines = CAPTURE.0.lock().unwrap();
        assert!(lines.iter().any(|l| l == "pool: opening 1 slots for mongodb"));
        assert!(!lines.iter().any(|l| l.starts_with("pool: opening 0 slots")));
    }
}
