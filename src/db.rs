//! Per-request database connections and schema initialization.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use rusqlite::{Connection, Transaction};

use crate::{
    Error, budget::create_budget_table, expense::create_expense_table,
    income::create_income_table,
};

/// Opens a fresh SQLite connection for each unit of work.
///
/// There is no pooling: every call to [ConnectionManager::with_transaction]
/// opens a connection, runs the work inside a transaction and closes the
/// connection again before returning.
#[derive(Debug, Clone)]
pub struct ConnectionManager {
    database_url: Arc<str>,
    /// Keeps a shared in-memory database alive between connections.
    _anchor: Option<Arc<Mutex<Connection>>>,
}

static NEXT_MEMORY_DATABASE_ID: AtomicUsize = AtomicUsize::new(0);

impl ConnectionManager {
    /// Create a connection manager for the SQLite database at `database_url`.
    ///
    /// `database_url` may be a file path or a SQLite URI. No connection is
    /// opened until the first unit of work.
    pub fn new(database_url: &str) -> Self {
        Self {
            database_url: Arc::from(database_url),
            _anchor: None,
        }
    }

    /// Create a connection manager for a new, empty in-memory database.
    ///
    /// Each call creates a separate database. The database lives for as long
    /// as the returned manager, or any of its clones, is alive.
    ///
    /// # Errors
    /// Returns [Error::DatabaseUnavailable] if the database cannot be created.
    pub fn open_in_memory() -> Result<Self, Error> {
        let id = NEXT_MEMORY_DATABASE_ID.fetch_add(1, Ordering::Relaxed);
        let database_url = format!("file:budgetwise-memory-{id}?mode=memory&cache=shared");

        let anchor = Connection::open(&database_url)
            .map_err(|error| Error::DatabaseUnavailable(error.to_string()))?;

        Ok(Self {
            database_url: Arc::from(database_url),
            _anchor: Some(Arc::new(Mutex::new(anchor))),
        })
    }

    /// The location of the database.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Run `operation` inside a transaction on a new connection.
    ///
    /// The transaction is committed if `operation` returns `Ok` and rolled
    /// back otherwise. If `operation` panics, the transaction is rolled back
    /// when it is dropped. The connection is closed before this function
    /// returns on every path.
    ///
    /// # Errors
    /// Returns:
    /// - [Error::DatabaseUnavailable] if a connection cannot be opened or a
    ///   transaction cannot be started,
    /// - the error returned by `operation`,
    /// - or [Error::SqlError] if the commit fails.
    pub fn with_transaction<T, F>(&self, operation: F) -> Result<T, Error>
    where
        F: FnOnce(&Transaction) -> Result<T, Error>,
    {
        let mut connection = self.connect()?;

        let transaction = connection.transaction().map_err(|error| {
            tracing::error!("could not start a database transaction: {error}");
            Error::DatabaseUnavailable(error.to_string())
        })?;

        match operation(&transaction) {
            Ok(value) => {
                transaction.commit()?;
                Ok(value)
            }
            Err(error) => {
                if let Err(rollback_error) = transaction.rollback() {
                    tracing::error!("could not roll back database transaction: {rollback_error}");
                }

                Err(error)
            }
        }
    }

    fn connect(&self) -> Result<Connection, Error> {
        Connection::open(&*self.database_url).map_err(|error| {
            tracing::error!(
                "could not open database \"{}\": {error}",
                self.database_url
            );
            Error::DatabaseUnavailable(error.to_string())
        })
    }
}

/// Create the application tables if they do not exist yet.
///
/// Safe to run on every startup; existing tables are left untouched.
///
/// # Errors
/// Returns an error if the database is unavailable or a table cannot be
/// created, in which case no table is created.
pub fn initialize(db: &ConnectionManager) -> Result<(), Error> {
    db.with_transaction(|connection| create_tables(connection))
}

fn create_tables(connection: &Connection) -> Result<(), Error> {
    create_income_table(connection)?;
    create_expense_table(connection)?;
    create_budget_table(connection)?;

    Ok(())
}
