//! Document store
//!
//! Embedded redb database holding the four collections as JSON documents:
//! `produtos`, `opcoes`, `usuarios` and `pedidos`. Tab writes go through
//! [`Store::write_tabs`], which runs in one write transaction and publishes
//! the resulting changes after commit, in commit order.

mod error;
pub mod seed;
mod subscription;
mod tabs;

pub use error::{StoreError, StoreResult};
pub use subscription::{ChangeKind, DocumentChange, TabQuery, TabSubscription, TabWrite};
pub use tabs::TabWriter;

use parking_lot::Mutex;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::{MenuOption, Product, Tab, TabStatus, User};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Products: key = product id, value = JSON
const PRODUCTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("produtos");

/// Options: key = option id, value = JSON
const OPTIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("opcoes");

/// Users: key = user id, value = JSON
const USERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("usuarios");

/// Tabs: key = tab id, value = JSON
pub(crate) const TABS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("pedidos");

/// Index: identifier -> id of its open (`novo`) tab
pub(crate) const OPEN_TABS_TABLE: TableDefinition<&str, &str> =
    TableDefinition::new("pedidos_abertos");

/// Index: (timestamp, tab id) -> ()
pub(crate) const TABS_BY_TIMESTAMP_TABLE: TableDefinition<(i64, &str), ()> =
    TableDefinition::new("pedidos_por_timestamp");

/// One sender per live subscription; each message is one committed transaction
type Subscribers = Vec<mpsc::UnboundedSender<Vec<TabWrite>>>;

/// Shared document store
#[derive(Clone)]
pub struct Store {
    db: Arc<Database>,
    /// Serializes commit + publish so subscribers see commit order
    write_lock: Arc<Mutex<Subscribers>>,
    /// Cancelled on close; ends every subscription
    closed: CancellationToken,
}

impl Store {
    /// Open or create database
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open in-memory database (tests, previews)
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StoreResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(PRODUCTS_TABLE)?;
            let _ = write_txn.open_table(OPTIONS_TABLE)?;
            let _ = write_txn.open_table(USERS_TABLE)?;
            let _ = write_txn.open_table(TABS_TABLE)?;
            let _ = write_txn.open_table(OPEN_TABS_TABLE)?;
            let _ = write_txn.open_table(TABS_BY_TIMESTAMP_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self {
            db: Arc::new(db),
            write_lock: Arc::new(Mutex::new(Vec::new())),
            closed: CancellationToken::new(),
        })
    }

    /// End all subscriptions. The data stays readable and writable.
    pub fn close_subscriptions(&self) {
        self.closed.cancel();
        self.write_lock.lock().clear();
    }

    // ========== Generic document helpers ==========

    fn put_doc<T: Serialize>(
        &self,
        def: TableDefinition<&str, &[u8]>,
        id: &str,
        doc: &T,
    ) -> StoreResult<()> {
        let value = serde_json::to_vec(doc)?;
        let _guard = self.write_lock.lock();
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(def)?;
            table.insert(id, value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    fn get_doc<T: DeserializeOwned>(
        &self,
        def: TableDefinition<&str, &[u8]>,
        id: &str,
    ) -> StoreResult<Option<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(def)?;
        match table.get(id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    fn list_docs<T: DeserializeOwned>(
        &self,
        def: TableDefinition<&str, &[u8]>,
    ) -> StoreResult<Vec<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(def)?;
        let mut docs = Vec::new();
        for result in table.iter()? {
            let (_, guard) = result?;
            docs.push(serde_json::from_slice(guard.value())?);
        }
        Ok(docs)
    }

    // ========== Products ==========

    /// Insert or replace a product, assigning an id when missing
    pub fn put_product(&self, mut product: Product) -> StoreResult<Product> {
        if product.id.is_empty() {
            product.id = shared::util::new_id();
        }
        self.put_doc(PRODUCTS_TABLE, &product.id, &product)?;
        Ok(product)
    }

    pub fn list_products(&self) -> StoreResult<Vec<Product>> {
        self.list_docs(PRODUCTS_TABLE)
    }

    // ========== Options ==========

    pub fn put_option(&self, mut option: MenuOption) -> StoreResult<MenuOption> {
        if option.id.is_empty() {
            option.id = shared::util::new_id();
        }
        self.put_doc(OPTIONS_TABLE, &option.id, &option)?;
        Ok(option)
    }

    pub fn list_options(&self) -> StoreResult<Vec<MenuOption>> {
        self.list_docs(OPTIONS_TABLE)
    }

    // ========== Users ==========

    pub fn put_user(&self, mut user: User) -> StoreResult<User> {
        if user.id.is_empty() {
            user.id = shared::util::new_id();
        }
        self.put_doc(USERS_TABLE, &user.id, &user)?;
        Ok(user)
    }

    /// First user with this username
    pub fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self
            .list_docs::<User>(USERS_TABLE)?
            .into_iter()
            .find(|u| u.username == username))
    }

    // ========== Tabs ==========

    pub fn get_tab(&self, id: &str) -> StoreResult<Option<Tab>> {
        self.get_doc(TABS_TABLE, id)
    }

    /// Tabs with `status`, oldest timestamp first
    pub fn list_tabs_by_status(&self, status: TabStatus) -> StoreResult<Vec<Tab>> {
        let mut tabs: Vec<Tab> = self
            .list_docs::<Tab>(TABS_TABLE)?
            .into_iter()
            .filter(|t| t.status == status)
            .collect();
        tabs.sort_by_key(|t| t.timestamp.unwrap_or(i64::MAX));
        Ok(tabs)
    }

    /// Tabs whose timestamp falls in `[start, end)`, ordered by timestamp
    pub fn list_tabs_in_range(&self, start: i64, end: i64) -> StoreResult<Vec<Tab>> {
        let read_txn = self.db.begin_read()?;
        let idx_table = read_txn.open_table(TABS_BY_TIMESTAMP_TABLE)?;
        let data_table = read_txn.open_table(TABS_TABLE)?;

        let range_start: (i64, &str) = (start, "");
        let range_end: (i64, &str) = (end, "");

        let mut tabs = Vec::new();
        for result in idx_table.range(range_start..range_end)? {
            let (key, _) = result?;
            let (_, tab_id) = key.value();
            if let Some(guard) = data_table.get(tab_id)? {
                tabs.push(serde_json::from_slice(guard.value())?);
            }
        }
        Ok(tabs)
    }

    /// The open tab for an identifier, if any
    pub fn find_open_tab(&self, identifier: &str) -> StoreResult<Option<Tab>> {
        let read_txn = self.db.begin_read()?;
        let idx_table = read_txn.open_table(OPEN_TABS_TABLE)?;
        let data_table = read_txn.open_table(TABS_TABLE)?;

        let Some(id_guard) = idx_table.get(identifier)? else {
            return Ok(None);
        };
        match data_table.get(id_guard.value())? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    /// Run tab writes in a single transaction
    ///
    /// On `Ok` the transaction commits and every write is published to
    /// subscribers. On `Err` nothing is written or published.
    pub fn write_tabs<R, E>(
        &self,
        f: impl FnOnce(&mut TabWriter<'_>) -> Result<R, E>,
    ) -> Result<R, E>
    where
        E: From<StoreError>,
    {
        let mut subscribers = self.write_lock.lock();
        let txn = self.db.begin_write().map_err(StoreError::from)?;

        let (result, writes) = {
            let mut writer = TabWriter::new(&txn);
            let result = f(&mut writer);
            (result, writer.into_writes())
        };

        let value = match result {
            Ok(value) => value,
            Err(e) => {
                if let Err(abort_err) = txn.abort() {
                    tracing::warn!(error = %abort_err, "Failed to abort tab transaction");
                }
                return Err(e);
            }
        };
        txn.commit().map_err(StoreError::from)?;

        if !writes.is_empty() {
            // Dropped subscriptions are pruned here
            subscribers.retain(|tx| tx.send(writes.clone()).is_ok());
        }
        Ok(value)
    }

    /// Subscribe to tab changes relative to `query`
    ///
    /// Only changes committed after this call are delivered. Delivery is
    /// unbounded: a slow consumer never loses a change.
    pub fn subscribe_tabs(&self, query: TabQuery) -> TabSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = self.closed.child_token();
        if !self.closed.is_cancelled() {
            self.write_lock.lock().push(tx);
        }
        TabSubscription::new(query, rx, cancel)
    }
}
