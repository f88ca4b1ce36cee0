//! Transactional tab writer

use redb::{ReadableTable, WriteTransaction};
use shared::models::Tab;

use super::error::StoreResult;
use super::subscription::TabWrite;
use super::{OPEN_TABS_TABLE, TABS_BY_TIMESTAMP_TABLE, TABS_TABLE};

/// Tab access inside one write transaction
///
/// Keeps the open-tab and timestamp indexes in step with the documents and
/// records every write for the change feed.
pub struct TabWriter<'a> {
    txn: &'a WriteTransaction,
    writes: Vec<TabWrite>,
}

impl<'a> TabWriter<'a> {
    pub(super) fn new(txn: &'a WriteTransaction) -> Self {
        Self {
            txn,
            writes: Vec::new(),
        }
    }

    pub(super) fn into_writes(self) -> Vec<TabWrite> {
        self.writes
    }

    pub fn get(&self, id: &str) -> StoreResult<Option<Tab>> {
        let table = self.txn.open_table(TABS_TABLE)?;
        let tab = match table.get(id)? {
            Some(guard) => Some(serde_json::from_slice(guard.value())?),
            None => None,
        };
        Ok(tab)
    }

    /// The open tab for `identifier`, as seen by this transaction
    pub fn find_open(&self, identifier: &str) -> StoreResult<Option<Tab>> {
        let tab_id = {
            let idx_table = self.txn.open_table(OPEN_TABS_TABLE)?;
            let id = idx_table.get(identifier)?.map(|g| g.value().to_string());
            id
        };
        match tab_id {
            Some(id) => self.get(&id),
            None => Ok(None),
        }
    }

    /// Insert or replace a tab
    pub fn put(&mut self, tab: &Tab) -> StoreResult<()> {
        let before = self.get(&tab.id)?;
        let value = serde_json::to_vec(tab)?;

        {
            let mut table = self.txn.open_table(TABS_TABLE)?;
            table.insert(tab.id.as_str(), value.as_slice())?;
        }
        if let Some(prev) = &before {
            self.unindex(prev)?;
        }
        self.index(tab)?;

        self.writes.push(TabWrite {
            before,
            after: Some(tab.clone()),
        });
        Ok(())
    }

    /// Delete a tab, returning it if it existed
    pub fn remove(&mut self, id: &str) -> StoreResult<Option<Tab>> {
        let Some(before) = self.get(id)? else {
            return Ok(None);
        };
        {
            let mut table = self.txn.open_table(TABS_TABLE)?;
            table.remove(id)?;
        }
        self.unindex(&before)?;

        self.writes.push(TabWrite {
            before: Some(before.clone()),
            after: None,
        });
        Ok(Some(before))
    }

    fn index(&self, tab: &Tab) -> StoreResult<()> {
        if tab.is_open() {
            let mut open = self.txn.open_table(OPEN_TABS_TABLE)?;
            open.insert(tab.identifier.as_str(), tab.id.as_str())?;
        }
        if let Some(ts) = tab.timestamp {
            let mut by_ts = self.txn.open_table(TABS_BY_TIMESTAMP_TABLE)?;
            by_ts.insert((ts, tab.id.as_str()), ())?;
        }
        Ok(())
    }

    fn unindex(&self, tab: &Tab) -> StoreResult<()> {
        if tab.is_open() {
            let mut open = self.txn.open_table(OPEN_TABS_TABLE)?;
            let points_here = open
                .get(tab.identifier.as_str())?
                .is_some_and(|g| g.value() == tab.id);
            if points_here {
                open.remove(tab.identifier.as_str())?;
            }
        }
        if let Some(ts) = tab.timestamp {
            let mut by_ts = self.txn.open_table(TABS_BY_TIMESTAMP_TABLE)?;
            by_ts.remove((ts, tab.id.as_str()))?;
        }
        Ok(())
    }
}
