//! In-memory address book
//!
//! Owns the address rows of the currently selected account and announces
//! every change through [`StoreEvent`]s. Account switches replace the whole
//! list inside a refresh; new addresses are appended one row at a time.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::rc::Weak;

use serde::{Deserialize, Serialize};

use crate::error::{StorageError, TableError};
use crate::observers::ObserverList;
use crate::record::AddressRecord;
use crate::store::{AddressRecordStore, StoreEvent, StoreObserver, SubscriptionId};
use crate::Result;

/// User-assigned metadata persisted per address
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LabelEntry {
    address: String,
    label: String,
    #[serde(default)]
    pinned: bool,
    #[serde(default)]
    hidden: bool,
}

pub struct AddressBook {
    account: Cell<u32>,
    rows: RefCell<Vec<AddressRecord>>,
    observers: ObserverList<dyn StoreObserver>,
}

impl Default for AddressBook {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressBook {
    /// Empty book for the default account
    pub fn new() -> Self {
        Self {
            account: Cell::new(0),
            rows: RefCell::new(Vec::new()),
            observers: ObserverList::new(),
        }
    }

    pub fn with_records(account: u32, records: Vec<AddressRecord>) -> Result<Self> {
        validate_records(&records)?;
        Ok(Self {
            account: Cell::new(account),
            rows: RefCell::new(records),
            observers: ObserverList::new(),
        })
    }

    /// Replace all rows, e.g. after switching to another account
    pub fn refresh(&self, account: u32, records: Vec<AddressRecord>) -> Result<()> {
        validate_records(&records)?;

        self.emit(StoreEvent::RefreshStarted);
        self.account.set(account);
        *self.rows.borrow_mut() = records;
        self.emit(StoreEvent::RefreshFinished);

        log::info!(
            "Address book refreshed: account {} with {} rows",
            account,
            self.count()
        );
        Ok(())
    }

    /// Append a freshly generated address, returning its row
    pub fn append(&self, address: impl Into<String>) -> Result<usize> {
        let address = address.into();
        if address.is_empty() {
            return Err(TableError::EmptyAddress);
        }

        let index = self.count();
        self.emit(StoreEvent::RowAppendStarted(index));
        self.rows
            .borrow_mut()
            .push(AddressRecord::new(address, String::new()));
        self.emit(StoreEvent::RowAppendFinished);

        log::debug!("Appended address at row {}", index);
        Ok(index)
    }

    pub fn set_pinned(&self, index: usize, pinned: bool) -> Result<()> {
        self.update(index, |record| {
            std::mem::replace(&mut record.pinned, pinned) != pinned
        })
    }

    pub fn set_hidden(&self, index: usize, hidden: bool) -> Result<()> {
        self.update(index, |record| {
            std::mem::replace(&mut record.hidden, hidden) != hidden
        })
    }

    /// Flag an address as having received funds
    pub fn mark_used(&self, index: usize) -> Result<()> {
        self.update(index, |record| !std::mem::replace(&mut record.used, true))
    }

    /// Write labels, pins and hidden flags of all rows as JSON
    pub fn save_labels(&self, path: &Path) -> Result<()> {
        let entries: Vec<LabelEntry> = self
            .rows
            .borrow()
            .iter()
            .map(|record| LabelEntry {
                address: record.address.clone(),
                label: record.label.clone(),
                pinned: record.pinned,
                hidden: record.hidden,
            })
            .collect();

        let json = serde_json::to_string_pretty(&entries).map_err(StorageError::from)?;
        fs::write(path, json).map_err(StorageError::from)?;
        log::debug!("Saved {} label entries to {}", entries.len(), path.display());
        Ok(())
    }

    /// Apply previously saved metadata to matching addresses.
    ///
    /// Rows whose address is not in the file keep their current state.
    /// Returns the number of rows that matched.
    pub fn load_labels(&self, path: &Path) -> Result<usize> {
        if !path.exists() {
            return Err(StorageError::FileNotFound(path.display().to_string()).into());
        }
        let contents = fs::read_to_string(path).map_err(StorageError::from)?;
        let entries: Vec<LabelEntry> =
            serde_json::from_str(&contents).map_err(StorageError::from)?;
        let by_address: HashMap<&str, &LabelEntry> = entries
            .iter()
            .map(|entry| (entry.address.as_str(), entry))
            .collect();

        self.emit(StoreEvent::RefreshStarted);
        let mut matched = 0;
        for record in self.rows.borrow_mut().iter_mut() {
            if let Some(entry) = by_address.get(record.address.as_str()) {
                record.label = entry.label.clone();
                record.pinned = entry.pinned;
                record.hidden = entry.hidden;
                matched += 1;
            }
        }
        self.emit(StoreEvent::RefreshFinished);

        log::info!("Restored labels for {} of {} rows", matched, self.count());
        Ok(matched)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn update(&self, index: usize, apply: impl FnOnce(&mut AddressRecord) -> bool) -> Result<()> {
        let changed = {
            let mut rows = self.rows.borrow_mut();
            let count = rows.len();
            let record = rows
                .get_mut(index)
                .ok_or_else(|| TableError::out_of_bounds(index, count))?;
            apply(record)
        };

        if changed {
            self.emit(StoreEvent::RowUpdated(index));
        }
        Ok(())
    }

    fn emit(&self, event: StoreEvent) {
        for observer in self.observers.live() {
            observer.on_store_event(&event);
        }
    }
}

impl AddressRecordStore for AddressBook {
    fn count(&self) -> usize {
        self.rows.borrow().len()
    }

    fn record_at(&self, index: usize) -> Option<AddressRecord> {
        self.rows.borrow().get(index).cloned()
    }

    /// Label changes made here are announced by the caller, not the book
    fn set_label(&self, index: usize, label: &str) -> Result<()> {
        let mut rows = self.rows.borrow_mut();
        let count = rows.len();
        let record = rows
            .get_mut(index)
            .ok_or_else(|| TableError::out_of_bounds(index, count))?;
        record.label = label.to_string();
        Ok(())
    }

    fn account_index(&self) -> u32 {
        self.account.get()
    }

    fn subscribe(&self, observer: Weak<dyn StoreObserver>) -> SubscriptionId {
        SubscriptionId(self.observers.add(observer))
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        if !self.observers.remove(id.0) {
            log::warn!("Unsubscribe for unknown subscription {:?}", id);
        }
    }
}

fn validate_records(records: &[AddressRecord]) -> Result<()> {
    if records.iter().any(|record| record.address.is_empty()) {
        return Err(TableError::EmptyAddress);
    }
    Ok(())
}
