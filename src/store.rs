//! Record store collaborator interface
//!
//! The store owns the address list. It announces every structural change
//! with a [`StoreEvent`]; views never learn about changes any other way.

use std::rc::Weak;

use crate::record::AddressRecord;
use crate::Result;

/// Change events raised by a record store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    /// The whole list is about to be replaced (e.g. account switch)
    RefreshStarted,
    RefreshFinished,
    /// A row is about to be appended at the given position
    RowAppendStarted(usize),
    RowAppendFinished,
    RowUpdated(usize),
}

pub trait StoreObserver {
    fn on_store_event(&self, event: &StoreEvent);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

/// Ordered, externally owned sequence of address records
pub trait AddressRecordStore {
    fn count(&self) -> usize;

    /// Snapshot of the record at `index`, or `None` when out of bounds
    fn record_at(&self, index: usize) -> Option<AddressRecord>;

    fn set_label(&self, index: usize, label: &str) -> Result<()>;

    /// Account the current rows belong to; 0 is the default account
    fn account_index(&self) -> u32;

    fn subscribe(&self, observer: Weak<dyn StoreObserver>) -> SubscriptionId;

    fn unsubscribe(&self, id: SubscriptionId);
}
