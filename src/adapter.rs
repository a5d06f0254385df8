//! Address table model
//!
//! [`SubaddressTable`] presents the rows of an [`AddressRecordStore`] as a
//! four-column grid. It keeps no copy of record data: every cell is derived
//! from the store when asked for. Store events are translated into grid
//! notifications, and label edits from the grid are written back to the
//! store.
//!
//! Nothing here fails loudly. A missing store, a stale handle or an unknown
//! column is logged and answered with an empty value.

use std::cell::Cell;
use std::rc::{Rc, Weak};

use crate::config::{ConfigStore, SHOW_FULL_ADDRESSES};
use crate::formatter::DisplayFormatter;
use crate::grid::{
    CellValue, Column, ConnectionId, GridListener, GridNotification, IconKind, ItemFlags,
    ModelIndex, Orientation, Role, TableModel,
};
use crate::observers::ObserverList;
use crate::record::AddressRecord;
use crate::store::{AddressRecordStore, StoreEvent, StoreObserver, SubscriptionId};

const PRIMARY_LABEL: &str = "Primary address";
const CHANGE_LABEL: &str = "Change";
const USED_TOOLTIP: &str = "This address is used.";

/// Roles refreshed by edits and row updates
const CONTENT_ROLES: [Role; 2] = [Role::Display, Role::Edit];

/// State of the row insertion announced by the last `RowAppendStarted`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingInsert {
    Idle,
    Accepted(usize),
    Rejected,
}

pub struct SubaddressTable {
    store: Option<Rc<dyn AddressRecordStore>>,
    config: Rc<dyn ConfigStore>,
    formatter: Rc<dyn DisplayFormatter>,
    listeners: ObserverList<dyn GridListener>,
    subscription: Option<SubscriptionId>,
    pending_insert: Cell<PendingInsert>,
}

impl SubaddressTable {
    /// Create the table and subscribe it to the store's change events.
    ///
    /// Without a store the table stays empty for its whole lifetime.
    pub fn new(
        store: Option<Rc<dyn AddressRecordStore>>,
        config: Rc<dyn ConfigStore>,
        formatter: Rc<dyn DisplayFormatter>,
    ) -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<SubaddressTable>| {
            let subscription = match &store {
                Some(store) => {
                    let observer: Weak<dyn StoreObserver> = this.clone();
                    Some(store.subscribe(observer))
                }
                None => {
                    log::error!("SubaddressTable: no address store attached");
                    None
                }
            };

            Self {
                store,
                config,
                formatter,
                listeners: ObserverList::new(),
                subscription,
                pending_insert: Cell::new(PendingInsert::Idle),
            }
        })
    }

    pub fn is_attached(&self) -> bool {
        self.store.is_some()
    }

    /// Register a presentation-layer listener for grid notifications
    pub fn connect(&self, listener: Weak<dyn GridListener>) -> ConnectionId {
        ConnectionId(self.listeners.add(listener))
    }

    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.listeners.remove(id.0)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn show_full_addresses(&self) -> bool {
        self.config.get_bool(SHOW_FULL_ADDRESSES).unwrap_or(false)
    }

    /// Record behind a handle, or the sentinel when it does not resolve
    pub fn entry_from_index(&self, index: &ModelIndex) -> AddressRecord {
        if !index.is_valid() {
            log::error!("SubaddressTable::entry_from_index: invalid index");
            return AddressRecord::sentinel();
        }

        let Some(store) = self.store.as_ref() else {
            log::error!("SubaddressTable::entry_from_index: no address store attached");
            return AddressRecord::sentinel();
        };

        match store.record_at(index.row()) {
            Some(record) => record,
            None => {
                log::error!(
                    "SubaddressTable::entry_from_index: row out of bounds: {}",
                    index.row()
                );
                AddressRecord::sentinel()
            }
        }
    }

    fn emit(&self, notification: GridNotification) {
        for listener in self.listeners.live() {
            listener.on_grid_notification(&notification);
        }
    }

    /// Display, edit and sort values
    fn content(
        &self,
        record: &AddressRecord,
        row: usize,
        column: Column,
        role: Role,
        account: u32,
    ) -> CellValue {
        match column {
            Column::Index => {
                if role == Role::SortKey {
                    let key = if record.pinned { 0 } else { row as u64 + 1 };
                    return CellValue::Int(key);
                }
                CellValue::Text(format!("#{} ", row))
            }
            Column::Address => {
                if role != Role::SortKey && !self.show_full_addresses() {
                    return CellValue::Text(self.formatter.truncate_for_display(&record.address));
                }
                CellValue::Text(record.address.clone())
            }
            Column::Label => match (row, account) {
                (0, 0) => CellValue::from(PRIMARY_LABEL),
                (0, _) => CellValue::from(CHANGE_LABEL),
                _ => CellValue::Text(record.label.clone()),
            },
            Column::IsUsed => CellValue::Bool(record.used),
        }
    }

    fn rows_changed(&self, row: usize) {
        self.emit(GridNotification::CellsChanged {
            top_left: ModelIndex::new(row, Column::Index.index()),
            bottom_right: ModelIndex::new(row, Column::IsUsed.index()),
            roles: CONTENT_ROLES.to_vec(),
        });
    }

    fn begin_row_added(&self, index: usize) {
        let pending = self.pending_insert.get();
        if pending != PendingInsert::Idle {
            log::error!(
                "SubaddressTable::begin_row_added: row insertion started while {:?} is unfinished",
                pending
            );
        }

        let count = self.row_count();
        if index > count {
            log::error!(
                "SubaddressTable::begin_row_added: index out of bounds: {} (count {})",
                index,
                count
            );
            self.pending_insert.set(PendingInsert::Rejected);
            return;
        }

        self.pending_insert.set(PendingInsert::Accepted(index));
        self.emit(GridNotification::RowsAboutToBeInserted {
            first: index,
            last: index,
        });
    }

    fn end_row_added(&self) {
        match self.pending_insert.replace(PendingInsert::Idle) {
            PendingInsert::Accepted(index) => self.emit(GridNotification::RowsInserted {
                first: index,
                last: index,
            }),
            PendingInsert::Rejected => {
                log::debug!("SubaddressTable: dropping end of rejected row insertion");
            }
            PendingInsert::Idle => {
                log::error!("SubaddressTable: row insertion finished without a start");
            }
        }
    }

    fn row_updated(&self, index: usize) {
        let count = self.row_count();
        if index >= count {
            log::error!(
                "SubaddressTable::row_updated: index out of bounds: {} (count {})",
                index,
                count
            );
            return;
        }
        self.rows_changed(index);
    }
}

impl TableModel for SubaddressTable {
    fn row_count(&self) -> usize {
        self.store.as_ref().map_or(0, |store| store.count())
    }

    fn column_count(&self) -> usize {
        Column::COUNT
    }

    fn data(&self, index: &ModelIndex, role: Role) -> CellValue {
        let Some(store) = self.store.as_ref() else {
            return CellValue::Empty;
        };
        if !index.is_valid() {
            return CellValue::Empty;
        }
        let Some(record) = store.record_at(index.row()) else {
            return CellValue::Empty;
        };
        let Some(column) = Column::from_index(index.column()) else {
            log::error!("SubaddressTable::data: invalid column {}", index.column());
            return CellValue::Empty;
        };

        match role {
            Role::Display | Role::Edit | Role::SortKey => {
                self.content(&record, index.row(), column, role, store.account_index())
            }
            Role::Decoration if column == Column::Index => {
                if record.pinned {
                    CellValue::Icon(self.formatter.icon(IconKind::Pin))
                } else if record.hidden {
                    CellValue::Icon(self.formatter.icon(IconKind::HiddenEye))
                } else {
                    CellValue::Empty
                }
            }
            Role::Background if column == Column::Address && record.used => {
                CellValue::Color(self.formatter.used_highlight())
            }
            Role::Font if column == Column::Address => {
                CellValue::Font(self.formatter.monospace_font_hint())
            }
            Role::Tooltip if column == Column::Address && record.used => {
                CellValue::from(USED_TOOLTIP)
            }
            _ => CellValue::Empty,
        }
    }

    fn header_data(&self, section: usize, orientation: Orientation, role: Role) -> CellValue {
        if role != Role::Display || orientation != Orientation::Horizontal {
            return CellValue::Empty;
        }
        Column::from_index(section)
            .map(|column| CellValue::from(column.title()))
            .unwrap_or_default()
    }

    fn set_data(&self, index: &ModelIndex, value: &CellValue, role: Role) -> bool {
        if !index.is_valid() || role != Role::Edit {
            return false;
        }
        let Some(store) = self.store.as_ref() else {
            return false;
        };

        let row = index.row();
        if row >= store.count() || row == 0 {
            return false;
        }
        if Column::from_index(index.column()) != Some(Column::Label) {
            return false;
        }

        if let Err(e) = store.set_label(row, &value.to_string()) {
            log::error!("SubaddressTable::set_data: store rejected label: {}", e);
            return false;
        }

        let cell = ModelIndex::new(row, index.column());
        self.emit(GridNotification::CellsChanged {
            top_left: cell,
            bottom_right: cell,
            roles: CONTENT_ROLES.to_vec(),
        });
        true
    }

    fn flags(&self, index: &ModelIndex) -> ItemFlags {
        if !index.is_valid() || index.row() >= self.row_count() {
            return ItemFlags::ENABLED;
        }

        let flags = ItemFlags::SELECTABLE;
        if index.column() == Column::Label.index() && index.row() != 0 {
            return flags.with_editable();
        }
        flags
    }
}

impl StoreObserver for SubaddressTable {
    fn on_store_event(&self, event: &StoreEvent) {
        log::debug!("SubaddressTable: store event {:?}", event);
        match *event {
            StoreEvent::RefreshStarted => self.emit(GridNotification::ResetBegin),
            StoreEvent::RefreshFinished => self.emit(GridNotification::ResetEnd),
            StoreEvent::RowAppendStarted(index) => self.begin_row_added(index),
            StoreEvent::RowAppendFinished => self.end_row_added(),
            StoreEvent::RowUpdated(index) => self.row_updated(index),
        }
    }
}

impl Drop for SubaddressTable {
    fn drop(&mut self) {
        if let (Some(store), Some(id)) = (self.store.as_ref(), self.subscription) {
            store.unsubscribe(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::AddressBook;
    use crate::config::Settings;
    use crate::formatter::StandardFormatter;

    fn table_over(book: &Rc<AddressBook>) -> Rc<SubaddressTable> {
        let store: Rc<dyn AddressRecordStore> = book.clone();
        SubaddressTable::new(
            Some(store),
            Rc::new(Settings::default()),
            Rc::new(StandardFormatter::default()),
        )
    }

    #[test]
    fn test_detached_table_is_empty() {
        let table = SubaddressTable::new(
            None,
            Rc::new(Settings::default()),
            Rc::new(StandardFormatter::default()),
        );
        assert!(!table.is_attached());
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 4);
        assert!(table.data(&ModelIndex::new(0, 0), Role::Display).is_empty());
        assert!(!table.set_data(&ModelIndex::new(1, 2), &"x".into(), Role::Edit));
        assert!(table.entry_from_index(&ModelIndex::new(0, 0)).is_sentinel());
    }

    #[test]
    fn test_index_column_sort_key() {
        let book = Rc::new(
            AddressBook::with_records(
                0,
                vec![
                    AddressRecord::new("4Primary", ""),
                    AddressRecord::new("4Second", "").with_pinned(true),
                    AddressRecord::new("4Third", ""),
                ],
            )
            .unwrap(),
        );
        let table = table_over(&book);

        let key = |row| table.data(&table.index(row, 0), Role::SortKey).as_int();
        assert_eq!(key(0), Some(1));
        assert_eq!(key(1), Some(0));
        assert_eq!(key(2), Some(3));
        assert_eq!(
            table.data(&table.index(2, 0), Role::Display),
            CellValue::from("#2 ")
        );
    }

    #[test]
    fn test_unknown_column_is_empty() {
        let book = Rc::new(
            AddressBook::with_records(0, vec![AddressRecord::new("4Primary", "")]).unwrap(),
        );
        let table = table_over(&book);
        assert!(table.data(&ModelIndex::new(0, 9), Role::Display).is_empty());
        assert!(!table.index(0, 4).is_valid());
    }

    #[test]
    fn test_overlapping_insert_keeps_latest_start() {
        let book = Rc::new(
            AddressBook::with_records(0, vec![AddressRecord::new("4Primary", "")]).unwrap(),
        );
        let table = table_over(&book);

        table.on_store_event(&StoreEvent::RowAppendStarted(7));
        assert_eq!(table.pending_insert.get(), PendingInsert::Rejected);

        // A fresh start replaces the unfinished one
        table.on_store_event(&StoreEvent::RowAppendStarted(1));
        assert_eq!(table.pending_insert.get(), PendingInsert::Accepted(1));

        table.on_store_event(&StoreEvent::RowAppendFinished);
        assert_eq!(table.pending_insert.get(), PendingInsert::Idle);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let book = Rc::new(AddressBook::new());
        let table = table_over(&book);
        assert_eq!(book.observer_count(), 1);
        drop(table);
        assert_eq!(book.observer_count(), 0);
    }
}
