//! Common test utilities for address table integration tests
//!
//! This module provides shared test infrastructure including:
//! - Logger initialisation
//! - A table fixture wired to an in-memory address book
//! - A grid listener that records every notification

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use subaddress_table::{
    AddressBook, AddressRecord, AddressRecordStore, GridListener, GridNotification, Settings,
    StandardFormatter, SubaddressTable,
};

pub const PRIMARY: &str = "4AbcPrimaryAddressxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx";
pub const SECOND: &str = "4XyzSecondAddressyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyy";

pub fn init_logging() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init()
        .ok();
}

/// Records grid notifications in arrival order
#[derive(Default)]
pub struct GridRecorder {
    pub notifications: RefCell<Vec<GridNotification>>,
}

impl GridRecorder {
    pub fn take(&self) -> Vec<GridNotification> {
        self.notifications.borrow_mut().drain(..).collect()
    }

    pub fn cells_changed(&self) -> usize {
        self.notifications
            .borrow()
            .iter()
            .filter(|n| matches!(n, GridNotification::CellsChanged { .. }))
            .count()
    }
}

impl GridListener for GridRecorder {
    fn on_grid_notification(&self, notification: &GridNotification) {
        self.notifications.borrow_mut().push(notification.clone());
    }
}

/// Table over an address book, with a recorder connected
pub struct TableFixture {
    pub book: Rc<AddressBook>,
    pub settings: Rc<Settings>,
    pub table: Rc<SubaddressTable>,
    pub recorder: Rc<GridRecorder>,
}

impl TableFixture {
    pub fn new(account: u32, records: Vec<AddressRecord>) -> anyhow::Result<Self> {
        init_logging();

        let book = Rc::new(AddressBook::with_records(account, records)?);
        let settings = Rc::new(Settings::default());
        let store: Rc<dyn AddressRecordStore> = book.clone();
        let table = SubaddressTable::new(
            Some(store),
            settings.clone(),
            Rc::new(StandardFormatter::default()),
        );

        let recorder = Rc::new(GridRecorder::default());
        let weak = Rc::downgrade(&recorder);
        let listener: Weak<dyn GridListener> = weak;
        table.connect(listener);

        Ok(Self {
            book,
            settings,
            table,
            recorder,
        })
    }

    /// Default account with a single primary address
    pub fn primary_only() -> anyhow::Result<Self> {
        Self::new(0, vec![AddressRecord::new(PRIMARY, "")])
    }
}
