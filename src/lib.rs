//! Subaddress Table: observable grid over a wallet's receive addresses
//!
//! This crate adapts an externally owned, mutable list of address records
//! to a row/column grid that any presentation layer can render, without
//! tying it to a particular UI toolkit.
//!
//! # Architecture
//!
//! - **Record Store**: owns the address list and announces changes ([`AddressRecordStore`])
//! - **Subaddress Table**: derives every cell from the store on demand and
//!   translates store events into grid notifications ([`SubaddressTable`])
//! - **Sorted View**: stable sort/filter projection for display ([`SortedView`])
//! - **Collaborators**: settings ([`ConfigStore`]) and display hints
//!   ([`DisplayFormatter`]) are injected at construction
//!
//! # Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use subaddress_table::{AddressBook, AddressRecordStore, Settings, StandardFormatter};
//! use subaddress_table::{Role, SubaddressTable, TableModel};
//!
//! let book = Rc::new(AddressBook::new());
//! book.append("4Abc...")?;
//!
//! let store: Rc<dyn AddressRecordStore> = book.clone();
//! let table = SubaddressTable::new(
//!     Some(store),
//!     Rc::new(Settings::from_env()),
//!     Rc::new(StandardFormatter::default()),
//! );
//!
//! let label = table.data(&table.index(0, 2), Role::Display);
//! assert_eq!(label.as_text(), Some("Primary address"));
//! ```

// Public modules
pub mod adapter;
pub mod book;
pub mod config;
pub mod error;
pub mod formatter;
pub mod grid;
pub mod record;
pub mod store;
pub mod view;

mod observers;

// Re-exports for convenience
pub use adapter::SubaddressTable;
pub use book::AddressBook;
pub use config::{ConfigStore, Settings, SHOW_FULL_ADDRESSES};
pub use error::{StorageError, TableError};
pub use formatter::{DisplayFormatter, StandardFormatter};
pub use grid::{
    CellValue, Color, Column, ConnectionId, FontDescriptor, GridListener, GridNotification, Icon,
    IconKind, ItemFlags, ModelIndex, Orientation, Role, TableModel,
};
pub use record::AddressRecord;
pub use store::{AddressRecordStore, StoreEvent, StoreObserver, SubscriptionId};
pub use view::{SortOrder, SortedView};

// Common result type
pub type Result<T> = std::result::Result<T, TableError>;
