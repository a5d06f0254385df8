//! Sorted and filtered projection of the address table
//!
//! Rows are compared by the sort-key role of the chosen column. Equal keys
//! (several pinned rows, for instance) keep ascending source order in both
//! sort directions, so the projection is stable across repaints.
//!
//! The projection is computed once and reused until a setting changes or
//! the table announces a change.

use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::rc::{Rc, Weak};

use crate::adapter::SubaddressTable;
use crate::grid::{
    CellValue, Column, ConnectionId, GridListener, GridNotification, Role, TableModel,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

pub struct SortedView {
    table: Rc<SubaddressTable>,
    sort: Cell<Option<(Column, SortOrder)>>,
    show_hidden: Cell<bool>,
    filter: RefCell<String>,
    projection: RefCell<Option<Vec<usize>>>,
    connection: Cell<Option<ConnectionId>>,
}

impl SortedView {
    /// Unsorted view that hides hidden rows, listening to `table` for changes
    pub fn new(table: Rc<SubaddressTable>) -> Rc<Self> {
        let view = Rc::new(Self {
            table,
            sort: Cell::new(None),
            show_hidden: Cell::new(false),
            filter: RefCell::new(String::new()),
            projection: RefCell::new(None),
            connection: Cell::new(None),
        });

        let weak = Rc::downgrade(&view);
        let listener: Weak<dyn GridListener> = weak;
        view.connection.set(Some(view.table.connect(listener)));
        view
    }

    pub fn table(&self) -> &Rc<SubaddressTable> {
        &self.table
    }

    pub fn set_sort(&self, column: Column, order: SortOrder) {
        self.sort.set(Some((column, order)));
        self.invalidate();
    }

    pub fn clear_sort(&self) {
        self.sort.set(None);
        self.invalidate();
    }

    pub fn set_show_hidden(&self, show: bool) {
        self.show_hidden.set(show);
        self.invalidate();
    }

    /// Case-insensitive match against address and label; empty matches all
    pub fn set_filter(&self, text: &str) {
        *self.filter.borrow_mut() = text.trim().to_lowercase();
        self.invalidate();
    }

    /// Source rows in view order
    pub fn rows(&self) -> Vec<usize> {
        self.ensure_projection();
        self.projection.borrow().clone().unwrap_or_default()
    }

    /// Number of rows passing the filters
    pub fn len(&self) -> usize {
        self.ensure_projection();
        self.projection.borrow().as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Source row shown at `view_row`
    pub fn map_to_source(&self, view_row: usize) -> Option<usize> {
        self.ensure_projection();
        self.projection
            .borrow()
            .as_ref()
            .and_then(|rows| rows.get(view_row).copied())
    }

    fn invalidate(&self) {
        self.projection.borrow_mut().take();
    }

    fn ensure_projection(&self) {
        if self.projection.borrow().is_some() {
            return;
        }
        let rows = self.project();
        *self.projection.borrow_mut() = Some(rows);
    }

    fn project(&self) -> Vec<usize> {
        let filter = self.filter.borrow();
        let mut rows: Vec<usize> = (0..self.table.row_count())
            .filter(|&row| self.accepts(row, &filter))
            .collect();

        if let Some((column, order)) = self.sort.get() {
            let mut keyed: Vec<(usize, CellValue)> = rows
                .iter()
                .map(|&row| {
                    let index = self.table.index(row, column.index());
                    (row, self.table.data(&index, Role::SortKey))
                })
                .collect();

            keyed.sort_by(|(row_a, key_a), (row_b, key_b)| {
                let by_key = compare_keys(key_a, key_b);
                let by_key = match order {
                    SortOrder::Ascending => by_key,
                    SortOrder::Descending => by_key.reverse(),
                };
                by_key.then(row_a.cmp(row_b))
            });
            rows = keyed.into_iter().map(|(row, _)| row).collect();
        }

        rows
    }

    fn accepts(&self, row: usize, filter: &str) -> bool {
        let record = self.table.entry_from_index(&self.table.index(row, 0));
        if record.hidden && !self.show_hidden.get() {
            return false;
        }
        if filter.is_empty() {
            return true;
        }

        let label = self
            .table
            .data(&self.table.index(row, Column::Label.index()), Role::Display)
            .to_string();
        record.address.to_lowercase().contains(filter) || label.to_lowercase().contains(filter)
    }
}

impl GridListener for SortedView {
    fn on_grid_notification(&self, notification: &GridNotification) {
        log::trace!("SortedView: invalidating on {:?}", notification);
        self.invalidate();
    }
}

impl Drop for SortedView {
    fn drop(&mut self) {
        if let Some(id) = self.connection.get() {
            self.table.disconnect(id);
        }
    }
}

/// Order sort keys of the same kind; mismatched kinds fall back to a fixed rank
fn compare_keys(a: &CellValue, b: &CellValue) -> Ordering {
    match (a, b) {
        (CellValue::Int(a), CellValue::Int(b)) => a.cmp(b),
        (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
        (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
        _ => rank(a).cmp(&rank(b)),
    }
}

fn rank(value: &CellValue) -> u8 {
    match value {
        CellValue::Empty => 0,
        CellValue::Bool(_) => 1,
        CellValue::Int(_) => 2,
        CellValue::Text(_) => 3,
        _ => 4,
    }
}
