//! Toolkit-independent grid contract
//!
//! A presentation layer renders any [`TableModel`] by asking for the shape,
//! then for each cell's value under a [`Role`]. Models announce structural
//! and content changes through [`GridNotification`]s delivered to registered
//! [`GridListener`]s.

use std::fmt;

/// Fixed columns of the address table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Index = 0,
    Address = 1,
    Label = 2,
    IsUsed = 3,
}

impl Column {
    pub const COUNT: usize = 4;

    pub const ALL: [Column; Column::COUNT] =
        [Column::Index, Column::Address, Column::Label, Column::IsUsed];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Horizontal header title
    pub fn title(self) -> &'static str {
        match self {
            Column::Index => "#",
            Column::Address => "Address",
            Column::Label => "Label",
            Column::IsUsed => "Used",
        }
    }
}

/// Semantic intent of a cell-value query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Display,
    Edit,
    SortKey,
    Decoration,
    Background,
    Font,
    Tooltip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontDescriptor {
    pub family: String,
    pub point_size: Option<u32>,
    pub fixed_pitch: bool,
}

/// Icons the address table can decorate a cell with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconKind {
    Pin,
    HiddenEye,
}

/// Resolved icon resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Icon {
    pub kind: IconKind,
    pub resource: String,
}

/// Value of one cell under one role. `Empty` stands for "no value".
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Int(u64),
    Bool(bool),
    Icon(Icon),
    Color(Color),
    Font(FontDescriptor),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<u64> {
        match self {
            CellValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(text) => write!(f, "{}", text),
            CellValue::Int(value) => write!(f, "{}", value),
            CellValue::Bool(value) => write!(f, "{}", value),
            CellValue::Icon(icon) => write!(f, "{}", icon.resource),
            CellValue::Color(c) => {
                write!(f, "#{:02x}{:02x}{:02x}{:02x}", c.red, c.green, c.blue, c.alpha)
            }
            CellValue::Font(font) => write!(f, "{}", font.family),
        }
    }
}

/// Opaque row/column handle issued to the presentation layer.
///
/// A handle may go stale after a reset; models re-check bounds on every use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelIndex {
    row: usize,
    column: usize,
    valid: bool,
}

impl ModelIndex {
    pub fn new(row: usize, column: usize) -> Self {
        Self {
            row,
            column,
            valid: true,
        }
    }

    pub fn invalid() -> Self {
        Self {
            row: 0,
            column: 0,
            valid: false,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column(&self) -> usize {
        self.column
    }
}

/// Interaction capabilities of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemFlags {
    pub enabled: bool,
    pub selectable: bool,
    pub editable: bool,
}

impl ItemFlags {
    pub const ENABLED: ItemFlags = ItemFlags {
        enabled: true,
        selectable: false,
        editable: false,
    };

    /// Enabled and selectable, not editable
    pub const SELECTABLE: ItemFlags = ItemFlags {
        enabled: true,
        selectable: true,
        editable: false,
    };

    pub fn with_editable(mut self) -> Self {
        self.editable = true;
        self
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }
}

/// Change notifications emitted to the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum GridNotification {
    /// All previously issued handles become invalid
    ResetBegin,
    ResetEnd,
    RowsAboutToBeInserted {
        first: usize,
        last: usize,
    },
    RowsInserted {
        first: usize,
        last: usize,
    },
    CellsChanged {
        top_left: ModelIndex,
        bottom_right: ModelIndex,
        roles: Vec<Role>,
    },
}

pub trait GridListener {
    fn on_grid_notification(&self, notification: &GridNotification);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(pub(crate) u64);

/// Read/write grid interface consumed by a presentation layer.
///
/// None of these calls may fail loudly: invalid input yields
/// [`CellValue::Empty`], `false` or enabled-only flags.
pub trait TableModel {
    fn row_count(&self) -> usize;

    fn column_count(&self) -> usize;

    fn index(&self, row: usize, column: usize) -> ModelIndex {
        if row < self.row_count() && column < self.column_count() {
            ModelIndex::new(row, column)
        } else {
            ModelIndex::invalid()
        }
    }

    fn data(&self, index: &ModelIndex, role: Role) -> CellValue;

    fn header_data(&self, section: usize, orientation: Orientation, role: Role) -> CellValue;

    fn set_data(&self, index: &ModelIndex, value: &CellValue, role: Role) -> bool;

    fn flags(&self, index: &ModelIndex) -> ItemFlags;
}
