//! Address record data model

use serde::{Deserialize, Serialize};

/// One receive address as owned by the record store.
///
/// The position inside the owning sequence is implicit; row 0 is the
/// primary (or change) address of the account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    pub address: String,
    pub label: String,
    pub used: bool,
    pub pinned: bool,
    pub hidden: bool,
}

impl AddressRecord {
    pub fn new(address: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            label: label.into(),
            ..Default::default()
        }
    }

    /// Placeholder handed out for lookups that do not resolve to a row.
    ///
    /// Stores never hold a record with an empty address, so this value can
    /// always be told apart from a real entry.
    pub fn sentinel() -> Self {
        Self::default()
    }

    pub fn is_sentinel(&self) -> bool {
        self.address.is_empty()
            && self.label.is_empty()
            && !self.used
            && !self.pinned
            && !self.hidden
    }

    pub fn with_used(mut self, used: bool) -> Self {
        self.used = used;
        self
    }

    pub fn with_pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_is_recognisable() {
        let sentinel = AddressRecord::sentinel();
        assert!(sentinel.is_sentinel());
        assert!(sentinel.address.is_empty());
        assert!(!sentinel.used && !sentinel.pinned && !sentinel.hidden);
    }

    #[test]
    fn test_real_record_is_not_sentinel() {
        let record = AddressRecord::new("4AbcDefGhi", "");
        assert!(!record.is_sentinel());

        // Flags alone make a record distinct as well
        let flagged = AddressRecord::sentinel().with_used(true);
        assert!(!flagged.is_sentinel());
    }
}
