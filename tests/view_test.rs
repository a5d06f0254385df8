//! Sorted View Integration Tests
//!
//! Validates ordering, stable tie-breaking among pinned rows and the
//! hidden/text filters of SortedView.
//!
//! Run with: cargo test --test view_test -- --nocapture

mod common;

use common::TableFixture;
use subaddress_table::{AddressRecord, Column, Role, SortOrder, SortedView, TableModel};

fn fixture() -> anyhow::Result<TableFixture> {
    TableFixture::new(
        0,
        vec![
            AddressRecord::new("4Primary", ""),
            AddressRecord::new("4Bravo", "rent"),
            AddressRecord::new("4Charlie", "exchange").with_pinned(true),
            AddressRecord::new("4Delta", "old").with_hidden(true),
            AddressRecord::new("4Echo", "Exchange deposit").with_pinned(true),
        ],
    )
}

#[test]
fn test_unsorted_view_hides_hidden_rows() -> anyhow::Result<()> {
    let fixture = fixture()?;
    let view = SortedView::new(fixture.table.clone());

    assert_eq!(view.rows(), vec![0, 1, 2, 4]);

    view.set_show_hidden(true);
    assert_eq!(view.rows(), vec![0, 1, 2, 3, 4]);
    Ok(())
}

#[test]
fn test_pinned_rows_first_in_source_order() -> anyhow::Result<()> {
    let fixture = fixture()?;
    let view = SortedView::new(fixture.table.clone());
    view.set_sort(Column::Index, SortOrder::Ascending);

    // Both pinned rows share key 0 and keep their relative order
    assert_eq!(view.rows(), vec![2, 4, 0, 1]);
    assert_eq!(view.map_to_source(0), Some(2));
    assert_eq!(view.map_to_source(9), None);

    view.set_sort(Column::Index, SortOrder::Descending);
    assert_eq!(view.rows(), vec![1, 0, 2, 4]);
    Ok(())
}

#[test]
fn test_sort_by_address_uses_full_text() -> anyhow::Result<()> {
    let fixture = fixture()?;
    let view = SortedView::new(fixture.table.clone());
    view.set_sort(Column::Address, SortOrder::Ascending);

    assert_eq!(view.rows(), vec![1, 2, 4, 0]);

    view.clear_sort();
    assert_eq!(view.rows(), vec![0, 1, 2, 4]);
    Ok(())
}

#[test]
fn test_filter_matches_label_and_address() -> anyhow::Result<()> {
    let fixture = fixture()?;
    let view = SortedView::new(fixture.table.clone());

    view.set_filter("EXCHANGE");
    assert_eq!(view.rows(), vec![2, 4]);

    view.set_filter("bravo");
    assert_eq!(view.rows(), vec![1]);

    // Row 0 is found by its displayed label
    view.set_filter("primary address");
    assert_eq!(view.rows(), vec![0]);

    view.set_filter("  ");
    assert_eq!(view.rows().len(), 4);
    Ok(())
}

#[test]
fn test_view_follows_store_changes() -> anyhow::Result<()> {
    let fixture = fixture()?;
    let view = SortedView::new(fixture.table.clone());
    view.set_sort(Column::Index, SortOrder::Ascending);

    let row = fixture.book.append("4Foxtrot")?;
    fixture.book.set_pinned(row, true)?;
    fixture.book.set_hidden(3, false)?;

    assert_eq!(view.rows(), vec![2, 4, 5, 0, 1, 3]);
    assert_eq!(view.table().row_count(), 6);
    Ok(())
}

#[test]
fn test_cached_projection_refreshes_on_changes() -> anyhow::Result<()> {
    let fixture = fixture()?;
    let view = SortedView::new(fixture.table.clone());
    view.set_sort(Column::Index, SortOrder::Ascending);

    assert_eq!(view.rows(), vec![2, 4, 0, 1]);
    assert_eq!(view.len(), 4);
    assert_eq!(view.map_to_source(3), Some(1));

    // Store change reaches the view through the table's notifications
    fixture.book.set_pinned(1, true)?;
    assert_eq!(view.rows(), vec![1, 2, 4, 0]);

    // Label edit through the grid changes what the filter matches
    let label_cell = fixture.table.index(0, Column::Label.index());
    assert!(!fixture.table.set_data(&label_cell, &"rent".into(), Role::Edit));
    let label_cell = fixture.table.index(4, Column::Label.index());
    assert!(fixture.table.set_data(&label_cell, &"rent too".into(), Role::Edit));
    view.set_filter("rent");
    assert_eq!(view.rows(), vec![1, 4]);

    view.set_show_hidden(true);
    view.set_filter("");
    assert_eq!(view.len(), 5);

    fixture.book.refresh(1, vec![AddressRecord::new("8Change", "")])?;
    assert_eq!(view.rows(), vec![0]);
    assert_eq!(view.map_to_source(1), None);
    Ok(())
}

#[test]
fn test_dropped_view_disconnects() -> anyhow::Result<()> {
    let fixture = fixture()?;
    let view = SortedView::new(fixture.table.clone());
    assert_eq!(view.len(), 4);
    assert_eq!(fixture.table.listener_count(), 2);
    drop(view);
    assert_eq!(fixture.table.listener_count(), 1);

    fixture.book.append("4Golf")?;
    assert_eq!(fixture.recorder.take().len(), 2);
    Ok(())
}
