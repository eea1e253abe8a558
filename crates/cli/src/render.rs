//! Plain-text tables and paging for listings.

use std::io::{self, Write};

use rust_decimal::Decimal;
use shopdesk_core::{CurrencyCode, Paginator, Price, Record, Related};
use tracing::warn;

/// Rows shown per page when a command does not ask for another size.
pub const DEFAULT_PAGE_SIZE: usize = Paginator::DEFAULT_PAGE_SIZE;

/// Write `rows` under `headers` with each column padded to its widest cell.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn table(out: &mut impl Write, headers: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header: Vec<String> = headers.iter().map(|h| (*h).to_owned()).collect();
    write_row(out, &header, &widths)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_row(out, &rule, &widths)?;
    for row in rows {
        write_row(out, row, &widths)?;
    }
    Ok(())
}

fn write_row(out: &mut impl Write, cells: &[String], widths: &[usize]) -> io::Result<()> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{}", line.trim_end())
}

/// Render one page of `items` as a table followed by a position footer.
///
/// A page outside the collection is not an error: page one is shown
/// instead and a warning is logged.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn paged<T>(
    out: &mut impl Write,
    items: &[T],
    page: usize,
    page_size: usize,
    headers: &[&str],
    row: impl Fn(&T) -> Vec<String>,
) -> io::Result<()> {
    let mut pager = Paginator::new(page_size);
    let total = pager.total_pages(items.len());
    if page != 1 && !pager.go_to(page, items.len()) {
        warn!(page, total, "page out of range, showing page 1");
    }

    let window = pager.window(items);
    let rows: Vec<Vec<String>> = window.iter().map(row).collect();
    table(out, headers, &rows)?;

    if window.is_empty() {
        writeln!(out, "(none)")
    } else {
        let first = pager.first_position(items.len());
        writeln!(
            out,
            "page {}/{total}, {first}-{} of {}",
            pager.page(),
            first + window.len() - 1,
            items.len()
        )
    }
}

/// Name of a related record when embedded, else its id.
pub fn related<I, T>(related: &Related<I, T>, name: impl Fn(&T) -> &str) -> String
where
    I: std::fmt::Display,
    T: Record<Id = I>,
{
    related
        .record()
        .map_or_else(|| related.id().to_string(), |record| name(record).to_owned())
}

/// Amount in the store currency with two decimal places.
#[must_use]
pub fn money(amount: Decimal) -> String {
    Price::new(amount, CurrencyCode::default()).to_string()
}

/// `-` for a missing optional cell.
pub fn opt(value: Option<impl ToString>) -> String {
    value.map_or_else(|| "-".to_owned(), |v| v.to_string())
}
