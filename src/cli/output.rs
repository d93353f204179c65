//! Snapshot rendering for the listing shell.

use std::io::{self, Write};

use listwise::{Contact, Job, ListingError, ListingSnapshot, LoadStatus, ViewMode};

use super::text_width::{fit_cell, truncate_with_ellipsis};

/// Widest a grid card line may grow before it is truncated.
const CARD_WIDTH: usize = 72;

/// An item the shell knows how to render.
pub trait ListingRow {
    /// Column headers and widths for the table view.
    fn columns() -> &'static [(&'static str, usize)];

    /// Cell text for the table view, one entry per column.
    fn cells(&self) -> Vec<String>;

    /// Single-line summary for the grid view.
    fn card(&self) -> String;
}

impl ListingRow for Job {
    fn columns() -> &'static [(&'static str, usize)] {
        &[
            ("Title", 28),
            ("Company", 18),
            ("Location", 16),
            ("Salary", 16),
            ("Type", 10),
            ("Posted", 10),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.company.clone(),
            self.location.clone(),
            self.salary.clone(),
            self.employment_type.clone(),
            self.posted_date.format("%Y-%m-%d").to_string(),
        ]
    }

    fn card(&self) -> String {
        format!(
            "{} at {} ({}, {})",
            self.title, self.company, self.location, self.salary
        )
    }
}

impl ListingRow for Contact {
    fn columns() -> &'static [(&'static str, usize)] {
        &[("Name", 24), ("Email", 32), ("Status", 8)]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            self.status.label().to_owned(),
        ]
    }

    fn card(&self) -> String {
        format!("{} <{}> [{}]", self.name, self.email, self.status.label())
    }
}

/// Writes a rendering of `snapshot` to the given writer.
///
/// # Errors
///
/// Returns [`ListingError::Io`] when the writer fails.
pub fn write_snapshot<W, T>(
    writer: &mut W,
    snapshot: &ListingSnapshot<T>,
) -> Result<(), ListingError>
where
    W: Write,
    T: ListingRow,
{
    write_header(writer, snapshot).map_err(|e| io_error(&e))?;

    if snapshot.items.is_empty() && snapshot.status == LoadStatus::Loaded {
        writeln!(writer, "  No results.").map_err(|e| io_error(&e))?;
    } else {
        match snapshot.mode {
            ViewMode::Paged => write_table(writer, &snapshot.items),
            ViewMode::Accumulating => write_cards(writer, &snapshot.items),
        }
        .map_err(|e| io_error(&e))?;
    }

    write_footer(writer, snapshot).map_err(|e| io_error(&e))
}

/// Writes a one-line status for a snapshot with a fetch outstanding.
///
/// # Errors
///
/// Returns [`ListingError::Io`] when the writer fails.
pub fn write_loading<W: Write, T>(
    writer: &mut W,
    snapshot: &ListingSnapshot<T>,
) -> Result<(), ListingError> {
    writeln!(
        writer,
        "Loading page {} for \"{}\"...",
        snapshot.page, snapshot.settled_search
    )
    .map_err(|e| io_error(&e))
}

fn write_header<W: Write, T>(writer: &mut W, snapshot: &ListingSnapshot<T>) -> io::Result<()> {
    let position = match snapshot.mode {
        ViewMode::Paged => format!(
            "page {} of {}",
            snapshot.page,
            snapshot.total_pages.max(1)
        ),
        ViewMode::Accumulating => format!("{} loaded", snapshot.items.len()),
    };
    writeln!(
        writer,
        "[{}] search: \"{}\" | {} results | {position}",
        snapshot.mode, snapshot.settled_search, snapshot.total_count
    )
}

fn write_table<W: Write, T: ListingRow>(writer: &mut W, items: &[T]) -> io::Result<()> {
    let columns = T::columns();
    let header: Vec<String> = columns
        .iter()
        .map(|(title, width)| fit_cell(title, *width))
        .collect();
    writeln!(writer, "  {}", header.join(" | ").trim_end())?;

    let rule_width = columns.iter().map(|(_, width)| width + 3).sum::<usize>();
    writeln!(writer, "  {}", "-".repeat(rule_width.saturating_sub(3)))?;

    for item in items {
        let row: Vec<String> = item
            .cells()
            .iter()
            .zip(columns)
            .map(|(cell, (_, width))| fit_cell(cell, *width))
            .collect();
        writeln!(writer, "  {}", row.join(" | ").trim_end())?;
    }
    Ok(())
}

fn write_cards<W: Write, T: ListingRow>(writer: &mut W, items: &[T]) -> io::Result<()> {
    for (index, item) in items.iter().enumerate() {
        writeln!(
            writer,
            "  {:>3}. {}",
            index + 1,
            truncate_with_ellipsis(&item.card(), CARD_WIDTH)
        )?;
    }
    Ok(())
}

fn write_footer<W: Write, T>(writer: &mut W, snapshot: &ListingSnapshot<T>) -> io::Result<()> {
    if let Some((first, last)) = snapshot.visible_range {
        writeln!(
            writer,
            "Showing {first} to {last} of {}",
            snapshot.total_count
        )?;
    }

    match snapshot.mode {
        ViewMode::Paged => {
            let mut hints = Vec::new();
            if snapshot.can_prev {
                hints.push("'prev'");
            }
            if snapshot.can_next {
                hints.push("'next'");
            }
            if !hints.is_empty() {
                writeln!(writer, "More pages: {}", hints.join(" or "))?;
            }
        }
        ViewMode::Accumulating => {
            if snapshot.has_more && !snapshot.items.is_empty() {
                writeln!(writer, "More available: 'more'")?;
            }
        }
    }

    if let Some(error) = &snapshot.error {
        writeln!(writer, "Error: {error} ('retry' to try again)")?;
    }
    Ok(())
}

fn io_error(error: &io::Error) -> ListingError {
    ListingError::Io {
        message: error.to_string(),
    }
}
