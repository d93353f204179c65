//! Read/render loop connecting standard input to a listing session.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use listwise::{ListingError, ListingHandle, ListingSnapshot, LoadStatus};

use super::command::{CommandError, HELP, ShellCommand};
use super::output::{ListingRow, write_loading, write_snapshot};

/// Runs the shell until `quit`, end of input, or the session stopping.
///
/// Commands are read line by line from `input` and forwarded to the session.
/// Every published snapshot that changes what is on screen is rendered to
/// `output`; snapshots that only echo typed search text are skipped.
///
/// # Errors
///
/// Returns [`ListingError::Io`] when reading input or writing output fails,
/// and [`ListingError::SessionClosed`] when the session stops unexpectedly.
pub async fn run_shell<R, W, T>(
    handle: ListingHandle<T>,
    input: R,
    output: &mut W,
) -> Result<(), ListingError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    T: ListingRow + Clone + PartialEq,
{
    let mut snapshots = handle.subscribe();
    let mut lines = input.lines();
    let mut screen = Screen::default();

    writeln!(output, "{HELP}").map_err(|e| io_error(&e))?;
    let initial = snapshots.borrow_and_update().clone();
    screen.render(output, initial)?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.map_err(|e| io_error(&e))? else {
                    tracing::debug!("end of shell input");
                    break;
                };
                match line.parse::<ShellCommand>() {
                    Ok(ShellCommand::Quit) => break,
                    Ok(ShellCommand::Help) => {
                        writeln!(output, "{HELP}").map_err(|e| io_error(&e))?;
                    }
                    Ok(ShellCommand::Show) => {
                        screen.force(output, handle.snapshot())?;
                    }
                    Ok(command) => {
                        if let Some(listing_input) = command.into_input() {
                            handle.send(listing_input)?;
                        }
                    }
                    Err(CommandError::Empty) => {}
                    Err(error) => {
                        writeln!(output, "{error}").map_err(|e| io_error(&e))?;
                    }
                }
            }
            changed = snapshots.changed() => {
                if changed.is_err() {
                    return Err(ListingError::SessionClosed);
                }
                let snapshot = snapshots.borrow_and_update().clone();
                screen.render(output, snapshot)?;
            }
        }
    }

    handle.shutdown().await
}

/// Tracks what was last drawn so unchanged snapshots are not redrawn.
struct Screen<T> {
    last: Option<ListingSnapshot<T>>,
}

impl<T> Default for Screen<T> {
    fn default() -> Self {
        Self { last: None }
    }
}

impl<T> Screen<T>
where
    T: ListingRow + PartialEq,
{
    fn render<W: Write>(
        &mut self,
        output: &mut W,
        snapshot: ListingSnapshot<T>,
    ) -> Result<(), ListingError> {
        if snapshot.status == LoadStatus::Idle
            || self
                .last
                .as_ref()
                .is_some_and(|last| shows_same(last, &snapshot))
        {
            return Ok(());
        }
        self.force(output, snapshot)
    }

    fn force<W: Write>(
        &mut self,
        output: &mut W,
        snapshot: ListingSnapshot<T>,
    ) -> Result<(), ListingError> {
        if snapshot.loading() {
            write_loading(output, &snapshot)?;
        } else {
            write_snapshot(output, &snapshot)?;
        }
        self.last = Some(snapshot);
        Ok(())
    }
}

/// Returns true when two snapshots render identically, ignoring raw search.
fn shows_same<T: PartialEq>(left: &ListingSnapshot<T>, right: &ListingSnapshot<T>) -> bool {
    left.status == right.status
        && left.page == right.page
        && left.mode == right.mode
        && left.settled_search == right.settled_search
        && left.error == right.error
        && left.total_count == right.total_count
        && left.items == right.items
}

fn io_error(error: &std::io::Error) -> ListingError {
    ListingError::Io {
        message: error.to_string(),
    }
}
