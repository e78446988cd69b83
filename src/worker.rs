use crossbeam_channel::Receiver;
use memchr::memchr_iter;
use tracing::debug;

use crate::chunker::Chunk;
use crate::error::{Error, Result};
use crate::parser::parse_line;
use crate::table::LocalTable;

/// Parses every line of `data[chunk]` into `table`.
///
/// Empty lines are skipped. A final line without a terminator is still
/// parsed, so the last chunk of a file that lacks a trailing newline is not
/// lost.
pub fn process_chunk(data: &[u8], chunk: Chunk, table: &mut LocalTable) -> Result<usize> {
    debug_assert!(!chunk.is_empty());
    let bytes = &data[chunk.start..chunk.end];
    let mut lines = 0;
    let mut inx = 0;
    for nl in memchr_iter(b'\n', bytes) {
        lines += process_line(&bytes[inx..nl], chunk.start + inx, table)?;
        inx = nl + 1;
    }
    if inx < bytes.len() {
        lines += process_line(&bytes[inx..], chunk.start + inx, table)?;
    }
    Ok(lines)
}

#[inline(always)]
fn process_line(line: &[u8], offset: usize, table: &mut LocalTable) -> Result<usize> {
    if line.is_empty() {
        return Ok(0);
    }
    let parsed = parse_line(line).map_err(|reason| Error::MalformedRecord { offset, reason })?;
    table.upsert(parsed.hash, parsed.key, parsed.value)?;
    Ok(1)
}

/// Drains the queue until it is closed and empty, folding every chunk into
/// `table`. The first error stops this worker and is handed back.
pub fn run(
    id: usize,
    data: &[u8],
    rx: Receiver<Chunk>,
    mut table: LocalTable,
) -> Result<LocalTable> {
    let mut chunks = 0;
    let mut lines = 0;
    for chunk in rx {
        lines += process_chunk(data, chunk, &mut table)?;
        chunks += 1;
    }
    debug!(
        worker = id,
        chunks,
        lines,
        keys = table.len(),
        collisions = table.collisions(),
        "worker finished"
    );
    Ok(table)
}
