use std::sync::Arc;
use std::thread;
use std::time::Instant;

use crossbeam_channel::bounded;
use tracing::{info, warn};

use crate::chunker::{cut_file, Chunk};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::merge::{merge, GlobalTable};
use crate::table::LocalTable;
use crate::worker;

/// Runs the whole pipeline over `buffer`: chunker on the calling thread,
/// `config.workers` parsing threads behind a bounded queue, then the merge.
///
/// The buffer is shared read-only with every worker through the `Arc`, so a
/// memory map and an in-memory `Vec<u8>` work the same way. The first worker
/// error wins; the other workers still drain the queue before the call
/// returns.
pub fn aggregate<B>(buffer: Arc<B>, config: &Config) -> Result<GlobalTable>
where
    B: AsRef<[u8]> + Send + Sync + ?Sized + 'static,
{
    config.validate()?;
    let start = Instant::now();

    let (tx, rx) = bounded::<Chunk>(config.queue_capacity);
    let mut handles = Vec::with_capacity(config.workers);
    for id in 0..config.workers {
        let table = LocalTable::new(config.table_slots)?;
        let shared = Arc::clone(&buffer);
        let rx = rx.clone();
        handles.push(thread::spawn(move || {
            let data = <B as AsRef<[u8]>>::as_ref(&shared);
            worker::run(id, data, rx, table)
        }));
    }
    drop(rx);

    let data = <B as AsRef<[u8]>>::as_ref(&buffer);
    let chunks = cut_file(data, config.piece_size, tx);

    let mut tables = Vec::with_capacity(handles.len());
    let mut failure = None;
    for handle in handles {
        match handle.join() {
            Ok(Ok(table)) => tables.push(table),
            Ok(Err(e)) => {
                warn!(error = %e, "worker failed");
                failure.get_or_insert(e);
            }
            Err(_) => {
                failure.get_or_insert(Error::WorkerPanicked);
            }
        }
    }
    if let Some(e) = failure {
        return Err(e);
    }

    let global = merge(&tables);
    info!(
        bytes = data.len(),
        chunks,
        workers = config.workers,
        keys = global.len(),
        collisions = global.collisions(),
        elapsed = ?start.elapsed(),
        "aggregation complete"
    );
    Ok(global)
}
