use std::fs::File;
use std::path::Path;

use memmap2::Mmap;
use tracing::debug;

use crate::error::{Error, Result};

/// Opens `path` read-only and maps the whole file into memory.
pub fn open_mapped(path: &Path) -> Result<Mmap> {
    let unavailable = |source| Error::InputUnavailable {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(unavailable)?;
    let len = file.metadata().map_err(unavailable)?.len();
    // SAFETY: the map is only read, and the file is assumed not to be
    // modified while it is mapped.
    let mmap = unsafe { Mmap::map(&file) }.map_err(unavailable)?;
    debug!(path = %path.display(), len, "input mapped");
    Ok(mmap)
}
