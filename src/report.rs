use std::fmt::{self, Display};
use std::io::Write;
use std::time::Duration;

use crate::error::Result;
use crate::merge::GlobalTable;
use crate::table::Station;

const SCALE: f64 = 0.1;

impl Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // the mean only ever exists as a float here, never while accumulating
        let mean = self.sum as f64 / self.count as f64 * SCALE;
        write!(
            f,
            "{}={:.1}/{:.1}/{:.1}",
            String::from_utf8_lossy(&self.name),
            self.min as f64 * SCALE,
            mean,
            self.max as f64 * SCALE
        )
    }
}

/// `{name=min/mean/max, ...}` sorted by name.
pub struct Report<'a>(pub &'a GlobalTable);

impl Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        let mut is_first = true;
        for station in self.0.sorted() {
            if is_first {
                is_first = false;
                write!(f, "{}", station)?;
            } else {
                write!(f, ", {}", station)?;
            }
        }
        write!(f, "}}")
    }
}

/// Writes the report without a trailing newline.
pub fn write_report<W: Write>(global: &GlobalTable, out: &mut W) -> Result<()> {
    write!(out, "{}", Report(global))?;
    Ok(())
}

/// Writes the report line followed by the elapsed time and collision count.
pub fn write_summary<W: Write>(
    global: &GlobalTable,
    elapsed: Duration,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "{}", Report(global))?;
    writeln!(out, "Elapsed time: {:?}", elapsed)?;
    writeln!(out, "Collision count: {}", global.collisions())?;
    Ok(())
}

pub fn render(global: &GlobalTable) -> String {
    Report(global).to_string()
}
