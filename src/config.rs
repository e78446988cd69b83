use crate::error::{Error, Result};

const KB: usize = 1024;
const MB: usize = 1024 * KB;

pub const DEFAULT_PIECE_SIZE: usize = 4 * MB;
pub const DEFAULT_QUEUE_CAPACITY: usize = 4000;
pub const DEFAULT_TABLE_SLOTS: usize = 4096;

/// Tuning knobs for one aggregation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Target chunk length in bytes before extending to the next line end.
    pub piece_size: usize,
    /// Chunks that may sit in the work queue before the chunker blocks.
    pub queue_capacity: usize,
    /// Slot count of every worker's local table. Must be a power of two.
    pub table_slots: usize,
    /// Parsing threads, each owning one local table.
    pub workers: usize,
}

impl Default for Config {
    fn default() -> Self {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Config {
            piece_size: DEFAULT_PIECE_SIZE,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            table_slots: DEFAULT_TABLE_SLOTS,
            workers,
        }
    }
}

impl Config {
    pub fn with_piece_size(mut self, piece_size: usize) -> Self {
        self.piece_size = piece_size;
        self
    }

    pub fn with_queue_capacity(mut self, queue_capacity: usize) -> Self {
        self.queue_capacity = queue_capacity;
        self
    }

    pub fn with_table_slots(mut self, table_slots: usize) -> Self {
        self.table_slots = table_slots;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.piece_size == 0 {
            return Err(Error::InvalidConfig("piece size must be non-zero"));
        }
        if self.queue_capacity == 0 {
            return Err(Error::InvalidConfig("queue capacity must be non-zero"));
        }
        if self.workers == 0 {
            return Err(Error::InvalidConfig("at least one worker is required"));
        }
        if !self.table_slots.is_power_of_two() {
            return Err(Error::InvalidConfig("table slots must be a power of two"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = Config::default();
        assert_eq!(config.piece_size, 4 * 1024 * 1024);
        assert_eq!(config.queue_capacity, 4000);
        assert_eq!(config.table_slots, 4096);
        assert!(config.workers >= 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_power_of_two_slots() {
        let config = Config::default().with_table_slots(1000);
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_zero_values() {
        assert!(Config::default().with_table_slots(0).validate().is_err());
        assert!(Config::default().with_piece_size(0).validate().is_err());
        assert!(Config::default().with_queue_capacity(0).validate().is_err());
        assert!(Config::default().with_workers(0).validate().is_err());
    }
}
