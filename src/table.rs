use crate::error::{Error, Result};

/// Running statistics of one key. Values are readings times ten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub hash: u64,
    pub name: Box<[u8]>,
    pub min: i32,
    pub max: i32,
    pub sum: i64,
    pub count: u64,
}

impl Station {
    pub fn new(hash: u64, name: &[u8], value: i32) -> Self {
        Station {
            hash,
            name: name.into(),
            min: value,
            max: value,
            sum: value as i64,
            count: 1,
        }
    }

    #[inline(always)]
    pub fn update(&mut self, value: i32) {
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
        self.sum += value as i64;
        self.count += 1;
    }

    pub fn combine(&mut self, other: &Station) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.sum += other.sum;
        self.count += other.count;
    }
}

enum Probe {
    Found(usize),
    Vacant(usize, u64),
    Full,
}

/// Fixed-capacity open-addressing table owned by a single worker.
///
/// Slots are addressed by `hash & (capacity - 1)` and collisions are resolved
/// by linear probing that wraps around once. A slot only matches when both
/// the hash and the key bytes are equal, so distinct keys with the same hash
/// keep separate statistics. The table never grows: inserting a new key into
/// a full table fails with [`Error::CapacityExhausted`].
pub struct LocalTable {
    slots: Vec<Option<Station>>,
    mask: usize,
    len: usize,
    collisions: u64,
}

impl LocalTable {
    pub fn new(capacity: usize) -> Result<Self> {
        if !capacity.is_power_of_two() {
            return Err(Error::InvalidConfig("table slots must be a power of two"));
        }
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Ok(LocalTable {
            slots,
            mask: capacity - 1,
            len: 0,
            collisions: 0,
        })
    }

    #[inline]
    fn probe(&self, hash: u64, key: &[u8]) -> Probe {
        let home = hash as usize & self.mask;
        for step in 0..self.slots.len() {
            let idx = (home + step) & self.mask;
            match &self.slots[idx] {
                None => return Probe::Vacant(idx, step as u64),
                Some(station) if station.hash == hash && &*station.name == key => {
                    return Probe::Found(idx)
                }
                Some(_) => {}
            }
        }
        Probe::Full
    }

    pub fn get(&self, hash: u64, key: &[u8]) -> Option<&Station> {
        match self.probe(hash, key) {
            Probe::Found(idx) => self.slots[idx].as_ref(),
            _ => None,
        }
    }

    /// Stores `station`, replacing any record already held for the same key.
    pub fn set(&mut self, station: Station) -> Result<()> {
        match self.probe(station.hash, &station.name) {
            Probe::Found(idx) => {
                self.slots[idx] = Some(station);
                Ok(())
            }
            Probe::Vacant(idx, steps) => {
                self.collisions += steps;
                self.slots[idx] = Some(station);
                self.len += 1;
                Ok(())
            }
            Probe::Full => Err(Error::CapacityExhausted {
                slots: self.slots.len(),
            }),
        }
    }

    /// Folds one reading into the key's record, creating it on first sight.
    #[inline]
    pub fn upsert(&mut self, hash: u64, key: &[u8], value: i32) -> Result<()> {
        match self.probe(hash, key) {
            Probe::Found(idx) => {
                if let Some(station) = self.slots[idx].as_mut() {
                    station.update(value);
                }
                Ok(())
            }
            Probe::Vacant(idx, steps) => {
                self.collisions += steps;
                self.slots[idx] = Some(Station::new(hash, key, value));
                self.len += 1;
                Ok(())
            }
            Probe::Full => Err(Error::CapacityExhausted {
                slots: self.slots.len(),
            }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.slots.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Probe steps taken past the home slot when inserting new keys.
    pub fn collisions(&self) -> u64 {
        self.collisions
    }
}
