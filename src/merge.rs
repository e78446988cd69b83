use ahash::AHashMap;

use crate::table::{LocalTable, Station};

/// All keys of a run after the per-worker tables have been folded together.
#[derive(Debug, Default)]
pub struct GlobalTable {
    stations: AHashMap<Box<[u8]>, Station>,
    collisions: u64,
}

impl GlobalTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds every record of `local` in. Order across tables does not matter.
    pub fn absorb(&mut self, local: &LocalTable) {
        for station in local.iter() {
            match self.stations.get_mut(&station.name) {
                Some(global) => global.combine(station),
                None => {
                    self.stations.insert(station.name.clone(), station.clone());
                }
            }
        }
        self.collisions += local.collisions();
    }

    pub fn get(&self, name: &[u8]) -> Option<&Station> {
        self.stations.get(name)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Probe collisions summed over every absorbed table.
    pub fn collisions(&self) -> u64 {
        self.collisions
    }

    /// Records ordered by the raw bytes of their names.
    pub fn sorted(&self) -> Vec<&Station> {
        let mut stations: Vec<&Station> = self.stations.values().collect();
        stations.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        stations
    }
}

pub fn merge<'a, I>(tables: I) -> GlobalTable
where
    I: IntoIterator<Item = &'a LocalTable>,
{
    let mut global = GlobalTable::new();
    for table in tables {
        global.absorb(table);
    }
    global
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::key_hash;

    fn table_of(rows: &[(&str, i32)]) -> LocalTable {
        let mut table = LocalTable::new(32).unwrap();
        for (name, value) in rows {
            table.upsert(key_hash(name.as_bytes()), name.as_bytes(), *value).unwrap();
        }
        table
    }

    fn snapshot(global: &GlobalTable) -> Vec<Station> {
        global.sorted().into_iter().cloned().collect()
    }

    #[test]
    fn test_combines_same_key() {
        let a = table_of(&[("Paris", 123), ("Lyon", -25)]);
        let b = table_of(&[("Paris", 70), ("Paris", 200)]);
        let global = merge([&a, &b]);

        assert_eq!(global.len(), 2);
        let paris = global.get(b"Paris").unwrap();
        assert_eq!((paris.min, paris.max, paris.sum, paris.count), (70, 200, 393, 3));
    }

    #[test]
    fn test_merge_order_is_irrelevant() {
        let a = table_of(&[("X", 10), ("Y", -40), ("X", 5)]);
        let b = table_of(&[("Y", 99), ("Z", 0), ("X", -1)]);
        assert_eq!(snapshot(&merge([&a, &b])), snapshot(&merge([&b, &a])));
    }

    #[test]
    fn test_merging_empty_table_changes_nothing() {
        let a = table_of(&[("X", 10), ("Y", -40)]);
        let empty = LocalTable::new(32).unwrap();
        let before = snapshot(&merge([&a]));
        let mut global = merge([&a]);
        global.absorb(&empty);
        assert_eq!(snapshot(&global), before);
    }

    #[test]
    fn test_colliding_names_not_merged() {
        let a = table_of(&[("Aa", 10)]);
        let b = table_of(&[("BB", 20)]);
        let global = merge([&a, &b]);
        assert_eq!(global.len(), 2);
        assert_eq!(global.get(b"Aa").unwrap().sum, 10);
        assert_eq!(global.get(b"BB").unwrap().sum, 20);
    }

    #[test]
    fn test_sorted_by_bytes() {
        let a = table_of(&[("b", 1), ("B", 1), ("a", 1), ("Ä", 1)]);
        let global = merge([&a]);
        let names: Vec<&[u8]> = global.sorted().into_iter().map(|s| &s.name[..]).collect();
        assert_eq!(names, vec!["B".as_bytes(), "a".as_bytes(), "b".as_bytes(), "Ä".as_bytes()]);
    }
}
