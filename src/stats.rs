use crate::models::{Bounds, Mode, StatTable, StatValue};
use log::debug;

/// Current statistics table plus the active mode and its cached bounds.
#[derive(Debug, Clone, Default)]
pub struct StatsStore {
    table: StatTable,
    mode: Mode,
    bounds: Bounds,
}

impl StatsStore {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Replace the whole table and recompute bounds for the current mode.
    pub fn set_stats(&mut self, table: StatTable) {
        self.table = table;
        self.bounds = self.compute_bounds();
    }

    /// Switch the active mode and recompute bounds.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.bounds = self.compute_bounds();
    }

    /// Scan every record defining the active mode; `(0, 0)` when none does.
    pub fn compute_bounds(&self) -> Bounds {
        let bounds = bounds_of(self.table.values(self.mode).map(StatValue::magnitude));
        debug!(
            "bounds for mode {} over {} records: min={} max={}",
            self.mode,
            self.table.len(),
            bounds.min,
            bounds.max
        );
        bounds
    }

    pub fn table(&self) -> &StatTable {
        &self.table
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Value of the active mode for `element_id`, if defined.
    pub fn value(&self, element_id: &str) -> Option<&StatValue> {
        self.table.value(element_id, self.mode)
    }
}

fn bounds_of(values: impl Iterator<Item = f64>) -> Bounds {
    values
        .fold(None, |acc: Option<Bounds>, v| match acc {
            None => Some(Bounds::new(v, v)),
            Some(b) => Some(Bounds::new(b.min.min(v), b.max.max(v))),
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StatRecord;

    fn table() -> StatTable {
        [
            ("A", StatRecord::new().with(Mode::Count, 5).with(Mode::TimeMinutes, StatValue::Duration(30))),
            ("B", StatRecord::new().with(Mode::Count, 15)),
            ("C", StatRecord::new().with(Mode::TimeMinutes, StatValue::Duration(1500))),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn bounds_follow_stats_and_mode() {
        let mut store = StatsStore::new(Mode::Count);
        assert_eq!(store.bounds(), Bounds::new(0.0, 0.0));

        store.set_stats(table());
        assert_eq!(store.bounds(), Bounds::new(5.0, 15.0));

        store.set_mode(Mode::TimeMinutes);
        assert_eq!(store.bounds(), Bounds::new(30.0, 1500.0));

        store.set_mode(Mode::AvgMinutes);
        assert_eq!(store.bounds(), Bounds::new(0.0, 0.0));
    }

    #[test]
    fn value_uses_active_mode() {
        let mut store = StatsStore::new(Mode::Count);
        store.set_stats(table());
        assert_eq!(store.value("A"), Some(&StatValue::Number(5.0)));
        assert_eq!(store.value("C"), None);
        assert_eq!(store.value("missing"), None);
    }

    #[test]
    fn single_value_collapses_bounds() {
        let mut store = StatsStore::new(Mode::Count);
        store.set_stats([("X", StatRecord::new().with(Mode::Count, -3.5))].into_iter().collect());
        assert_eq!(store.bounds(), Bounds::new(-3.5, -3.5));
    }
}
