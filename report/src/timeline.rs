use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// Dated counts pivoted into one row per date and one column per series.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct TimeSeriesTable {
    pub series: Vec<String>,
    pub rows: Vec<TimeSeriesRow>,
}

#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct TimeSeriesRow {
    pub date: String,
    /// One count per entry of [`TimeSeriesTable::series`].
    pub counts: Vec<u64>,
}

impl TimeSeriesTable {
    pub fn pivot<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str, u64)>,
    {
        let mut cells: BTreeMap<(&str, &str), u64> = BTreeMap::new();
        let mut dates = BTreeSet::new();
        let mut series = BTreeSet::new();
        for (date, name, count) in points {
            *cells.entry((date, name)).or_default() += count;
            dates.insert(date);
            series.insert(name);
        }

        let rows = dates
            .into_iter()
            .map(|date| TimeSeriesRow {
                date: date.to_string(),
                counts: series
                    .iter()
                    .map(|name| cells.get(&(date, *name)).copied().unwrap_or(0))
                    .collect(),
            })
            .collect();

        Self {
            series: series.into_iter().map(str::to_string).collect(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
