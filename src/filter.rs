use std::collections::HashSet;
use std::fmt;

use crate::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Gender,
    Country,
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterKind::Gender => write!(f, "Gender"),
            FilterKind::Country => write!(f, "Country"),
        }
    }
}

impl FilterKind {
    fn value_of(self, record: &Record) -> &str {
        match self {
            FilterKind::Gender => &record.gender,
            FilterKind::Country => &record.address.country,
        }
    }
}

/// Two independent exact-match predicates. `None` matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Filters {
    pub gender: Option<String>,
    pub country: Option<String>,
}

impl Filters {
    /// Sets one filter. An empty value clears it.
    pub fn with(&self, kind: FilterKind, value: &str) -> Filters {
        let value = (!value.is_empty()).then(|| value.to_string());
        let mut out = self.clone();
        match kind {
            FilterKind::Gender => out.gender = value,
            FilterKind::Country => out.country = value,
        }
        out
    }

    pub fn get(&self, kind: FilterKind) -> Option<&str> {
        match kind {
            FilterKind::Gender => self.gender.as_deref(),
            FilterKind::Country => self.country.as_deref(),
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        [FilterKind::Gender, FilterKind::Country]
            .into_iter()
            .all(|kind| self.get(kind).is_none_or(|v| kind.value_of(record) == v))
    }

    /// Indices into `records` of every visible record, in record order.
    pub fn apply(&self, records: &[Record]) -> Vec<usize> {
        records
            .iter()
            .enumerate()
            .filter(|(_, r)| self.matches(r))
            .map(|(idx, _)| idx)
            .collect()
    }
}

/// Distinct values of `kind` in order of first appearance.
pub fn distinct_values(records: &[Record], kind: FilterKind) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(|r| kind.value_of(r))
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
