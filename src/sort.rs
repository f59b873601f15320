use rayon::prelude::*;
use std::cmp::{Ordering, Reverse};
use std::fmt;
use std::str::FromStr;

use crate::record::Record;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    Id,
    FullName,
    Age,
    // Any other record field, compared on its raw value.
    Field(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Err("sort key must not be empty".to_string()),
            "id" => Ok(SortKey::Id),
            "fullName" | "name" | "firstName" => Ok(SortKey::FullName),
            "age" => Ok(SortKey::Age),
            other => Ok(SortKey::Field(other.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Id => write!(f, "id"),
            SortKey::FullName => write!(f, "fullName"),
            SortKey::Age => write!(f, "age"),
            SortKey::Field(name) => write!(f, "{name}"),
        }
    }
}

/// Direction after selecting `key`: only a repeated ascending key flips to descending.
pub fn next_direction(current: Option<&SortState>, key: &SortKey) -> SortDirection {
    match current {
        Some(state) if state.key == *key && state.direction == SortDirection::Ascending => {
            SortDirection::Descending
        }
        _ => SortDirection::Ascending,
    }
}

// Unordered pairs (NaN) count as equal. Missing fields sort before present ones.
fn compare(a: &Record, b: &Record, key: &SortKey) -> Ordering {
    let ordering = match key {
        SortKey::Id => a.id.partial_cmp(&b.id),
        SortKey::Age => a.age.partial_cmp(&b.age),
        SortKey::FullName => Some(name_key(a).cmp(&name_key(b))),
        SortKey::Field(name) => a.field(name).partial_cmp(&b.field(name)),
    };
    ordering.unwrap_or(Ordering::Equal)
}

fn name_key(record: &Record) -> String {
    record.full_name().to_uppercase()
}

/// Returns a newly ordered copy of `records`. The sort is stable.
pub fn sorted(records: &[Record], key: &SortKey, direction: SortDirection) -> Vec<Record> {
    let mut out = records.to_vec();
    match (key, direction) {
        // Names are uppercased once per record instead of once per comparison.
        (SortKey::FullName, SortDirection::Ascending) => out.par_sort_by_cached_key(name_key),
        (SortKey::FullName, SortDirection::Descending) => {
            out.par_sort_by_cached_key(|r| Reverse(name_key(r)))
        }
        (_, SortDirection::Ascending) => out.par_sort_by(|a, b| compare(a, b, key)),
        (_, SortDirection::Descending) => out.par_sort_by(|a, b| compare(b, a, key)),
    }
    out
}
