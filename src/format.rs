use crate::record::{Record, display_number};
use crate::sort::{SortDirection, SortKey, SortState};

pub const EMPTY_STATE_MESSAGE: &str = "No Data Found";
pub const ALL_OPTION: &str = "All";

/// Uppercased first character of every whitespace separated word.
pub fn get_initials(s: &str) -> String {
    s.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// One table row, column by column: ID, Image, Full Name, Age, Designation, Location.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub id: String,
    pub image: String,
    pub full_name: String,
    pub age: String,
    pub designation: String,
    pub location: String,
}

impl RowView {
    pub fn from_record(record: &Record) -> Self {
        Self {
            id: display_number(record.id),
            image: record.image.clone(),
            full_name: record.full_name(),
            age: display_number(record.age),
            designation: record.company.title.clone(),
            location: format!(
                "{}, {}",
                record.address.state,
                get_initials(&record.address.country)
            ),
        }
    }

    pub fn cells(&self) -> [&str; 6] {
        [
            self.id.as_str(),
            self.image.as_str(),
            self.full_name.as_str(),
            self.age.as_str(),
            self.designation.as_str(),
            self.location.as_str(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderView {
    pub title: &'static str,
    pub sort_key: Option<SortKey>,
    pub direction: Option<SortDirection>,
}

impl HeaderView {
    pub fn label(&self) -> String {
        match (&self.sort_key, self.direction) {
            (Some(_), Some(SortDirection::Ascending)) => format!("{} ▲", self.title),
            (Some(_), Some(SortDirection::Descending)) => format!("{} ▼", self.title),
            (Some(_), None) => format!("{} ⇅", self.title),
            (None, _) => self.title.to_string(),
        }
    }
}

pub fn headers(sort: Option<&SortState>) -> Vec<HeaderView> {
    let column = |title, key: Option<SortKey>| {
        let direction = match (&key, sort) {
            (Some(k), Some(state)) if state.key == *k => Some(state.direction),
            _ => None,
        };
        HeaderView {
            title,
            sort_key: key,
            direction,
        }
    };
    vec![
        column("ID", Some(SortKey::Id)),
        column("Image", None),
        column("Full Name", Some(SortKey::FullName)),
        column("Age", Some(SortKey::Age)),
        column("Designation", None),
        column("Location", None),
    ]
}
