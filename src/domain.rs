use derive_setters::Setters;
use std::io::Error;

use crate::filter::FilterKind;
use crate::loader::DataSource;
use crate::record::Record;
use crate::sort::SortKey;

pub const DEFAULT_SOURCE: &str = "http://localhost:5000/users";
pub const DEFAULT_PAGE_SIZE: usize = 10;

pub const HELP_TEXT: &str = "\
Sorting
  i        sort by ID
  n        sort by Full Name
  a        sort by Age
           (same key again toggles ascending / descending)

Filtering
  g        open the Gender menu
  c        open the Country menu
  Up/Down  move within a menu (k/j)
  Enter    apply the selected entry (All clears the filter)
  Esc      close the menu

Pages
  Left/h   previous page
  Right/l  next page

  ?        this help
  q        quit";

#[derive(Debug)]
pub enum ETError {
    IoError(Error),
    HttpError(reqwest::Error),
    DecodeError(serde_json::Error),
    InvalidConfig(String),
}

impl From<Error> for ETError {
    fn from(err: Error) -> Self {
        ETError::IoError(err)
    }
}

impl From<reqwest::Error> for ETError {
    fn from(err: reqwest::Error) -> Self {
        ETError::HttpError(err)
    }
}

impl From<serde_json::Error> for ETError {
    fn from(err: serde_json::Error) -> Self {
        ETError::DecodeError(err)
    }
}

#[derive(Debug)]
pub enum Message {
    Quit,
    Help,
    Exit,
    Enter,
    MoveUp,
    MoveDown,
    SortBy(SortKey),
    OpenMenu(FilterKind),
    PreviousPage,
    NextPage,
    Loaded(Vec<Record>),
    LoadFailed(String),
}

#[derive(Debug, Clone, Setters)]
#[setters(prefix = "with_")]
pub struct ETConfig {
    pub source: DataSource,
    pub page_size: usize,
    #[setters(strip_option)]
    pub initial_sort: Option<SortKey>,
    pub event_poll_time: u64,
}

impl Default for ETConfig {
    fn default() -> Self {
        Self {
            source: DataSource::Url(DEFAULT_SOURCE.to_string()),
            page_size: DEFAULT_PAGE_SIZE,
            initial_sort: None,
            event_poll_time: 100,
        }
    }
}

impl ETConfig {
    pub fn validate(self) -> Result<Self, ETError> {
        if self.page_size == 0 {
            return Err(ETError::InvalidConfig("page size must be at least 1".into()));
        }
        Ok(self)
    }
}
