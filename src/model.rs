use std::time::Instant;
use tracing::{error, info, trace};

use crate::domain::{ETConfig, HELP_TEXT, Message};
use crate::filter::FilterKind;
use crate::format::{ALL_OPTION, EMPTY_STATE_MESSAGE, HeaderView, RowView, headers};
use crate::projection::ProjectionCache;
use crate::record::Record;
use crate::sort::SortKey;
use crate::state::ViewState;

#[derive(Debug, PartialEq)]
pub enum Status {
    LOADING,
    READY,
    QUITTING,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Modus {
    TABLE,
    MENU(FilterKind),
    POPUP,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuView {
    pub title: String,
    pub items: Vec<String>,
    pub selected: usize,
}

/// Everything the ui needs for one frame. Rebuilt after every update.
#[derive(Debug, Clone)]
pub struct UIData {
    pub name: String,
    pub headers: Vec<HeaderView>,
    pub rows: Vec<RowView>,
    pub empty_message: Option<&'static str>,
    pub gender_filter: String,
    pub country_filter: String,
    pub menu: Option<MenuView>,
    pub page_label: String,
    pub previous_enabled: bool,
    pub next_enabled: bool,
    pub nrows: usize, // Number of visible records across all pages
    pub npages: usize,
    pub show_popup: bool,
    pub popup_message: String,
    pub status_message: String,
}

impl UIData {
    pub fn empty() -> Self {
        UIData {
            name: String::new(),
            headers: headers(None),
            rows: Vec::new(),
            empty_message: Some(EMPTY_STATE_MESSAGE),
            gender_filter: ALL_OPTION.to_string(),
            country_filter: ALL_OPTION.to_string(),
            menu: None,
            page_label: String::new(),
            previous_enabled: false,
            next_enabled: false,
            nrows: 0,
            npages: 0,
            show_popup: false,
            popup_message: String::new(),
            status_message: String::new(),
        }
    }
}

pub struct Model {
    config: ETConfig,
    pub status: Status,
    modus: Modus,
    previous_modus: Modus,
    state: ViewState,
    projection: ProjectionCache,
    menu_cursor: usize,
    uidata: UIData,
    status_message: String,
}

impl Model {
    pub fn init(config: &ETConfig) -> Self {
        let mut model = Self {
            config: config.clone(),
            status: Status::LOADING,
            modus: Modus::TABLE,
            previous_modus: Modus::TABLE,
            state: ViewState::new(config.page_size),
            projection: ProjectionCache::default(),
            menu_cursor: 0,
            uidata: UIData::empty(),
            status_message: String::new(),
        };
        model.set_status_message("Loading ...");
        model.update_uidata();
        model
    }

    pub fn get_uidata(&self) -> &UIData {
        &self.uidata
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn quit(&mut self) {
        self.status = Status::QUITTING;
    }

    pub fn update(&mut self, message: Message) {
        trace!("Update: Modus {:?}", self.modus);
        match (self.modus, message) {
            (_, Message::Quit) => self.quit(),
            (_, Message::Loaded(records)) => self.loaded(records),
            (_, Message::LoadFailed(reason)) => self.load_failed(reason),

            (Modus::TABLE, msg) => match msg {
                Message::Help => self.show_help(),
                Message::SortBy(key) => self.sort(key),
                Message::OpenMenu(kind) => self.open_menu(kind),
                Message::PreviousPage => self.previous_page(),
                Message::NextPage => self.next_page(),
                _ => (),
            },
            (Modus::MENU(kind), msg) => match msg {
                Message::MoveUp => self.move_menu_selection(-1),
                Message::MoveDown => self.move_menu_selection(1),
                Message::Enter => self.select_menu_entry(kind),
                // Switching directly to the other menu, like clicking the other dropdown.
                Message::OpenMenu(other) => self.open_menu(other),
                Message::Exit => self.exit(),
                _ => (),
            },
            (Modus::POPUP, msg) => match msg {
                Message::Exit | Message::Enter | Message::Help => self.exit(),
                _ => (),
            },
        }
        self.update_uidata();
    }

    // -------------------- Control handling functions ---------------------- //

    fn loaded(&mut self, records: Vec<Record>) {
        let count = records.len();
        self.state = self.state.loaded(records);
        if let Some(key) = self.config.initial_sort.clone() {
            self.state = self.state.sorted_by(key);
        }
        self.status = Status::READY;
        self.clamp_menu_cursor();
        self.set_status_message(format!("Loaded {count} records"));
    }

    // Failures stay out of the table: records remain empty and the empty state renders.
    fn load_failed(&mut self, reason: String) {
        error!("Loading records failed: {reason}");
        self.status = Status::READY;
        self.set_status_message("");
    }

    fn sort(&mut self, key: SortKey) {
        let start_time = Instant::now();
        self.state = self.state.sorted_by(key);
        if let Some(sort) = &self.state.sort {
            trace!(
                "Sorted {} records by {} {:?} in {}ms",
                self.state.records.len(),
                sort.key,
                sort.direction,
                start_time.elapsed().as_millis()
            );
        }
    }

    fn previous_page(&mut self) {
        if self.projection.get(&self.state).has_previous {
            self.state = self.state.previous_page();
        }
    }

    fn next_page(&mut self) {
        if self.projection.get(&self.state).has_next {
            self.state = self.state.next_page();
        }
    }

    fn menu_len(&self, kind: FilterKind) -> usize {
        self.state.options(kind).len() + 1
    }

    fn open_menu(&mut self, kind: FilterKind) {
        if !matches!(self.modus, Modus::MENU(_)) {
            self.previous_modus = self.modus;
        }
        self.modus = Modus::MENU(kind);
        // Start on the active value, "All" when unfiltered.
        self.menu_cursor = self
            .state
            .filters
            .get(kind)
            .and_then(|v| self.state.options(kind).iter().position(|o| o == v))
            .map(|idx| idx + 1)
            .unwrap_or(0);
    }

    fn clamp_menu_cursor(&mut self) {
        if let Modus::MENU(kind) = self.modus {
            self.menu_cursor = self.menu_cursor.min(self.menu_len(kind) - 1);
        }
    }

    fn move_menu_selection(&mut self, step: isize) {
        if let Modus::MENU(kind) = self.modus {
            let last = self.menu_len(kind) - 1;
            self.menu_cursor = self.menu_cursor.saturating_add_signed(step).min(last);
        }
    }

    fn select_menu_entry(&mut self, kind: FilterKind) {
        let value = match self.menu_cursor {
            0 => String::new(),
            idx => self
                .state
                .options(kind)
                .get(idx - 1)
                .cloned()
                .unwrap_or_default(),
        };
        trace!("Filter {kind} = {value:?}");
        self.state = self.state.filtered(kind, &value);
        self.exit();
    }

    fn show_help(&mut self) {
        self.previous_modus = self.modus;
        self.modus = Modus::POPUP;
    }

    fn exit(&mut self) {
        match self.modus {
            Modus::TABLE => {}
            Modus::MENU(_) => {
                self.previous_modus = self.modus;
                self.modus = Modus::TABLE;
            }
            Modus::POPUP => {
                trace!("Close popup ...");
                self.modus = self.previous_modus;
                self.previous_modus = Modus::POPUP;
            }
        }
    }

    fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        info!("Status: {}", self.status_message);
    }

    // -------------------- UI data ---------------------- //

    fn filter_label(&self, kind: FilterKind) -> String {
        self.state
            .filters
            .get(kind)
            .unwrap_or(ALL_OPTION)
            .to_string()
    }

    fn update_uidata(&mut self) {
        let projection = self.projection.get(&self.state);
        let rows: Vec<RowView> = projection
            .page
            .iter()
            .map(|&idx| RowView::from_record(&self.state.records[idx]))
            .collect();
        let nrows = projection.filtered.len();
        let previous_enabled = projection.has_previous;
        let next_enabled = projection.has_next;

        let menu = match self.modus {
            Modus::MENU(kind) => Some(MenuView {
                title: format!("Filter by {kind}"),
                items: std::iter::once(ALL_OPTION.to_string())
                    .chain(self.state.options(kind).iter().cloned())
                    .collect(),
                selected: self.menu_cursor,
            }),
            _ => None,
        };

        let show_popup = self.modus == Modus::POPUP;
        self.uidata = UIData {
            name: "Employee App".to_string(),
            headers: headers(self.state.sort.as_ref()),
            empty_message: rows.is_empty().then_some(EMPTY_STATE_MESSAGE),
            rows,
            gender_filter: self.filter_label(FilterKind::Gender),
            country_filter: self.filter_label(FilterKind::Country),
            menu,
            page_label: format!("Page {}", self.state.pager.current_page),
            previous_enabled,
            next_enabled,
            nrows,
            npages: self.state.pager.page_count(nrows),
            show_popup,
            popup_message: if show_popup {
                HELP_TEXT.to_string()
            } else {
                String::new()
            },
            status_message: self.status_message.clone(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::SortDirection;

    fn rec(id: f64, age: f64, gender: &str, country: &str) -> Record {
        let mut r = Record {
            id,
            age,
            gender: gender.into(),
            first_name: format!("First{id}"),
            ..Record::default()
        };
        r.address.country = country.into();
        r
    }

    fn sample() -> Vec<Record> {
        vec![
            rec(3.0, 40.0, "male", "US"),
            rec(1.0, 25.0, "female", "UK"),
            rec(2.0, 30.0, "male", "US"),
        ]
    }

    fn loaded_model(records: Vec<Record>, page_size: usize) -> Model {
        let cfg = ETConfig::default().with_page_size(page_size);
        let mut model = Model::init(&cfg);
        model.update(Message::Loaded(records));
        model
    }

    fn row_ids(model: &Model) -> Vec<String> {
        model
            .get_uidata()
            .rows
            .iter()
            .map(|r| r.id.clone())
            .collect()
    }

    #[test]
    fn starts_loading_with_empty_table() {
        let model = Model::init(&ETConfig::default());
        assert_eq!(model.status, Status::LOADING);
        let ui = model.get_uidata();
        assert!(ui.rows.is_empty());
        assert_eq!(ui.empty_message, Some("No Data Found"));
        assert_eq!(ui.status_message, "Loading ...");
    }

    #[test]
    fn empty_fetch_shows_empty_state_and_bare_menus() {
        let mut model = loaded_model(Vec::new(), 10);
        assert_eq!(model.get_uidata().empty_message, Some("No Data Found"));

        model.update(Message::OpenMenu(FilterKind::Gender));
        assert_eq!(model.get_uidata().menu.as_ref().unwrap().items, vec!["All"]);
        model.update(Message::OpenMenu(FilterKind::Country));
        assert_eq!(model.get_uidata().menu.as_ref().unwrap().items, vec!["All"]);
    }

    #[test]
    fn load_failure_leaves_records_empty() {
        let mut model = Model::init(&ETConfig::default());
        model.update(Message::LoadFailed("connection refused".into()));
        assert_eq!(model.status, Status::READY);
        assert!(model.state().records.is_empty());
        assert_eq!(model.get_uidata().empty_message, Some("No Data Found"));
        assert_eq!(model.get_uidata().status_message, "");
    }

    #[test]
    fn three_records_on_one_page() {
        let model = loaded_model(sample(), 10);
        let ui = model.get_uidata();
        assert_eq!(ui.rows.len(), 3);
        assert!(ui.empty_message.is_none());
        assert!(!ui.previous_enabled);
        assert!(!ui.next_enabled);
        assert_eq!(ui.page_label, "Page 1");
    }

    #[test]
    fn header_sort_toggles() {
        let mut model = loaded_model(sample(), 10);
        model.update(Message::SortBy(SortKey::Id));
        assert_eq!(row_ids(&model), vec!["1", "2", "3"]);
        model.update(Message::SortBy(SortKey::Id));
        assert_eq!(row_ids(&model), vec!["3", "2", "1"]);
        assert_eq!(model.get_uidata().headers[0].direction, Some(SortDirection::Descending));
    }

    #[test]
    fn gender_menu_filters_rows() {
        let mut model = loaded_model(sample(), 10);
        model.update(Message::OpenMenu(FilterKind::Gender));
        let menu = model.get_uidata().menu.clone().unwrap();
        assert_eq!(menu.items, vec!["All", "male", "female"]);
        assert_eq!(menu.selected, 0);

        model.update(Message::MoveDown);
        model.update(Message::Enter);
        let ui = model.get_uidata();
        assert!(ui.menu.is_none());
        assert_eq!(ui.gender_filter, "male");
        assert_eq!(row_ids(&model), vec!["3", "2"]);

        // Reopening starts on the active value; "All" clears it again.
        model.update(Message::OpenMenu(FilterKind::Gender));
        assert_eq!(model.get_uidata().menu.as_ref().unwrap().selected, 1);
        model.update(Message::MoveUp);
        model.update(Message::MoveUp);
        model.update(Message::Enter);
        assert_eq!(model.get_uidata().gender_filter, "All");
        assert_eq!(model.get_uidata().rows.len(), 3);
    }

    #[test]
    fn escape_closes_menu_without_filtering() {
        let mut model = loaded_model(sample(), 10);
        model.update(Message::OpenMenu(FilterKind::Country));
        model.update(Message::MoveDown);
        model.update(Message::Exit);
        assert!(model.get_uidata().menu.is_none());
        assert_eq!(model.get_uidata().country_filter, "All");
    }

    #[test]
    fn menu_selection_stays_in_bounds() {
        let mut model = loaded_model(sample(), 10);
        model.update(Message::OpenMenu(FilterKind::Country));
        for _ in 0..10 {
            model.update(Message::MoveDown);
        }
        assert_eq!(model.get_uidata().menu.as_ref().unwrap().selected, 2);
        for _ in 0..10 {
            model.update(Message::MoveUp);
        }
        assert_eq!(model.get_uidata().menu.as_ref().unwrap().selected, 0);
    }

    #[test]
    fn disabled_controls_ignore_activation() {
        let records: Vec<Record> = (1..=25).map(|i| rec(i as f64, 20.0, "male", "US")).collect();
        let mut model = loaded_model(records, 10);

        model.update(Message::PreviousPage);
        assert_eq!(model.state().pager.current_page, 1);

        model.update(Message::NextPage);
        model.update(Message::NextPage);
        assert_eq!(model.get_uidata().page_label, "Page 3");
        assert_eq!(model.get_uidata().rows.len(), 5);
        assert!(!model.get_uidata().next_enabled);

        model.update(Message::NextPage);
        assert_eq!(model.state().pager.current_page, 3);

        model.update(Message::PreviousPage);
        assert_eq!(model.get_uidata().page_label, "Page 2");
        assert!(model.get_uidata().previous_enabled);
    }

    #[test]
    fn narrowing_filter_keeps_page() {
        let mut records: Vec<Record> = (1..=25).map(|i| rec(i as f64, 20.0, "male", "US")).collect();
        records.push(rec(26.0, 20.0, "female", "UK"));
        let mut model = loaded_model(records, 10);
        model.update(Message::NextPage);
        model.update(Message::NextPage);

        model.update(Message::OpenMenu(FilterKind::Gender));
        model.update(Message::MoveDown);
        model.update(Message::MoveDown);
        model.update(Message::Enter);
        let ui = model.get_uidata();
        assert_eq!(ui.gender_filter, "female");
        assert_eq!(ui.page_label, "Page 3");
        assert_eq!(ui.empty_message, Some("No Data Found"));
        assert!(ui.previous_enabled);
    }

    #[test]
    fn initial_sort_applies_after_load() {
        let cfg = ETConfig::default().with_initial_sort(SortKey::Age);
        let mut model = Model::init(&cfg);
        model.update(Message::Loaded(sample()));
        assert_eq!(row_ids(&model), vec!["1", "2", "3"]);
    }

    #[test]
    fn help_popup_blocks_table_keys() {
        let mut model = loaded_model(sample(), 10);
        model.update(Message::Help);
        assert!(model.get_uidata().show_popup);
        model.update(Message::SortBy(SortKey::Id));
        assert!(model.state().sort.is_none());
        model.update(Message::Exit);
        assert!(!model.get_uidata().show_popup);
    }

    #[test]
    fn quit_works_everywhere() {
        let mut model = loaded_model(sample(), 10);
        model.update(Message::OpenMenu(FilterKind::Gender));
        model.update(Message::Quit);
        assert_eq!(model.status, Status::QUITTING);
    }
}
