use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Clear, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
};

use crate::model::{MenuView, Model, UIData};

pub const FILTERBAR_HEIGHT: u16 = 1;
pub const PAGINATION_HEIGHT: u16 = 1;
pub const STATUSLINE_HEIGHT: u16 = 1;
pub const TABLE_HEADER_HEIGHT: u16 = 1;

const COLUMN_WIDTHS: [Constraint; 6] = [
    Constraint::Length(5),
    Constraint::Percentage(22),
    Constraint::Fill(2),
    Constraint::Length(4),
    Constraint::Fill(2),
    Constraint::Fill(1),
];

#[derive(Debug, Default)]
pub struct TableUI {
    menu_state: ListState,
}

impl TableUI {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw(&mut self, model: &Model, frame: &mut Frame) {
        let uidata = model.get_uidata();

        let title = Line::from(format!(" {} ", uidata.name).bold());
        let instructions = Line::from(vec![
            " Sort ".into(),
            "<i/n/a>".blue().bold(),
            " Filter ".into(),
            "<g/c>".blue().bold(),
            " Help ".into(),
            "<?>".blue().bold(),
            " Quit ".into(),
            "<q> ".blue().bold(),
        ]);
        let block = Block::bordered()
            .title(title.centered())
            .title_bottom(instructions.centered())
            .border_set(border::THICK);
        let inner = block.inner(frame.area());
        frame.render_widget(block, frame.area());

        let [filterbar, table, pagination, statusline] = Layout::vertical([
            Constraint::Length(FILTERBAR_HEIGHT),
            Constraint::Min(TABLE_HEADER_HEIGHT + 1),
            Constraint::Length(PAGINATION_HEIGHT),
            Constraint::Length(STATUSLINE_HEIGHT),
        ])
        .areas(inner);

        self.draw_filterbar(uidata, frame, filterbar);
        self.draw_table(uidata, frame, table);
        self.draw_pagination(uidata, frame, pagination);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                format!(" {} visible, {} pages ", uidata.nrows, uidata.npages).dark_gray(),
                uidata.status_message.clone().yellow(),
            ])),
            statusline,
        );

        if let Some(menu) = &uidata.menu {
            self.draw_menu(menu, frame, inner);
        }
        if uidata.show_popup {
            self.draw_popup(&uidata.popup_message, frame, inner);
        }
    }

    fn draw_filterbar(&self, uidata: &UIData, frame: &mut Frame, area: Rect) {
        let [gender, country] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(area);
        let dropdown = |label: &str, key: &str, value: &str| {
            Line::from(vec![
                format!(" Filter by {label} ").into(),
                format!("<{key}>").blue().bold(),
                ": ".into(),
                format!("{value} ▾").yellow(),
            ])
        };
        frame.render_widget(
            Paragraph::new(dropdown("Gender", "g", &uidata.gender_filter)),
            gender,
        );
        frame.render_widget(
            Paragraph::new(dropdown("Country", "c", &uidata.country_filter)),
            country,
        );
    }

    fn draw_table(&self, uidata: &UIData, frame: &mut Frame, area: Rect) {
        let header = Row::new(uidata.headers.iter().map(|h| h.label()))
            .style(Style::new().fg(Color::Black).bg(Color::Gray).bold())
            .height(TABLE_HEADER_HEIGHT);
        let rows = uidata
            .rows
            .iter()
            .map(|r| Row::new(r.cells().map(str::to_string)));
        let table = Table::new(rows, COLUMN_WIDTHS)
            .header(header)
            .column_spacing(1);
        frame.render_widget(table, area);

        if let Some(message) = uidata.empty_message {
            let [_, body] = Layout::vertical([
                Constraint::Length(TABLE_HEADER_HEIGHT),
                Constraint::Length(1),
            ])
            .areas(area);
            frame.render_widget(
                Paragraph::new(message)
                    .alignment(Alignment::Center)
                    .italic(),
                body,
            );
        }
    }

    fn draw_pagination(&self, uidata: &UIData, frame: &mut Frame, area: Rect) {
        let control = |label: &'static str, enabled: bool| {
            if enabled {
                Span::styled(label, Style::new().fg(Color::Blue).bold())
            } else {
                Span::styled(
                    label,
                    Style::new().fg(Color::DarkGray).add_modifier(Modifier::DIM),
                )
            }
        };
        let line = Line::from(vec![
            control("◀ Previous", uidata.previous_enabled),
            format!("  {}  ", uidata.page_label).into(),
            control("Next ▶", uidata.next_enabled),
        ]);
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
    }

    fn draw_menu(&mut self, menu: &MenuView, frame: &mut Frame, area: Rect) {
        let width = menu
            .items
            .iter()
            .map(|i| i.chars().count())
            .chain([menu.title.chars().count()])
            .max()
            .unwrap_or(0);
        let width = clamp_u16(width).saturating_add(6);
        let height = clamp_u16(menu.items.len()).saturating_add(2);
        let area = popup_area(area, width, height);

        let list = List::new(menu.items.iter().map(|i| ListItem::new(i.as_str())))
            .block(Block::bordered().title(format!(" {} ", menu.title)))
            .highlight_style(Style::new().reversed())
            .highlight_symbol("> ");
        self.menu_state.select(Some(menu.selected));

        frame.render_widget(Clear, area);
        frame.render_stateful_widget(list, area, &mut self.menu_state);
    }

    fn draw_popup(&self, message: &str, frame: &mut Frame, area: Rect) {
        let width = message.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        let width = clamp_u16(width).saturating_add(4);
        let height = clamp_u16(message.lines().count()).saturating_add(2);
        let area = popup_area(area, width, height);
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(message)
                .wrap(Wrap { trim: false })
                .block(Block::bordered().title(" Help ")),
            area,
        );
    }
}

fn clamp_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    area
}
