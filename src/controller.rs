use std::time::Duration;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::trace;

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

use crate::domain::{ETConfig, ETError, Message};
use crate::filter::FilterKind;
use crate::loader::LoadResult;
use crate::sort::SortKey;

pub struct Controller {
    event_poll_time: u64,
    pending_load: Option<oneshot::Receiver<LoadResult>>,
}

impl Controller {
    pub fn new(cfg: &ETConfig, pending_load: oneshot::Receiver<LoadResult>) -> Self {
        Self {
            event_poll_time: cfg.event_poll_time,
            pending_load: Some(pending_load),
        }
    }

    pub fn handle_event(&mut self) -> Result<Option<Message>, ETError> {
        if let Some(message) = self.poll_load() {
            return Ok(Some(message));
        }
        if event::poll(Duration::from_millis(self.event_poll_time))? {
            match event::read()? {
                // Crossterm also emits release and repeat events on some platforms.
                Event::Key(key) if key.kind == event::KeyEventKind::Press => {
                    return Ok(handle_key(key));
                }
                // The next draw picks up the new terminal size.
                Event::Resize(width, height) => trace!("Resized to {width}x{height}"),
                _ => {}
            }
        }
        Ok(None)
    }

    // Maps a finished background load to a message, once.
    fn poll_load(&mut self) -> Option<Message> {
        let rx = self.pending_load.as_mut()?;
        let message = match rx.try_recv() {
            Err(TryRecvError::Empty) => return None,
            Ok(Ok(records)) => Message::Loaded(records),
            Ok(Err(e)) => Message::LoadFailed(format!("{e:?}")),
            Err(TryRecvError::Closed) => Message::LoadFailed("loader stopped".to_string()),
        };
        self.pending_load = None;
        Some(message)
    }
}

fn handle_key(key: KeyEvent) -> Option<Message> {
    let message = match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Message::Quit),
        (KeyCode::Char('q'), _) => Some(Message::Quit),
        (KeyCode::Char('?'), _) => Some(Message::Help),
        (KeyCode::Esc, _) => Some(Message::Exit),
        (KeyCode::Enter, _) => Some(Message::Enter),
        (KeyCode::Up | KeyCode::Char('k'), _) => Some(Message::MoveUp),
        (KeyCode::Down | KeyCode::Char('j'), _) => Some(Message::MoveDown),
        (KeyCode::Left | KeyCode::Char('h'), _) => Some(Message::PreviousPage),
        (KeyCode::Right | KeyCode::Char('l'), _) => Some(Message::NextPage),
        (KeyCode::Char('i'), _) => Some(Message::SortBy(SortKey::Id)),
        (KeyCode::Char('n'), _) => Some(Message::SortBy(SortKey::FullName)),
        (KeyCode::Char('a'), _) => Some(Message::SortBy(SortKey::Age)),
        (KeyCode::Char('g'), _) => Some(Message::OpenMenu(FilterKind::Gender)),
        (KeyCode::Char('c'), _) => Some(Message::OpenMenu(FilterKind::Country)),
        _ => None,
    };
    trace!("Mapped: {key:?} => {message:?}");
    message
}
