use std::collections::{HashMap, VecDeque};

use thiserror::Error;

use crate::gallery::SearchOutcome;
use crate::model::EmployeeRecord;
use crate::navigation::{self, Direction, NavigationError};
use crate::state::AppState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    CardClick,
    Close,
    Navigate,
    SearchInput,
    SearchSubmit,
    RecordsLoaded,
}

/// Which part of a prev/next control was hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlTarget {
    Button,
    Icon,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseTarget {
    Button,
    Icon,
    Backdrop,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// `key` is `None` when the click landed on the gallery background.
    CardClicked { key: Option<String> },
    CloseClicked { target: CloseTarget },
    NavClicked {
        direction: Direction,
        target: ControlTarget,
    },
    SearchInput(String),
    SearchSubmitted,
    RecordsLoaded(Vec<EmployeeRecord>),
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::CardClicked { .. } => EventKind::CardClick,
            Event::CloseClicked { .. } => EventKind::Close,
            Event::NavClicked { .. } => EventKind::Navigate,
            Event::SearchInput(_) => EventKind::SearchInput,
            Event::SearchSubmitted => EventKind::SearchSubmit,
            Event::RecordsLoaded(_) => EventKind::RecordsLoaded,
        }
    }
}

/// What a handled event changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Ignored,
    ModalOpened { key: String },
    ModalClosed,
    Navigated { direction: Direction, key: String },
    InputChanged,
    Searched {
        query: String,
        outcome: SearchOutcome,
    },
    RecordsLoaded { count: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("no record with email {key} in the store")]
    RecordNotFound { key: String },

    #[error("card {key} is not in the visible gallery")]
    CardHidden { key: String },

    #[error("navigation failed: {0}")]
    Navigation(#[from] NavigationError),

    #[error("no handler registered for {kind:?} events")]
    Unhandled { kind: EventKind },
}

pub type Handler = Box<dyn Fn(&mut AppState, Event) -> Result<Effect, DirectoryError>>;

/// Owns the application state and routes events to one handler per kind.
///
/// Events run to completion one at a time; queued events are processed in
/// arrival order by `drain`.
pub struct EventRouter {
    state: AppState,
    handlers: HashMap<EventKind, Handler>,
    queue: VecDeque<Event>,
}

impl EventRouter {
    pub fn new(state: AppState) -> Self {
        let mut router = Self::bare(state);
        router
            .on(EventKind::CardClick, open_card)
            .on(EventKind::Close, close_modal)
            .on(EventKind::Navigate, navigate)
            .on(EventKind::SearchInput, set_search_input)
            .on(EventKind::SearchSubmit, submit_search)
            .on(EventKind::RecordsLoaded, load_records);
        router
    }

    pub fn bare(state: AppState) -> Self {
        Self {
            state,
            handlers: HashMap::new(),
            queue: VecDeque::new(),
        }
    }

    /// Registers `handler` for `kind`, replacing any previous one.
    pub fn on<F>(&mut self, kind: EventKind, handler: F) -> &mut Self
    where
        F: Fn(&mut AppState, Event) -> Result<Effect, DirectoryError> + 'static,
    {
        self.handlers.insert(kind, Box::new(handler));
        self
    }

    pub fn dispatch(&mut self, event: Event) -> Result<Effect, DirectoryError> {
        let kind = event.kind();
        let handler = self
            .handlers
            .get(&kind)
            .ok_or(DirectoryError::Unhandled { kind })?;
        handler(&mut self.state, event)
    }

    pub fn enqueue(&mut self, event: Event) {
        self.queue.push_back(event);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn drain(&mut self) -> Vec<Result<Effect, DirectoryError>> {
        let mut out = Vec::with_capacity(self.queue.len());
        while let Some(event) = self.queue.pop_front() {
            out.push(self.dispatch(event));
        }
        out
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}

fn open_card(state: &mut AppState, event: Event) -> Result<Effect, DirectoryError> {
    let Event::CardClicked { key: Some(key) } = event else {
        return Ok(Effect::Ignored);
    };
    if !state.gallery().is_visible(&key) {
        return Err(DirectoryError::CardHidden { key });
    }
    let record = state
        .store()
        .find(&key)
        .cloned()
        .ok_or(DirectoryError::RecordNotFound { key })?;
    let key = state.open_modal(&record).key().to_string();
    Ok(Effect::ModalOpened { key })
}

fn close_modal(state: &mut AppState, _event: Event) -> Result<Effect, DirectoryError> {
    Ok(match state.close_modal() {
        Some(_) => Effect::ModalClosed,
        None => Effect::Ignored,
    })
}

fn navigate(state: &mut AppState, event: Event) -> Result<Effect, DirectoryError> {
    let Event::NavClicked { direction, .. } = event else {
        return Ok(Effect::Ignored);
    };
    let Some(current) = state.modal().map(|m| m.key().to_string()) else {
        return Ok(Effect::Ignored);
    };
    let visible = state.gallery().visible_keys();
    let key = navigation::adjacent(&visible, &current, direction)?.to_string();
    let record = state
        .store()
        .find(&key)
        .cloned()
        .ok_or(DirectoryError::RecordNotFound { key: key.clone() })?;
    state.open_modal(&record);
    Ok(Effect::Navigated { direction, key })
}

fn set_search_input(state: &mut AppState, event: Event) -> Result<Effect, DirectoryError> {
    let Event::SearchInput(text) = event else {
        return Ok(Effect::Ignored);
    };
    state.set_search_input(&text);
    Ok(Effect::InputChanged)
}

fn submit_search(state: &mut AppState, _event: Event) -> Result<Effect, DirectoryError> {
    let query = state.take_search_input();
    let outcome = state.gallery_mut().apply(&query);
    Ok(Effect::Searched { query, outcome })
}

fn load_records(state: &mut AppState, event: Event) -> Result<Effect, DirectoryError> {
    let Event::RecordsLoaded(records) = event else {
        return Ok(Effect::Ignored);
    };
    let count = records.len();
    state.load_records(records);
    Ok(Effect::RecordsLoaded { count })
}
