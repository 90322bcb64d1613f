use crate::gallery::Gallery;
use crate::model::EmployeeRecord;
use crate::render::{self, Detail};
use crate::store::RecordStore;

pub const LOADING_MESSAGE: &str = "Loading Employees...";

/// The open detail view. Only one exists at a time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Modal {
    pub detail: Detail,
}

impl Modal {
    pub fn key(&self) -> &str {
        &self.detail.key
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchForm {
    pub input: String,
}

/// Everything the page shows, owned in one place.
///
/// The store is written only by `load_records`. The gallery is derived from
/// the store and narrowed by searches. The modal refers to a record by key.
#[derive(Clone, Debug)]
pub struct AppState {
    store: RecordStore,
    gallery: Gallery,
    modal: Option<Modal>,
    loading: bool,
    search: SearchForm,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            store: RecordStore::new(),
            gallery: Gallery::default(),
            modal: None,
            loading: true,
            search: SearchForm::default(),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<EmployeeRecord>) -> Self {
        let mut state = Self::new();
        state.load_records(records);
        state
    }

    pub fn load_records(&mut self, records: Vec<EmployeeRecord>) {
        self.store.load(records);
        self.gallery = Gallery::render(&self.store);
        self.modal = None;
        self.loading = false;
    }

    /// Replaces any open modal with the detail view of `record`.
    pub fn open_modal(&mut self, record: &EmployeeRecord) -> &Modal {
        self.modal.insert(Modal {
            detail: render::render_detail(record),
        })
    }

    pub fn close_modal(&mut self) -> Option<Modal> {
        self.modal.take()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn gallery_mut(&mut self) -> &mut Gallery {
        &mut self.gallery
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn search(&self) -> &SearchForm {
        &self.search
    }

    pub fn set_search_input(&mut self, text: &str) {
        self.search.input = text.to_string();
    }

    pub fn take_search_input(&mut self) -> String {
        std::mem::take(&mut self.search.input)
    }
}
