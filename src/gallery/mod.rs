use crate::render::{self, Card};
use crate::store::RecordStore;

pub const NO_RESULTS_MESSAGE: &str = "Sorry, no employees were found.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Matched(usize),
    NoResults,
}

/// Rendered cards plus the subset currently on screen.
///
/// `cards` keeps every rendered card in store order; `visible` holds indices
/// into it in the same relative order. When a search matches nothing the
/// visible list is empty and a single message takes its place.
#[derive(Clone, Debug, Default)]
pub struct Gallery {
    cards: Vec<Card>,
    visible: Vec<usize>,
    message: Option<&'static str>,
}

impl Gallery {
    pub fn render(store: &RecordStore) -> Self {
        let cards: Vec<Card> = store.iter().map(render::render_card).collect();
        let visible = (0..cards.len()).collect();
        Self {
            cards,
            visible,
            message: None,
        }
    }

    pub fn apply(&mut self, query: &str) -> SearchOutcome {
        let needle = query.trim().to_lowercase();
        let matched: Vec<usize> = self
            .cards
            .iter()
            .enumerate()
            .filter(|(_, card)| card.matches(&needle))
            .map(|(idx, _)| idx)
            .collect();

        if matched.is_empty() {
            self.visible.clear();
            self.message = Some(NO_RESULTS_MESSAGE);
            return SearchOutcome::NoResults;
        }

        let count = matched.len();
        self.visible = matched;
        self.message = None;
        SearchOutcome::Matched(count)
    }

    pub fn visible(&self) -> impl Iterator<Item = &Card> {
        self.visible.iter().map(|&idx| &self.cards[idx])
    }

    pub fn visible_keys(&self) -> Vec<&str> {
        self.visible().map(|c| c.key.as_str()).collect()
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_visible(&self, key: &str) -> bool {
        self.visible().any(|c| c.key == key)
    }

    pub fn visible_at(&self, position: usize) -> Option<&Card> {
        let idx = position.checked_sub(1)?;
        self.visible.get(idx).map(|&i| &self.cards[i])
    }

    pub fn message(&self) -> Option<&'static str> {
        self.message
    }
}
