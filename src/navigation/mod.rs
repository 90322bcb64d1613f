use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    pub fn label(self) -> &'static str {
        match self {
            Direction::Previous => "previous",
            Direction::Next => "next",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("no visible cards to navigate")]
    EmptyGallery,

    #[error("record {key} is not in the visible gallery")]
    NotVisible { key: String },
}

/// Key of the card next to `current` in the visible order, wrapping at both
/// ends. `current` is matched by exact equality.
pub fn adjacent<'a>(
    visible: &[&'a str],
    current: &str,
    direction: Direction,
) -> Result<&'a str, NavigationError> {
    if visible.is_empty() {
        return Err(NavigationError::EmptyGallery);
    }
    let pos = visible
        .iter()
        .position(|k| *k == current)
        .ok_or_else(|| NavigationError::NotVisible {
            key: current.to_string(),
        })?;
    let last = visible.len() - 1;
    let next = match direction {
        Direction::Previous if pos == 0 => last,
        Direction::Previous => pos - 1,
        Direction::Next if pos == last => 0,
        Direction::Next => pos + 1,
    };
    Ok(visible[next])
}
