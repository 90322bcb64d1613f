use crate::navigation::Direction;
use crate::router::{CloseTarget, ControlTarget, Event};
use crate::state::AppState;

pub const HELP_TEXT: &str = "Commands:
  list                    show the visible gallery
  show                    show the gallery and any open profile
  search <text>           type <text> into the search box and submit
  type <text>             type into the search box without submitting
  submit                  submit the search box
  open <n|email>          open the profile of visible card n (1-based) or by email
  click-gallery           click the gallery background
  next [--icon]           next visible profile
  prev [--icon]           previous visible profile
  close [--icon|--backdrop]
                          close the open profile
  export <file>           write the page to a file (text, json or html)
  help                    show this help
  quit                    leave the session";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    Position(usize),
    Email(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    List,
    Show,
    Search(String),
    Type(String),
    Submit,
    Open(Selector),
    ClickGallery,
    Navigate(Direction, ControlTarget),
    Close(CloseTarget),
    Export(String),
    Help,
    Quit,
}

fn split_verb(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    }
}

fn control_target(rest: &str) -> Result<ControlTarget, String> {
    match rest {
        "" | "--button" => Ok(ControlTarget::Button),
        "--icon" => Ok(ControlTarget::Icon),
        other => Err(format!("unexpected argument '{other}'")),
    }
}

/// Parses one line of input. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (verb, rest) = split_verb(line);
    let cmd = match verb.to_ascii_lowercase().as_str() {
        "list" | "ls" => Command::List,
        "show" => Command::Show,
        "search" | "s" => Command::Search(rest.to_string()),
        "type" => Command::Type(rest.to_string()),
        "submit" => Command::Submit,
        "open" | "o" => {
            if rest.is_empty() {
                return Err("open needs a card number or email".to_string());
            }
            match rest.parse::<usize>() {
                Ok(n) => Command::Open(Selector::Position(n)),
                Err(_) => Command::Open(Selector::Email(rest.to_string())),
            }
        }
        "click-gallery" => Command::ClickGallery,
        "next" | "n" => Command::Navigate(Direction::Next, control_target(rest)?),
        "prev" | "previous" | "p" => {
            Command::Navigate(Direction::Previous, control_target(rest)?)
        }
        "close" | "c" => Command::Close(match rest {
            "" | "--button" => CloseTarget::Button,
            "--icon" => CloseTarget::Icon,
            "--backdrop" => CloseTarget::Backdrop,
            other => return Err(format!("unexpected argument '{other}'")),
        }),
        "export" => {
            if rest.is_empty() {
                return Err("export needs a file path".to_string());
            }
            Command::Export(rest.to_string())
        }
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command '{other}'")),
    };
    Ok(Some(cmd))
}

impl Command {
    /// Events this command raises against the current page.
    pub fn to_events(&self, state: &AppState) -> Result<Vec<Event>, String> {
        let events = match self {
            Command::Search(text) => vec![Event::SearchInput(text.clone()), Event::SearchSubmitted],
            Command::Type(text) => vec![Event::SearchInput(text.clone())],
            Command::Submit => vec![Event::SearchSubmitted],
            Command::Open(Selector::Position(n)) => {
                let card = state
                    .gallery()
                    .visible_at(*n)
                    .ok_or_else(|| format!("no visible card at position {n}"))?;
                vec![Event::CardClicked {
                    key: Some(card.key.clone()),
                }]
            }
            Command::Open(Selector::Email(email)) => vec![Event::CardClicked {
                key: Some(email.clone()),
            }],
            Command::ClickGallery => vec![Event::CardClicked { key: None }],
            Command::Navigate(direction, target) => vec![Event::NavClicked {
                direction: *direction,
                target: *target,
            }],
            Command::Close(target) => vec![Event::CloseClicked { target: *target }],
            Command::List | Command::Show | Command::Export(_) | Command::Help | Command::Quit => {
                Vec::new()
            }
        };
        Ok(events)
    }
}
