pub mod report;

use colored::Colorize;
use serde::Serialize;

use crate::model::EmployeeRecord;
use crate::render::Detail;
use crate::state::{AppState, LOADING_MESSAGE};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        return Some(OutputFormat::Html);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

#[derive(Clone, Debug, Serialize)]
pub struct PageSnapshot<'a> {
    pub loading: bool,
    pub total: usize,
    pub visible: Vec<&'a EmployeeRecord>,
    pub message: Option<&'a str>,
    pub modal: Option<&'a Detail>,
}

pub fn snapshot(state: &AppState) -> PageSnapshot<'_> {
    let visible = state
        .gallery()
        .visible()
        .filter_map(|card| state.store().find(&card.key))
        .collect();
    PageSnapshot {
        loading: state.is_loading(),
        total: state.store().len(),
        visible,
        message: state.gallery().message(),
        modal: state.modal().map(|m| &m.detail),
    }
}

pub fn render(state: &AppState, format: OutputFormat) -> Vec<u8> {
    match format {
        OutputFormat::Text => render_text(state),
        OutputFormat::Json => render_json(state),
        OutputFormat::Html => render_html(state),
    }
}

pub fn render_text(state: &AppState) -> Vec<u8> {
    let mut out = String::new();
    if state.is_loading() {
        out.push_str(LOADING_MESSAGE);
        out.push('\n');
        return out.into_bytes();
    }
    for (i, card) in state.gallery().visible().enumerate() {
        out.push_str(&format!("{:>3}. {}\n", i + 1, card.to_text()));
    }
    if let Some(msg) = state.gallery().message() {
        out.push_str(msg);
        out.push('\n');
    }
    if let Some(modal) = state.modal() {
        out.push('\n');
        out.push_str(&modal.detail.to_text());
    }
    out.into_bytes()
}

pub fn render_json(state: &AppState) -> Vec<u8> {
    serde_json::to_vec_pretty(&snapshot(state)).unwrap_or_else(|_| b"{}\n".to_vec())
}

pub fn render_html(state: &AppState) -> Vec<u8> {
    report::render_page(state)
}

pub fn format_gallery(state: &AppState) -> String {
    if state.is_loading() {
        return format!("{}\n", LOADING_MESSAGE.bold().yellow());
    }
    let mut out = String::new();
    for (i, card) in state.gallery().visible().enumerate() {
        let open = state.modal().map(|m| m.key() == card.key).unwrap_or(false);
        let marker = if open { ">" } else { " " };
        out.push_str(&format!(
            "{}{:>3}. {:<24} {:<36} {}\n",
            marker.bold().green(),
            i + 1,
            card.name.bold().white(),
            card.email.cyan(),
            card.location.dimmed()
        ));
    }
    if let Some(msg) = state.gallery().message() {
        out.push_str(&format!("{}\n", msg.bold().red()));
    }
    out
}

pub fn format_modal(state: &AppState) -> Option<String> {
    state
        .modal()
        .map(|m| m.detail.to_text().bright_white().to_string())
}
