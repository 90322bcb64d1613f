use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

fn nationality_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z]{2}$").expect("nationality pattern"))
}

pub fn parse_nationalities_csv(value: &str) -> Result<Vec<String>, String> {
    let raw = value.trim();
    if raw.is_empty() {
        return Err("nationalities list is empty".to_string());
    }
    let mut out: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for part in raw.split(',') {
        let item = part.trim();
        if item.is_empty() {
            continue;
        }
        if !nationality_re().is_match(item) {
            return Err(format!("invalid nationality code '{item}'"));
        }
        let code = item.to_ascii_lowercase();
        if seen.insert(code.clone()) {
            out.push(code);
        }
    }
    if out.is_empty() {
        return Err("nationalities list is empty".to_string());
    }
    Ok(out)
}

pub fn format_bool(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
