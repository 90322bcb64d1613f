use crate::render::escape_html;
use crate::state::{AppState, LOADING_MESSAGE};

fn json_for_script_tag(value: &str) -> String {
    value.replace("</", "<\\/")
}

fn render_gallery(state: &AppState) -> String {
    if state.is_loading() {
        return format!(
            r#"<div class="loading-container">
    <h3>{LOADING_MESSAGE}</h3>
    <img src="images/loading.gif" alt="loading">
</div>"#
        );
    }
    let mut parts: Vec<String> = state.gallery().visible().map(|c| c.to_html()).collect();
    if let Some(msg) = state.gallery().message() {
        parts.push(format!("<h3>{}</h3>", escape_html(msg)));
    }
    parts.join("\n")
}

fn render_search(state: &AppState) -> String {
    format!(
        r##"<form action="#" method="get">
    <input type="search" id="search-input" class="search-input" placeholder="Search..." value="{value}">
    <input type="submit" value="&#xf002;" id="search-submit" class="search-submit">
</form>"##,
        value = escape_html(&state.search().input)
    )
}

/// Static page shell with the gallery, search form and any open modal.
pub fn render_page(state: &AppState) -> Vec<u8> {
    let json = serde_json::to_string(&super::snapshot(state)).unwrap_or_else(|_| "{}".to_string());
    let json = json_for_script_tag(&json);
    let modal = state
        .modal()
        .map(|m| m.detail.to_html())
        .unwrap_or_default();

    let html = format!(
        r####"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta http-equiv="X-UA-Compatible" content="IE=edge">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Employee Directory</title>
  <link rel="stylesheet" href="https://maxcdn.bootstrapcdn.com/font-awesome/4.7.0/css/font-awesome.min.css">
  <link rel="stylesheet" href="css/styles.css">
</head>
<body>
  <script type="application/json" id="page-data">{json}</script>
  <header>
    <div class="header-inner-container">
      <div class="header-text-container">
        <h1>AWESOME STARTUP EMPLOYEE DIRECTORY</h1>
      </div>
      <div class="search-container">
{search}
      </div>
    </div>
  </header>

  <div id="gallery" class="gallery">
{gallery}
  </div>
{modal}
</body>
</html>
"####,
        search = render_search(state),
        gallery = render_gallery(state),
    );
    html.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::sample_record;
    use crate::router::{Event, EventRouter};

    fn page(state: &AppState) -> String {
        String::from_utf8(render_page(state)).unwrap()
    }

    #[test]
    fn loading_page_shows_indicator() {
        let html = page(&AppState::new());
        assert!(html.contains("loading-container"));
        assert!(html.contains(LOADING_MESSAGE));
        assert!(!html.contains("modal-container"));
    }

    #[test]
    fn page_contains_cards_and_open_modal() {
        let mut r = EventRouter::new(AppState::with_records(vec![
            sample_record("Ann", "Lee"),
            sample_record("Bob", "Ray"),
        ]));
        r.dispatch(Event::CardClicked {
            key: Some("ann.lee@example.com".to_string()),
        })
        .unwrap();
        let html = page(r.state());
        assert_eq!(html.matches(r#"<div class="card""#).count(), 2);
        assert_eq!(html.matches(r#"<div class="modal-container""#).count(), 1);
        assert!(!html.contains("loading-container"));
    }

    #[test]
    fn no_results_message_appears_once() {
        let mut r = EventRouter::new(AppState::with_records(vec![sample_record("Ann", "Lee")]));
        for q in ["zzz", "yyy"] {
            r.dispatch(Event::SearchInput(q.to_string())).unwrap();
            r.dispatch(Event::SearchSubmitted).unwrap();
        }
        let html = page(r.state());
        assert_eq!(html.matches("Sorry, no employees were found.").count(), 2);
        assert_eq!(html.matches("<h3>Sorry, no employees were found.</h3>").count(), 1);
    }

    #[test]
    fn script_tag_payload_cannot_close_early() {
        assert_eq!(json_for_script_tag("</script>"), "<\\/script>");
    }
}
