use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::gallery::{SearchOutcome, NO_RESULTS_MESSAGE};
use crate::navigation::Direction;
use crate::provider::{self, ProviderError};
use crate::router::{ControlTarget, Effect, Event, EventRouter};
use crate::runner::{Options, RecordSource, Runner};
use crate::state::AppState;

const NAMES: [(&str, &str); 12] = [
    ("Brad", "Gibson"),
    ("Ella", "Moore"),
    ("Liam", "Walker"),
    ("Olivia", "Martin"),
    ("Noah", "Taylor"),
    ("Emma", "Wilson"),
    ("Jack", "Thompson"),
    ("Ava", "Brown"),
    ("Lucas", "Clarke"),
    ("Mia", "Harris"),
    ("Oscar", "Reid"),
    ("Chloe", "Young"),
];

fn email(first: &str, last: &str) -> String {
    format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase())
}

fn provider_body() -> String {
    let results: Vec<serde_json::Value> = NAMES
        .iter()
        .enumerate()
        .map(|(i, (first, last))| {
            serde_json::json!({
                "name": { "title": "Ms", "first": first, "last": last },
                "email": email(first, last),
                "location": {
                    "street": { "number": 100 + i, "name": "High Street" },
                    "city": "Wellington",
                    "state": "Wellington",
                    "postcode": 6011 + i
                },
                "picture": { "large": format!("https://randomuser.me/api/portraits/women/{i}.jpg") },
                "phone": format!("(04) 555-01{i:02}"),
                "dob": { "date": format!("19{}-0{}-1{}T00:00:00Z", 70 + i, 1 + i % 9, i % 10), "age": 40 }
            })
        })
        .collect();
    serde_json::json!({ "results": results, "info": { "results": 12 } }).to_string()
}

/// Serves exactly one HTTP response on a loopback port and returns its URL.
async fn serve_once(status_line: &'static str, body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
            if request.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
    });
    format!("http://{addr}/api/")
}

fn direct_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

fn visible_names(router: &EventRouter) -> Vec<String> {
    router
        .state()
        .gallery()
        .visible()
        .map(|c| c.name.clone())
        .collect()
}

fn search(router: &mut EventRouter, query: &str) -> SearchOutcome {
    router
        .dispatch(Event::SearchInput(query.to_string()))
        .unwrap();
    match router.dispatch(Event::SearchSubmitted).unwrap() {
        Effect::Searched { outcome, .. } => outcome,
        other => panic!("unexpected effect {other:?}"),
    }
}

fn next(router: &mut EventRouter) -> String {
    router
        .dispatch(Event::NavClicked {
            direction: Direction::Next,
            target: ControlTarget::Button,
        })
        .unwrap();
    router.state().modal().unwrap().detail.email.clone()
}

#[tokio::test]
async fn fetch_search_open_and_step_through_filtered_cards() {
    let endpoint = serve_once("200 OK", provider_body()).await;
    let nats = vec!["us".to_string(), "nz".to_string()];
    let url = provider::build_users_url(&endpoint, 12, &nats).unwrap();
    let records = provider::fetch_users(&direct_client(), url).await.unwrap();

    let mut router = EventRouter::new(AppState::new());
    assert!(router.state().is_loading());
    router.dispatch(Event::RecordsLoaded(records)).unwrap();
    assert!(!router.state().is_loading());

    let expected: Vec<String> = NAMES.iter().map(|(f, l)| format!("{f} {l}")).collect();
    assert_eq!(visible_names(&router), expected);

    assert_eq!(search(&mut router, "MA"), SearchOutcome::Matched(2));
    assert_eq!(visible_names(&router), vec!["Olivia Martin", "Emma Wilson"]);
    assert_eq!(router.state().search().input, "");

    let first = router.state().gallery().visible_at(1).unwrap().key.clone();
    router
        .dispatch(Event::CardClicked {
            key: Some(first.clone()),
        })
        .unwrap();
    assert_eq!(router.state().modal().unwrap().detail.email, first);
    assert_eq!(first, email("Olivia", "Martin"));

    assert_eq!(next(&mut router), email("Emma", "Wilson"));
    assert_eq!(next(&mut router), email("Olivia", "Martin"));
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let endpoint = serve_once("500 Internal Server Error", "{}".to_string()).await;
    let url = provider::build_users_url(&endpoint, 12, &[]).unwrap();
    let err = provider::fetch_users(&direct_client(), url)
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Status { status: 500, .. }));
    assert_eq!(err.to_string(), "There was an error: 500 Internal Server Error");
}

#[tokio::test]
async fn runner_loads_records_from_file() {
    let path = std::env::temp_dir().join(format!("staffdir-users-{}.json", std::process::id()));
    tokio::fs::write(&path, provider_body()).await.unwrap();
    let path_str = path.to_string_lossy().to_string();

    let runner = Runner::new(Options {
        source: RecordSource::FilePath(path_str.clone()),
        ..Options::default()
    })
    .unwrap();
    let loaded = runner.run().await.unwrap();
    assert_eq!(loaded.origin, path_str);
    assert_eq!(loaded.records.len(), 12);
    assert_eq!(loaded.records[0].address.street, "100 High Street");
    assert_eq!(loaded.records[0].address.postal_code, "6011");
    let _ = tokio::fs::remove_file(path).await;
}

#[tokio::test]
async fn runner_reports_missing_file() {
    let runner = Runner::new(Options {
        source: RecordSource::FilePath("/no/such/users.json".to_string()),
        ..Options::default()
    })
    .unwrap();
    let err = runner.run().await.unwrap_err();
    assert!(err.to_string().contains("/no/such/users.json"));
}

#[test]
fn filtered_set_equals_name_substring_matches() {
    let records = provider::parse_users(provider_body().as_bytes()).unwrap();
    let mut router = EventRouter::new(AppState::with_records(records));
    for query in ["a", "OL", "son", "ia", "k", "e ", "rown", "Chloe Young"] {
        search(&mut router, query);
        let needle = query.trim().to_lowercase();
        let expected: Vec<String> = NAMES
            .iter()
            .map(|(f, l)| format!("{f} {l}"))
            .filter(|n| n.to_lowercase().contains(&needle))
            .collect();
        assert!(!expected.is_empty(), "query {query:?} should match");
        assert_eq!(visible_names(&router), expected, "query {query:?}");
        assert!(router.state().gallery().message().is_none());
    }
}

#[test]
fn consecutive_misses_show_one_message() {
    let records = provider::parse_users(provider_body().as_bytes()).unwrap();
    let mut router = EventRouter::new(AppState::with_records(records));
    for query in ["xyz", "qq", "@example.com"] {
        assert_eq!(search(&mut router, query), SearchOutcome::NoResults);
        assert_eq!(router.state().gallery().message(), Some(NO_RESULTS_MESSAGE));
        assert_eq!(router.state().gallery().visible_len(), 0);
    }
    let text = String::from_utf8(crate::output::render_text(router.state())).unwrap();
    assert_eq!(text.matches(NO_RESULTS_MESSAGE).count(), 1);
}

#[test]
fn modal_round_trips_every_email() {
    let records = provider::parse_users(provider_body().as_bytes()).unwrap();
    let emails: Vec<String> = records.iter().map(|r| r.email.clone()).collect();
    let mut router = EventRouter::new(AppState::with_records(records));
    for e in emails {
        router
            .dispatch(Event::CardClicked {
                key: Some(e.clone()),
            })
            .unwrap();
        assert_eq!(router.state().modal().unwrap().detail.email, e);
    }
}

#[test]
fn previous_wraps_across_full_gallery() {
    let records = provider::parse_users(provider_body().as_bytes()).unwrap();
    let mut router = EventRouter::new(AppState::with_records(records));
    router
        .dispatch(Event::CardClicked {
            key: Some(email("Brad", "Gibson")),
        })
        .unwrap();
    router
        .dispatch(Event::NavClicked {
            direction: Direction::Previous,
            target: ControlTarget::Icon,
        })
        .unwrap();
    assert_eq!(
        router.state().modal().unwrap().detail.email,
        email("Chloe", "Young")
    );
}
