pub mod wire;

use thiserror::Error;

use crate::model::EmployeeRecord;

pub const DEFAULT_ENDPOINT: &str = "https://randomuser.me/api/";
pub const DEFAULT_RESULTS: u32 = 12;
pub const DEFAULT_NATIONALITIES: [&str; 5] = ["us", "au", "ca", "gb", "nz"];

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("invalid endpoint URL: {url}")]
    InvalidEndpoint { url: String },

    #[error("There was an error: {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode provider response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read records file: {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Builds `<endpoint>?results=N&nat=a,b,c`.
pub fn build_users_url(
    endpoint: &str,
    results: u32,
    nationalities: &[String],
) -> Result<reqwest::Url, ProviderError> {
    let mut url = reqwest::Url::parse(endpoint).map_err(|_| ProviderError::InvalidEndpoint {
        url: endpoint.to_string(),
    })?;
    url.query_pairs_mut()
        .append_pair("results", &results.to_string());
    if !nationalities.is_empty() {
        // `nat` goes in verbatim so the comma list is not percent-encoded.
        let query = format!(
            "{}&nat={}",
            url.query().unwrap_or_default(),
            nationalities.join(",")
        );
        url.set_query(Some(&query));
    }
    Ok(url)
}

pub fn check_status(status: reqwest::StatusCode) -> Result<(), ProviderError> {
    if status.is_success() {
        return Ok(());
    }
    Err(ProviderError::Status {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("").to_string(),
    })
}

pub fn parse_users(body: &[u8]) -> Result<Vec<EmployeeRecord>, ProviderError> {
    let response: wire::UsersResponse =
        serde_json::from_slice(body).map_err(|e| ProviderError::Decode { source: e })?;
    Ok(response.into_records())
}

pub async fn fetch_users(
    client: &reqwest::Client,
    url: reqwest::Url,
) -> Result<Vec<EmployeeRecord>, ProviderError> {
    let transport = |source| ProviderError::Transport {
        url: url.to_string(),
        source,
    };
    let response = client.get(url.clone()).send().await.map_err(transport)?;
    check_status(response.status())?;
    let body = response.bytes().await.map_err(transport)?;
    parse_users(&body)
}

pub async fn read_users_file(path: &str) -> Result<Vec<EmployeeRecord>, ProviderError> {
    let body = tokio::fs::read(path)
        .await
        .map_err(|e| ProviderError::FileRead {
            path: path.to_string(),
            source: e,
        })?;
    parse_users(&body)
}

#[cfg(test)]
pub(crate) const SAMPLE_BODY: &str = r#"{
  "results": [
    {
      "gender": "male",
      "name": { "title": "Mr", "first": "Brad", "last": "Gibson" },
      "location": {
        "street": { "number": 9278, "name": "New Road" },
        "city": "Kilcoole",
        "state": "Waterford",
        "country": "Ireland",
        "postcode": "93027"
      },
      "email": "brad.gibson@example.com",
      "dob": { "date": "1993-07-20T09:44:18.674Z", "age": 26 },
      "phone": "011-962-7516",
      "picture": { "large": "https://randomuser.me/api/portraits/men/75.jpg" }
    },
    {
      "name": { "first": "Ella", "last": "Moore" },
      "location": {
        "street": "4821 Queen St",
        "city": "Auckland",
        "state": "Auckland",
        "postcode": 62741
      },
      "email": "ella.moore@example.com",
      "dob": { "date": "1988-01-02T00:00:00Z" },
      "phone": "(093)-123-4567",
      "picture": { "large": "https://randomuser.me/api/portraits/women/2.jpg" }
    }
  ],
  "info": { "seed": "abc", "results": 2, "page": 1, "version": "1.4" }
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_carries_result_count_and_nationalities() {
        let nats: Vec<String> = DEFAULT_NATIONALITIES.iter().map(|s| s.to_string()).collect();
        let url = build_users_url(DEFAULT_ENDPOINT, DEFAULT_RESULTS, &nats).unwrap();
        assert_eq!(
            url.as_str(),
            "https://randomuser.me/api/?results=12&nat=us,au,ca,gb,nz"
        );
    }

    #[test]
    fn url_rejects_garbage_endpoint() {
        assert!(matches!(
            build_users_url("not a url", 1, &[]),
            Err(ProviderError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn status_error_reads_like_the_log_line() {
        let err = check_status(reqwest::StatusCode::SERVICE_UNAVAILABLE).unwrap_err();
        assert_eq!(err.to_string(), "There was an error: 503 Service Unavailable");
        assert!(check_status(reqwest::StatusCode::OK).is_ok());
    }

    #[test]
    fn parses_both_street_and_postcode_shapes() {
        let records = parse_users(SAMPLE_BODY.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name.full(), "Brad Gibson");
        assert_eq!(records[0].address.street, "9278 New Road");
        assert_eq!(records[0].address.postal_code, "93027");
        assert_eq!(records[1].address.street, "4821 Queen St");
        assert_eq!(records[1].address.postal_code, "62741");
        assert_eq!(records[1].birth_date, "1988-01-02T00:00:00Z");
    }

    #[test]
    fn rejects_body_without_results() {
        assert!(matches!(
            parse_users(br#"{"error":"Uh oh"}"#),
            Err(ProviderError::Decode { .. })
        ));
    }
}
