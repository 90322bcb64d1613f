use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;

use crate::model::EmployeeRecord;
use crate::provider::{self, ProviderError};

#[derive(Clone, Debug)]
pub enum RecordSource {
    Remote,
    FilePath(String),
}

#[derive(Clone, Debug)]
pub struct Options {
    pub endpoint: String,
    pub results: u32,
    pub nationalities: Vec<String>,
    pub source: RecordSource,
    pub timeout_seconds: usize,
    pub proxy: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            endpoint: provider::DEFAULT_ENDPOINT.to_string(),
            results: provider::DEFAULT_RESULTS,
            nationalities: provider::DEFAULT_NATIONALITIES
                .iter()
                .map(|n| n.to_string())
                .collect(),
            source: RecordSource::Remote,
            timeout_seconds: 10,
            proxy: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("invalid results {value}, expected 1..=5000")]
    InvalidResults { value: u32 },

    #[error("invalid timeout {value}, expected positive integer")]
    InvalidTimeout { value: usize },

    #[error("failed to build HTTP client: {source}")]
    HttpClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to setup proxy: {proxy}: {source}")]
    ProxySetup {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

#[derive(Clone, Debug)]
pub struct LoadResult {
    pub elapsed: Duration,
    pub origin: String,
    pub records: Vec<EmployeeRecord>,
}

#[derive(Clone, Debug)]
pub struct Runner {
    options: Options,
}

impl Runner {
    pub fn new(options: Options) -> Result<Self, RunnerError> {
        if options.results == 0 || options.results > 5000 {
            return Err(RunnerError::InvalidResults {
                value: options.results,
            });
        }
        if options.timeout_seconds == 0 {
            return Err(RunnerError::InvalidTimeout {
                value: options.timeout_seconds,
            });
        }
        Ok(Self { options })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn origin(&self) -> Result<String, RunnerError> {
        match &self.options.source {
            RecordSource::FilePath(path) => Ok(path.clone()),
            RecordSource::Remote => Ok(provider::build_users_url(
                &self.options.endpoint,
                self.options.results,
                &self.options.nationalities,
            )?
            .to_string()),
        }
    }

    pub async fn run(&self) -> Result<LoadResult, RunnerError> {
        let started_at = Instant::now();
        let (origin, records) = match &self.options.source {
            RecordSource::FilePath(path) => {
                (path.clone(), provider::read_users_file(path).await?)
            }
            RecordSource::Remote => {
                let url = provider::build_users_url(
                    &self.options.endpoint,
                    self.options.results,
                    &self.options.nationalities,
                )?;
                let client =
                    build_client(self.options.proxy.as_deref(), self.options.timeout_seconds)?;
                (url.to_string(), provider::fetch_users(&client, url).await?)
            }
        };
        Ok(LoadResult {
            elapsed: started_at.elapsed(),
            origin,
            records,
        })
    }
}

fn build_client(proxy: Option<&str>, timeout_seconds: usize) -> Result<reqwest::Client, RunnerError> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_static(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        )),
    );

    let timeout = Duration::from_secs(timeout_seconds.try_into().unwrap_or(10));
    let mut builder = reqwest::Client::builder()
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(10))
        .timeout(timeout);

    if let Some(proxy) = proxy.filter(|p| !p.trim().is_empty()) {
        let proxy = reqwest::Proxy::all(proxy).map_err(|e| RunnerError::ProxySetup {
            proxy: proxy.to_string(),
            source: e,
        })?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| RunnerError::HttpClientBuild { source: e })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_results() {
        let err = Runner::new(Options {
            results: 0,
            ..Options::default()
        })
        .unwrap_err();
        assert!(matches!(err, RunnerError::InvalidResults { value: 0 }));
    }

    #[test]
    fn rejects_zero_timeout() {
        assert!(matches!(
            Runner::new(Options {
                timeout_seconds: 0,
                ..Options::default()
            }),
            Err(RunnerError::InvalidTimeout { .. })
        ));
    }

    #[test]
    fn origin_names_the_request_url() {
        let runner = Runner::new(Options::default()).unwrap();
        assert!(runner
            .origin()
            .unwrap()
            .starts_with("https://randomuser.me/api/?results=12&nat="));
    }
}
