use crate::parse::parse_sample;
use dash_core::{DashError, Result, Sample};
use std::collections::VecDeque;
use std::future::Future;

/// Something that can produce the latest sample on demand.
///
/// The poll loop drives exactly one `fetch` per tick, awaited inline, so
/// implementations never see overlapping calls and samples reach the store
/// in true chronological order.
pub trait SampleSource: Send + 'static {
    fn fetch(&mut self) -> impl Future<Output = Result<Sample>> + Send;
}

/// Fetches the sample document from an HTTP endpoint.
///
/// Non-success status codes count as failed polls; the body is parsed with
/// [`parse_sample`]. No request timeout beyond the transport default.
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl SampleSource for HttpSource {
    async fn fetch(&mut self) -> Result<Sample> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| DashError::Poll(format!("GET {}: {e}", self.url)))?
            .error_for_status()
            .map_err(|e| DashError::Poll(format!("GET {}: {e}", self.url)))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| DashError::Poll(format!("GET {}: read body: {e}", self.url)))?;

        parse_sample(&body)
    }
}

/// In-memory source replaying scripted outcomes — deterministic playback
/// for tests and demos.
pub struct ScriptedSource {
    outcomes: VecDeque<Result<Sample>>,
}

impl ScriptedSource {
    pub fn new(outcomes: impl IntoIterator<Item = Result<Sample>>) -> Self {
        Self {
            outcomes: outcomes.into_iter().collect(),
        }
    }
}

impl SampleSource for ScriptedSource {
    async fn fetch(&mut self) -> Result<Sample> {
        self.outcomes
            .pop_front()
            .unwrap_or_else(|| Err(DashError::Poll("script exhausted".into())))
    }
}
