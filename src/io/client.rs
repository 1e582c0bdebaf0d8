use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use serde_json::Value;

use crate::model::ServerConfig;
use crate::ops::encode::RecommendRequest;

/// Error type for recommendation service calls
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("could not reach the recommendation service: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("recommendation service answered {status}")]
    Status { status: u16 },
    #[error("recommendation service sent an unreadable body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Blocking HTTP client for `POST /timetable`
#[derive(Debug, Clone)]
pub struct RecommendClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl RecommendClient {
    pub fn new(config: &ServerConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::blocking::Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        Ok(RecommendClient {
            base_url: config.url.trim_end_matches('/').to_string(),
            http: builder.build()?,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/timetable", self.base_url)
    }

    /// Send the request and return the raw JSON payload
    pub fn recommend(&self, request: &RecommendRequest) -> Result<Value, ClientError> {
        let response = self.http.post(self.endpoint()).json(request).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
            });
        }
        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Outcome of a background request, delivered to the UI loop
#[derive(Debug)]
pub enum RequestEvent {
    Completed(Value),
    Failed(String),
}

/// Runs requests on background threads; the UI loop polls for outcomes.
///
/// Requests are never cancelled. Outcomes arrive in completion order, so
/// the last response to land wins.
pub struct RequestRunner {
    tx: mpsc::Sender<RequestEvent>,
    rx: mpsc::Receiver<RequestEvent>,
}

impl Default for RequestRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestRunner {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        RequestRunner { tx, rx }
    }

    /// Fire a request without waiting for it
    pub fn spawn(&self, client: RecommendClient, request: RecommendRequest) {
        let tx = self.tx.clone();
        tracing::info!(
            courses = request.courses.len(),
            preferences = request.timetable_preferences.len(),
            endpoint = %client.endpoint(),
            "requesting recommendations"
        );
        thread::spawn(move || {
            let event = match client.recommend(&request) {
                Ok(payload) => RequestEvent::Completed(payload),
                Err(e) => RequestEvent::Failed(e.to_string()),
            };
            let _ = tx.send(event);
        });
    }

    /// Non-blocking poll for finished requests.
    /// Returns all queued events (may be empty).
    pub fn poll(&self) -> Vec<RequestEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.rx.try_recv() {
            events.push(evt);
        }
        events
    }
}
