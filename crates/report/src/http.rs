use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use duesbook_core::Snapshot;

use crate::error::ReportError;
use crate::{prompt, ReportGenerator, ReportKind};

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    text: String,
}

/// Blocking client for an external text-generation endpoint. One request
/// per report; the call is synchronous and the caller treats any failure
/// as "no report", never as corrupted state.
pub struct HttpReportGenerator {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl HttpReportGenerator {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }
}

impl ReportGenerator for HttpReportGenerator {
    fn generate(&self, kind: &ReportKind, snapshot: &Snapshot) -> Result<String, ReportError> {
        let prompt = prompt::compose(kind, snapshot);
        let request = GenerateRequest {
            model: &self.model,
            prompt: &prompt,
        };

        let response: GenerateResponse = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()?
            .error_for_status()?
            .json()?;

        if response.text.trim().is_empty() {
            return Err(ReportError::EmptyResponse);
        }
        Ok(response.text)
    }
}
