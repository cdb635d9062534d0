//! Shop-assistant client.
//!
//! Forwards chat messages to the hosted generative-language model
//! (`generateContent` REST call). Intent understanding is entirely the
//! model's job; this client only frames the message with a shop-assistant
//! prompt and extracts the first candidate's text.

use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::ClientError;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Framing prepended to every user message.
const ASSISTANT_PROMPT: &str = "Sei l'assistente virtuale di Bottega, un negozio online di \
     alimentari, medicinali e articoli vari. Rispondi in modo cortese e \
     conciso alla domanda del cliente.";

/// Client for the generative-language model.
#[derive(Debug, Clone)]
pub struct AssistantClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl AssistantClient {
    /// Creates a client for a model behind the default endpoint.
    pub fn new(api_key: &str, model: &str) -> Result<Self, reqwest::Error> {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL)
    }

    /// Creates a client against an explicit base URL (tests point this at
    /// a local fake).
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        base_url: &str,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::new();
        Ok(AssistantClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }

    /// Sends one chat message and returns the model's reply text.
    pub async fn ask(&self, message: &str) -> Result<String, ClientError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        debug!(model = %self.model, "Forwarding chat message to assistant");

        let body = json!({
            "contents": [{
                "parts": [{ "text": format!("{ASSISTANT_PROMPT}\n\nCliente: {message}") }]
            }]
        });

        let response = self.http.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        extract_reply(parsed)
    }
}

/// Pulls the first candidate's first text part out of the response.
fn extract_reply(response: GenerateResponse) -> Result<String, ClientError> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().next())
        .map(|p| p.text)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ClientError::UnexpectedResponse("no candidate text".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_reply() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "Certo! Il pane è in offerta."}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_reply(response).unwrap(), "Certo! Il pane è in offerta.");
    }

    #[test]
    fn test_extract_reply_empty_candidates() {
        let response: GenerateResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(matches!(
            extract_reply(response),
            Err(ClientError::UnexpectedResponse(_))
        ));
    }
}
