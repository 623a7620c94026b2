//! HTTP adapter for the document-chat service.
//!
//! Speaks the service's three endpoints: `/process-pdf` (multipart upload),
//! `/chat` (question + context), and `/generate-followup` (suggestions).
//! Transport failures map to `ChatError::Network`, non-success statuses to
//! `ChatError::Backend` with the status and response body attached.

use async_trait::async_trait;
use log::debug;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use docchat_core::ports::{Answer, BackendPort};
use docchat_types::{config::BackendConfig, message::ContextMessage, ChatError, Result};

const PDF_MIME: &str = "application/pdf";

/// Client for the remote question-answering service.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Turn a non-success response into a `ChatError::Backend` carrying
    /// the status and whatever body the service sent back.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        Err(ChatError::Backend(format!("HTTP {}: {}", status, text)))
    }
}

#[async_trait(?Send)]
impl BackendPort for HttpBackend {
    async fn ingest_document(&self, file_name: &str, bytes: Vec<u8>) -> Result<()> {
        let url = self.endpoint("process-pdf");
        debug!("uploading {} ({} bytes) to {}", file_name, bytes.len(), url);

        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(PDF_MIME)
            .map_err(|e| ChatError::Other(e.to_string()))?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        Self::check_status(response).await?;
        Ok(())
    }

    async fn ask(&self, question: &str, context: Vec<ContextMessage>) -> Result<Answer> {
        let url = self.endpoint("chat");
        let body = AskRequest {
            question,
            chat_context: context,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        let data: AskResponse = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| ChatError::Serialization(e.to_string()))?;

        Ok(Answer {
            message: data.message,
            relevant_pages: data.relevant_pages,
        })
    }

    async fn follow_ups(&self, current_text: &str) -> Result<Vec<String>> {
        let url = self.endpoint("generate-followup");
        let body = FollowUpRequest { current_text };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        let suggestions: Vec<String> = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| ChatError::Serialization(e.to_string()))?;

        Ok(suggestions)
    }
}

// ─── Wire types ──────────────────────────────────────────────

#[derive(Serialize)]
struct AskRequest<'a> {
    question: &'a str,
    chat_context: Vec<ContextMessage>,
}

#[derive(Deserialize)]
struct AskResponse {
    message: String,
    #[serde(default)]
    relevant_pages: Vec<u32>,
}

#[derive(Serialize)]
struct FollowUpRequest<'a> {
    current_text: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use docchat_types::message::Role;

    fn backend(url: &str) -> HttpBackend {
        HttpBackend::new(&BackendConfig {
            base_url: url.to_string(),
        })
    }

    #[test]
    fn test_endpoint_joining_strips_duplicate_slashes() {
        let b = backend("http://localhost:8080/");
        assert_eq!(b.endpoint("/chat"), "http://localhost:8080/chat");
        assert_eq!(b.endpoint("process-pdf"), "http://localhost:8080/process-pdf");
    }

    #[test]
    fn test_ask_request_wire_shape() {
        let body = AskRequest {
            question: "What is the total?",
            chat_context: vec![
                ContextMessage {
                    role: Role::User,
                    content: "hi".to_string(),
                },
                ContextMessage {
                    role: Role::Assistant,
                    content: "hello".to_string(),
                },
            ],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["question"], "What is the total?");
        assert_eq!(json["chat_context"][0]["role"], "user");
        assert_eq!(json["chat_context"][1]["role"], "assistant");
        assert_eq!(json["chat_context"][1]["content"], "hello");
    }

    #[test]
    fn test_ask_response_parses_pages() {
        let data: AskResponse =
            serde_json::from_str(r#"{"message":"$5M","relevant_pages":[3,5]}"#).unwrap();
        assert_eq!(data.message, "$5M");
        assert_eq!(data.relevant_pages, vec![3, 5]);
    }

    #[test]
    fn test_ask_response_pages_default_empty() {
        let data: AskResponse = serde_json::from_str(r#"{"message":"no sources"}"#).unwrap();
        assert!(data.relevant_pages.is_empty());
    }

    #[test]
    fn test_follow_up_request_wire_shape() {
        let body = FollowUpRequest {
            current_text: "The revenue was $5M.",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["current_text"], "The revenue was $5M.");
    }

    #[test]
    fn test_follow_up_response_is_plain_string_array() {
        let suggestions: Vec<String> =
            serde_json::from_str(r#"["What about costs?","Who signed it?"]"#).unwrap();
        assert_eq!(suggestions.len(), 2);
    }
}
