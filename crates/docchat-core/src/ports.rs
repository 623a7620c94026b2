//! Port trait — the boundary between the orchestration core and platform code.
//!
//! The trait is defined here in `docchat-core` (pure Rust).
//! The HTTP implementation lives in `docchat-backend`.
//! The core never imports platform code; it only depends on this trait.

use async_trait::async_trait;
use docchat_types::{message::ContextMessage, Result};

/// A document handed to the orchestrator for ingest.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub file_name: String,
    /// MIME type as reported by the file source. Checked before any
    /// network call; only `application/pdf` is accepted.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Parsed reply to an ask request.
#[derive(Debug, Clone)]
pub struct Answer {
    pub message: String,
    pub relevant_pages: Vec<u32>,
}

/// The remote question-answering service. Stateless between calls.
#[async_trait(?Send)]
pub trait BackendPort {
    /// Upload a document for extraction and indexing.
    async fn ingest_document(&self, file_name: &str, bytes: Vec<u8>) -> Result<()>;

    /// Ask a question together with the conversation context captured
    /// at issue time.
    async fn ask(&self, question: &str, context: Vec<ContextMessage>) -> Result<Answer>;

    /// Request follow-up question suggestions for the given answer text.
    async fn follow_ups(&self, current_text: &str) -> Result<Vec<String>>;
}
