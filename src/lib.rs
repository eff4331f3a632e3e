pub mod document;
pub mod generator;
pub mod llm;
pub mod logging;
pub mod prompt;
pub mod session;
pub mod web;

use serde::Serialize;

pub const TARGET_WEB_REQUEST: &str = "web_request";
pub const TARGET_LLM_REQUEST: &str = "llm_request";

/// A user-entered news item awaiting rewrite. Identifiers are unique within
/// a session and never reused after removal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewsDraft {
    pub id: u64,
    pub content: String,
}

/// One complete batch of generated documents. Only constructed when every
/// request in the batch succeeded; partial sets do not exist.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GeneratedDocumentSet {
    pub home_page: String,
    pub about_page: String,
    pub contact_page: String,
    /// One rewrite per qualifying draft, in draft submission order.
    pub rewritten_news: Vec<String>,
}

/// Session-level outcome of the latest generation attempt.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum GenerationStatus {
    #[default]
    Idle,
    Loading,
    Success(GeneratedDocumentSet),
    Error(String),
}
