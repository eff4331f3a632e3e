use thiserror::Error;
use url::Url;

use crate::llm::LlmError;
use crate::{GeneratedDocumentSet, GenerationStatus, NewsDraft};

pub const MIN_NEWS_DRAFTS: usize = 1;
pub const MAX_NEWS_DRAFTS: usize = 5;
const INITIAL_NEWS_DRAFTS: u64 = 3;

// User-facing messages, surfaced verbatim in the Thai interface.
pub const MISSING_API_KEY_MESSAGE: &str = "กรุณากรอก API Key";
pub const MISSING_PROVINCE_MESSAGE: &str = "กรุณากรอกชื่อจังหวัด";
pub const GENERIC_FAILURE_MESSAGE: &str =
    "เกิดข้อผิดพลาดในการสร้างเนื้อหา โปรดตรวจสอบ API Key หรือลองใหม่อีกครั้ง";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("{0}")]
    MissingConfiguration(&'static str),
    #[error("a generation batch is already in flight")]
    BatchInFlight,
    #[error("a session keeps between 1 and 5 news drafts")]
    DraftLimit,
    #[error("no news draft with id {0}")]
    UnknownDraft(u64),
}

/// Everything one generation attempt needs, captured when the attempt
/// begins and immutable for its lifetime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttemptContext {
    pub api_key: String,
    pub province: String,
    pub base_url: String,
    pub drafts: Vec<NewsDraft>,
}

/// The single in-memory form session: user-entered configuration, the news
/// draft list, and the outcome of the latest generation attempt. All edits
/// are rejected while a batch is in flight, and the status has exactly one
/// writer per attempt.
pub struct FormState {
    pub api_key: String,
    pub province: String,
    pub base_url: String,
    drafts: Vec<NewsDraft>,
    next_draft_id: u64,
    status: GenerationStatus,
}

impl FormState {
    pub fn new(default_api_key: Option<String>) -> Self {
        let drafts = (1..=INITIAL_NEWS_DRAFTS)
            .map(|id| NewsDraft {
                id,
                content: String::new(),
            })
            .collect();
        Self {
            api_key: default_api_key.unwrap_or_default(),
            province: String::new(),
            base_url: String::new(),
            drafts,
            next_draft_id: INITIAL_NEWS_DRAFTS + 1,
            status: GenerationStatus::Idle,
        }
    }

    pub fn drafts(&self) -> &[NewsDraft] {
        &self.drafts
    }

    pub fn status(&self) -> &GenerationStatus {
        &self.status
    }

    fn ensure_editable(&self) -> Result<(), SessionError> {
        if matches!(self.status, GenerationStatus::Loading) {
            Err(SessionError::BatchInFlight)
        } else {
            Ok(())
        }
    }

    pub fn set_config(
        &mut self,
        api_key: Option<String>,
        province: Option<String>,
        base_url: Option<String>,
    ) -> Result<(), SessionError> {
        self.ensure_editable()?;
        if let Some(api_key) = api_key {
            self.api_key = api_key;
        }
        if let Some(province) = province {
            self.province = province;
        }
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        Ok(())
    }

    /// Appends an empty draft and returns its id. The ceiling of
    /// [`MAX_NEWS_DRAFTS`] is enforced here, not by the orchestrator.
    pub fn add_draft(&mut self) -> Result<u64, SessionError> {
        self.ensure_editable()?;
        if self.drafts.len() >= MAX_NEWS_DRAFTS {
            return Err(SessionError::DraftLimit);
        }
        let id = self.next_draft_id;
        self.next_draft_id += 1;
        self.drafts.push(NewsDraft {
            id,
            content: String::new(),
        });
        Ok(id)
    }

    pub fn update_draft(&mut self, id: u64, content: String) -> Result<(), SessionError> {
        self.ensure_editable()?;
        match self.drafts.iter_mut().find(|draft| draft.id == id) {
            Some(draft) => {
                draft.content = content;
                Ok(())
            }
            None => Err(SessionError::UnknownDraft(id)),
        }
    }

    pub fn remove_draft(&mut self, id: u64) -> Result<(), SessionError> {
        self.ensure_editable()?;
        if self.drafts.len() <= MIN_NEWS_DRAFTS {
            return Err(SessionError::DraftLimit);
        }
        let before = self.drafts.len();
        self.drafts.retain(|draft| draft.id != id);
        if self.drafts.len() == before {
            return Err(SessionError::UnknownDraft(id));
        }
        Ok(())
    }

    /// Validates the configuration before any network activity, captures
    /// the attempt context, and transitions into the loading state. Fails
    /// when a batch is already in flight.
    pub fn begin_attempt(&mut self) -> Result<AttemptContext, SessionError> {
        self.ensure_editable()?;
        if self.api_key.trim().is_empty() {
            return Err(SessionError::MissingConfiguration(MISSING_API_KEY_MESSAGE));
        }
        if self.province.trim().is_empty() {
            return Err(SessionError::MissingConfiguration(MISSING_PROVINCE_MESSAGE));
        }
        let context = AttemptContext {
            api_key: self.api_key.clone(),
            province: self.province.trim().to_string(),
            base_url: normalize_base_url(&self.base_url),
            drafts: self.drafts.clone(),
        };
        self.status = GenerationStatus::Loading;
        Ok(context)
    }

    /// Writes the attempt outcome. Called exactly once per attempt, after
    /// the whole batch settled.
    pub fn finish_attempt(&mut self, outcome: Result<GeneratedDocumentSet, LlmError>) {
        self.status = match outcome {
            Ok(set) => GenerationStatus::Success(set),
            Err(err) => GenerationStatus::Error(failure_message(&err)),
        };
    }
}

fn failure_message(err: &LlmError) -> String {
    match err {
        LlmError::Service(message) if message.trim().is_empty() => {
            GENERIC_FAILURE_MESSAGE.to_string()
        }
        other => other.to_string(),
    }
}

/// Prepends `https://` when the entered URL has no recognized scheme. A
/// trailing slash survives normalization; only link composition strips it.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    match Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => trimmed.to_string(),
        _ => format!("https://{trimmed}"),
    }
}
