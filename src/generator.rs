use futures::future::try_join_all;
use tracing::{debug, info};

use crate::llm::{LlmError, TextGenerator};
use crate::prompt;
use crate::{GeneratedDocumentSet, NewsDraft, TARGET_LLM_REQUEST};

/// Drafts whose trimmed content is this many characters or fewer are
/// silently excluded from the batch.
pub const MIN_NEWS_DRAFT_CHARS: usize = 10;

/// Immutable inputs for one generation attempt.
#[derive(Clone, Copy, Debug)]
pub struct SiteContext<'a> {
    pub province: &'a str,
    pub base_url: &'a str,
}

pub fn qualifying_drafts(drafts: &[NewsDraft]) -> Vec<&NewsDraft> {
    drafts
        .iter()
        .filter(|draft| draft.content.trim().chars().count() > MIN_NEWS_DRAFT_CHARS)
        .collect()
}

/// Issues the full batch concurrently: one request each for the home,
/// about and contact pages plus one rewrite per qualifying news draft.
/// The first failure aborts the batch; results from the other requests
/// are discarded rather than exposed. On success the news rewrites keep
/// the drafts' submission order regardless of completion order.
pub async fn generate_site(
    llm: &dyn TextGenerator,
    api_key: &str,
    context: &SiteContext<'_>,
    drafts: &[NewsDraft],
) -> Result<GeneratedDocumentSet, LlmError> {
    let qualifying = qualifying_drafts(drafts);
    info!(
        target: TARGET_LLM_REQUEST,
        "Generating site content for province {}: 3 page requests plus {} news rewrites",
        context.province,
        qualifying.len()
    );

    let home_prompt = prompt::home_page_prompt(context.province, context.base_url);
    let about_prompt = prompt::about_page_prompt(context.province, context.base_url);
    let contact_prompt = prompt::contact_page_prompt(context.province, context.base_url);
    let news_prompts: Vec<String> = qualifying
        .iter()
        .map(|draft| prompt::news_rewrite_prompt(context.province, context.base_url, &draft.content))
        .collect();

    // Only the contact page is grounded with search so the model can pull
    // real contact details.
    let (home_page, about_page, contact_page, rewritten_news) = tokio::try_join!(
        llm.generate(api_key, &home_prompt, false),
        llm.generate(api_key, &about_prompt, false),
        llm.generate(api_key, &contact_prompt, true),
        try_join_all(
            news_prompts
                .iter()
                .map(|news_prompt| llm.generate(api_key, news_prompt, false))
        ),
    )?;

    debug!(
        target: TARGET_LLM_REQUEST,
        "Generation batch complete ({} news rewrites)",
        rewritten_news.len()
    );

    Ok(GeneratedDocumentSet {
        home_page,
        about_page,
        contact_page,
        rewritten_news,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    const CONTEXT: SiteContext<'static> = SiteContext {
        province: "เชียงใหม่",
        base_url: "https://example.com",
    };

    fn draft(id: u64, content: &str) -> NewsDraft {
        NewsDraft {
            id,
            content: content.to_string(),
        }
    }

    /// Scripted stand-in for the Gemini client. News rewrites answer after
    /// a delay encoded in the draft text, so completion order can be forced
    /// to differ from submission order.
    struct ScriptedGenerator {
        calls: AtomicUsize,
        fail_grounded: bool,
    }

    impl ScriptedGenerator {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_grounded: false,
            }
        }

        fn failing_grounded() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_grounded: true,
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(
            &self,
            _api_key: &str,
            prompt: &str,
            use_search_grounding: bool,
        ) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_grounded && use_search_grounding {
                return Err(LlmError::Service("API key not valid".to_string()));
            }
            if let Some(source) = prompt.split("\"\"\"").nth(1) {
                let source = source.trim();
                let delay = if source.contains("(slow)") {
                    40
                } else if source.contains("(medium)") {
                    20
                } else {
                    5
                };
                tokio::time::sleep(Duration::from_millis(delay)).await;
                return Ok(format!("rewritten: {source}"));
            }
            if prompt.contains("Create the Home Page content") {
                Ok("home".to_string())
            } else if prompt.contains("Task: Write an \"About Us\"") {
                Ok("about".to_string())
            } else {
                Ok("contact".to_string())
            }
        }
    }

    #[test]
    fn short_drafts_do_not_qualify() {
        let drafts = vec![
            draft(1, ""),
            draft(2, "short"),
            draft(3, "this is definitely long enough"),
            draft(4, "   padded but still tiny   "),
        ];
        let qualifying = qualifying_drafts(&drafts);
        assert_eq!(qualifying.len(), 2);
        assert_eq!(qualifying[0].id, 3);
        assert_eq!(qualifying[1].id, 4);
    }

    #[test]
    fn threshold_is_strictly_greater_than_ten() {
        assert!(qualifying_drafts(&[draft(1, "0123456789")]).is_empty());
        assert_eq!(qualifying_drafts(&[draft(1, "0123456789a")]).len(), 1);
    }

    #[tokio::test]
    async fn issues_one_invocation_per_qualifying_draft() {
        let llm = ScriptedGenerator::new();
        let drafts = vec![
            draft(1, ""),
            draft(2, "short"),
            draft(3, "this is definitely long enough"),
        ];
        let set = generate_site(&llm, "key", &CONTEXT, &drafts).await.unwrap();
        assert_eq!(llm.call_count(), 4);
        assert_eq!(set.rewritten_news.len(), 1);
        assert_eq!(
            set.rewritten_news[0],
            "rewritten: this is definitely long enough"
        );
    }

    #[tokio::test]
    async fn no_qualifying_drafts_is_a_valid_empty_batch() {
        let llm = ScriptedGenerator::new();
        let set = generate_site(&llm, "key", &CONTEXT, &[draft(1, "short")])
            .await
            .unwrap();
        assert_eq!(llm.call_count(), 3);
        assert_eq!(set.home_page, "home");
        assert_eq!(set.about_page, "about");
        assert_eq!(set.contact_page, "contact");
        assert!(set.rewritten_news.is_empty());
    }

    #[tokio::test]
    async fn news_results_keep_submission_order() {
        let llm = ScriptedGenerator::new();
        let drafts = vec![
            draft(1, "first qualifying news draft (slow)"),
            draft(2, "second qualifying news draft (medium)"),
            draft(3, "third qualifying news draft"),
        ];
        let set = generate_site(&llm, "key", &CONTEXT, &drafts).await.unwrap();
        assert_eq!(
            set.rewritten_news,
            vec![
                "rewritten: first qualifying news draft (slow)".to_string(),
                "rewritten: second qualifying news draft (medium)".to_string(),
                "rewritten: third qualifying news draft".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn one_failure_fails_the_whole_batch() {
        let llm = ScriptedGenerator::failing_grounded();
        let drafts = vec![draft(1, "this is definitely long enough")];
        let result = generate_site(&llm, "key", &CONTEXT, &drafts).await;
        match result {
            Err(LlmError::Service(message)) => assert_eq!(message, "API key not valid"),
            other => panic!("expected a failed batch, got {other:?}"),
        }
    }
}
