use serde::Serialize;

use crate::GeneratedDocumentSet;

/// Heading the prompts ask the model to open every document with.
pub const SEO_META_HEADING: &str = "### SEO Meta Data";

/// The one machine-readable contract between the prompts and this module:
/// everything before the first occurrence is metadata, everything after is
/// the page body. The remote service may ignore the contract, so parsing
/// degrades gracefully instead of failing.
pub const WEBSITE_CONTENT_DELIMITER: &str = "### Website Content";

/// Separator between rewritten news items in the combined copy payload.
pub const NEWS_COPY_SEPARATOR: &str = "\n\n---\n\n";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitDocument {
    pub meta: Option<String>,
    pub body: String,
}

/// Splits a generated document on the first `### Website Content`
/// delimiter. Without the delimiter the whole text is the body, untouched.
/// With it, the leading `### SEO Meta Data` heading is stripped from the
/// metadata block and both halves are trimmed.
pub fn split_document(text: &str) -> SplitDocument {
    match text.split_once(WEBSITE_CONTENT_DELIMITER) {
        None => SplitDocument {
            meta: None,
            body: text.to_string(),
        },
        Some((head, tail)) => {
            let meta = head.replacen(SEO_META_HEADING, "", 1).trim().to_string();
            SplitDocument {
                meta: (!meta.is_empty()).then_some(meta),
                body: tail.trim().to_string(),
            }
        }
    }
}

/// Combined copy payload for the news tab.
pub fn join_news(items: &[String]) -> String {
    items.join(NEWS_COPY_SEPARATOR)
}

/// API-facing rendering of one document: the raw text for copying plus the
/// split metadata/body halves for display.
#[derive(Clone, Debug, Serialize)]
pub struct DocumentView {
    pub raw: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
    pub body: String,
}

impl DocumentView {
    pub fn render(raw: &str) -> Self {
        let split = split_document(raw);
        Self {
            raw: raw.to_string(),
            meta: split.meta,
            body: split.body,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct DocumentSetView {
    pub home_page: DocumentView,
    pub about_page: DocumentView,
    pub contact_page: DocumentView,
    pub rewritten_news: Vec<DocumentView>,
    /// All rewritten news joined for one-shot copying.
    pub news_copy: String,
}

impl DocumentSetView {
    pub fn render(set: &GeneratedDocumentSet) -> Self {
        Self {
            home_page: DocumentView::render(&set.home_page),
            about_page: DocumentView::render(&set.about_page),
            contact_page: DocumentView::render(&set.contact_page),
            rewritten_news: set
                .rewritten_news
                .iter()
                .map(|news| DocumentView::render(news))
                .collect(),
            news_copy: join_news(&set.rewritten_news),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_delimiter_keeps_whole_text_as_body() {
        let split = split_document("no delimiter here");
        assert_eq!(split.meta, None);
        assert_eq!(split.body, "no delimiter here");
    }

    #[test]
    fn splits_meta_and_body_on_delimiter() {
        let split = split_document("### SEO Meta Data\nX\n### Website Content\nY");
        assert_eq!(split.meta.as_deref(), Some("X"));
        assert_eq!(split.body, "Y");
    }

    #[test]
    fn heading_only_head_yields_no_meta() {
        let split = split_document("### SEO Meta Data\n\n### Website Content\nbody text");
        assert_eq!(split.meta, None);
        assert_eq!(split.body, "body text");
    }

    #[test]
    fn splits_on_first_delimiter_occurrence_only() {
        let text = "meta\n### Website Content\nbody mentioning ### Website Content again";
        let split = split_document(text);
        assert_eq!(split.meta.as_deref(), Some("meta"));
        assert_eq!(split.body, "body mentioning ### Website Content again");
    }

    #[test]
    fn empty_document_degrades_to_empty_body() {
        let split = split_document("");
        assert_eq!(split.meta, None);
        assert_eq!(split.body, "");
    }

    #[test]
    fn joins_news_with_copy_separator() {
        let items = vec!["first".to_string(), "second".to_string()];
        assert_eq!(join_news(&items), "first\n\n---\n\nsecond");
        assert_eq!(join_news(&[]), "");
    }

    #[test]
    fn renders_document_set_view() {
        let set = GeneratedDocumentSet {
            home_page: "### SEO Meta Data\nmeta\n### Website Content\nhome".to_string(),
            about_page: "plain about".to_string(),
            contact_page: "plain contact".to_string(),
            rewritten_news: vec!["n1".to_string(), "n2".to_string()],
        };
        let view = DocumentSetView::render(&set);
        assert_eq!(view.home_page.meta.as_deref(), Some("meta"));
        assert_eq!(view.home_page.body, "home");
        assert_eq!(view.about_page.meta, None);
        assert_eq!(view.rewritten_news.len(), 2);
        assert_eq!(view.news_copy, "n1\n\n---\n\nn2");
    }
}
