use super::common::{clean_base_url, internal_link_guide, seo_header, BASE_INSTRUCTIONS};
use crate::document::WEBSITE_CONTENT_DELIMITER;

pub fn news_rewrite_prompt(province: &str, base_url: &str, news_content: &str) -> String {
    format!(
        r#"Role: Senior Real Estate News Editor.
Language: Thai (ภาษาไทย).

Task: Rewrite the provided news/article to be high-quality, SEO-friendly content for the "Real Estate Association of {province}" website.

Input News:
"""
{news_content}
"""
{base_instructions}
{seo_header}
{link_guide}
{delimiter}

**Content Requirements:**
1. H1: Create a catchy, click-worthy headline relevant to the content.
2. **Introduction**: engaging hook summarizing the key point.
3. **Body**: Expand the news to 300-500 words. Make it easy to read.
   - Use subheadings (H2, H3).
   - Use bullet points for lists.
4. **Analysis/Conclusion**: Add a paragraph relating this news to the {province} real estate market context.
5. Tone: Professional, Informative, Encouraging.
6. **Internal Link**: At the end, invite readers to contact the association: "หากมีข้อสงสัย <a href='{clean_url}/contact-us'>ติดต่อสมาคมฯ</a>"."#,
        province = province,
        news_content = news_content,
        base_instructions = BASE_INSTRUCTIONS,
        seo_header = seo_header(base_url, "news/news-title-slug-placeholder"),
        link_guide = internal_link_guide(base_url),
        delimiter = WEBSITE_CONTENT_DELIMITER,
        clean_url = clean_base_url(base_url)
    )
}
