use crate::document::SEO_META_HEADING;

// Common text blocks for all prompts
pub const BASE_INSTRUCTIONS: &str = r#"
Format the output strictly in Markdown.
Ensure the content is "WordPress Ready" - easy to copy and paste.
Use <a href="...">...</a> tags for internal links to ensure they persist when copied.
"#;

/// Strips one trailing slash so composed links never double it up.
pub fn clean_base_url(base_url: &str) -> &str {
    base_url.strip_suffix('/').unwrap_or(base_url)
}

/// Machine-parseable metadata block every document must open with. The
/// splitter relies on the literal heading, so it is never reworded here.
pub fn seo_header(base_url: &str, slug: &str) -> String {
    format!(
        r#"
{heading}
**Title Tag:** [Generate a catchy SEO Title, max 60 chars]
**Meta Description:** [Generate a compelling description, max 160 chars]
**Permalink:** {base}/{slug}
"#,
        heading = SEO_META_HEADING,
        base = clean_base_url(base_url),
        slug = slug
    )
}

/// Canonical internal-link map handed to the model with every request.
pub fn internal_link_guide(base_url: &str) -> String {
    let clean = clean_base_url(base_url);
    format!(
        r#"
**Internal Linking Strategy (MANDATORY):**
- When mentioning "Contact Us" or "ติดต่อเรา", link to: "{clean}/contact-us"
- When mentioning "About Us" or "เกี่ยวกับเรา", link to: "{clean}/about-us"
- When mentioning "Home" or "หน้าแรก", link to: "{clean}"
- Try to naturally include at least 2 internal links in the body content.
"#,
        clean = clean
    )
}
