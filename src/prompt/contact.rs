use super::common::{clean_base_url, internal_link_guide, seo_header, BASE_INSTRUCTIONS};
use crate::document::WEBSITE_CONTENT_DELIMITER;

/// Contact page request. The only kind dispatched with search grounding:
/// the model is asked to look up the association's real contact details
/// before composing, and to flag placeholders when nothing is found.
pub fn contact_page_prompt(province: &str, base_url: &str) -> String {
    let clean_url = clean_base_url(base_url);
    format!(
        r#"Role: Information Specialist & Web Writer.
Language: Thai (ภาษาไทย).

Task: Find REAL contact information for "สมาคมอสังหาริมทรัพย์จังหวัด{province}" or the most relevant Real Estate organization in {province} using Google Search.

Then, write the "Contact Us" (ติดต่อเรา) page.
{base_instructions}
{seo_header}
{link_guide}
{delimiter}

**Content Requirements:**
1. H1: ติดต่อสมาคม (Contact Us)
2. **Real Data**: List the Name, Address, Phone, Email, Facebook Page found from search.
3. If specific data is NOT found, use a professional placeholder structure (e.g., [ที่อยู่สำนักงานชั่วคราว...]) and clearly state (Note: Please verify this address).
4. Include a section for "Operating Hours" (เวลาทำการ).
5. Write a short inviting paragraph encouraging people to contact for membership or complaints.
6. Link back to the <a href="{clean_url}">หน้าแรก</a> or <a href="{clean_url}/about-us">เกี่ยวกับเรา</a> in the intro text."#,
        province = province,
        base_instructions = BASE_INSTRUCTIONS,
        seo_header = seo_header(base_url, "contact-us"),
        link_guide = internal_link_guide(base_url),
        delimiter = WEBSITE_CONTENT_DELIMITER,
        clean_url = clean_url
    )
}
