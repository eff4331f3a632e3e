use super::common::{clean_base_url, internal_link_guide, seo_header, BASE_INSTRUCTIONS};
use crate::document::WEBSITE_CONTENT_DELIMITER;

pub fn about_page_prompt(province: &str, base_url: &str) -> String {
    format!(
        r#"Role: Professional Web Copywriter.
Language: Thai (ภาษาไทย).

Task: Write an "About Us" (เกี่ยวกับเรา) page for "สมาคมพัฒนาอสังหาริมทรัพย์จังหวัด{province}".
{base_instructions}
{seo_header}
{link_guide}
{delimiter}

**Content Requirements:**
1. H1: เกี่ยวกับสมาคมพัฒนาอสังหาริมทรัพย์จังหวัด{province}
2. Incorporate SEO Keywords: "สมาคมอสังหา {province}", "พัฒนาเมือง {province}", "สมาชิกสมาคมอสังหา".
3. Structure:
   - **Who We Are**: Brief introduction.
   - **Vision (วิสัยทัศน์)**: Future goals for the province's property sector.
   - **Mission (พันธกิจ)**: Concrete actions (training, networking, policy advocacy).
   - **Organization Values**: Professionalism, Integrity, Sustainability.
4. Keep it concise (approx 300-400 words) but professional and trustworthy.
5. **Call to Action**: End with a link to the Contact Us page (e.g., "สนใจสมัครสมาชิก <a href='{clean_url}/contact-us'>ติดต่อเรา</a>")."#,
        province = province,
        base_instructions = BASE_INSTRUCTIONS,
        seo_header = seo_header(base_url, "about-us"),
        link_guide = internal_link_guide(base_url),
        delimiter = WEBSITE_CONTENT_DELIMITER,
        clean_url = clean_base_url(base_url)
    )
}
