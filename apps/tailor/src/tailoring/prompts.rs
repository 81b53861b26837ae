// Prompt constants and builders for the tailoring pipeline.
// Placeholders are replaced before sending; nothing here goes out verbatim.

use crate::models::CompanyInfo;
use crate::tailoring::inventory;

/// Tailoring prompt template.
/// Replace: {tech_inventory}, {company_context}, {job_description}, {template}
pub const TAILOR_PROMPT_TEMPLATE: &str = r#"As an expert resume writer and ATS optimization specialist, please intelligently tailor the following LaTeX resume to match the job description.

CRITICAL ANALYSIS STEPS:
1. **Extract Current Resume Assets**: Identify all programming languages, frameworks, libraries, and technologies mentioned; project technologies and tools used; existing skills from the Skills section; technical methodologies used in experience and projects; quantifiable achievements and metrics.
2. **Job Requirements Analysis**: Extract from the job description the required programming languages and technologies, preferred frameworks and tools, specific skills and qualifications, and industry-specific terminology and keywords.
3. **Strategic Enhancement**: Reorganize the Skills section to emphasize technologies that match the job requirements; rewrite experience bullets to highlight relevant technologies already present; emphasize project technologies that align with the role; weave job description keywords naturally using existing resume content as the foundation; where the resume shows related technologies, subtly indicate familiarity with job-required ones.

FORMATTING REQUIREMENTS:
- Keep the same LaTeX structure and formatting exactly
- DO NOT change: graduation dates, company names, or position titles
- MUST maximize content to fill exactly ONE PAGE
- Maintain professional language and accuracy
- Use quantifiable achievements and technical skills that match the role
- Preserve all LaTeX document structure and commands

ENHANCEMENT STRATEGY:
- If the resume shows Python experience and the job requires Django, emphasize Python web development experience
- If the resume shows JavaScript and the job needs TypeScript, highlight JavaScript expertise and modern frameworks
- If the resume shows ML experience and the job needs data science, emphasize AI/ML project aspects
- Reorganize the Skills section to lead with the most relevant technologies for this role
- Rewrite experience bullets to showcase relevant technical accomplishments using existing projects as proof points

{tech_inventory}

{company_context}

Job Description:
{job_description}

Current Resume (LaTeX):
{template}

Please return ONLY the tailored LaTeX code. Make this resume perfectly aligned with the job requirements while building upon the existing skills and experience foundation:"#;

/// ATS optimization prompt template. Replace: {resume}
pub const ATS_PROMPT_TEMPLATE: &str = r#"Please intelligently optimize this LaTeX resume for Applicant Tracking Systems (ATS) while preserving and enhancing the existing content foundation.

ATS OPTIMIZATION STRATEGIES:
- **Section Headers**: Ensure standard, ATS-readable section names (Skills, Experience, Projects, Education)
- **Technology Keywords**: Extract and emphasize existing technologies from projects and experience
- **Skill Organization**: Reorganize the Skills section for optimal ATS parsing and keyword density
- **Achievement Quantification**: Ensure all quantifiable metrics are clearly formatted
- **Keyword Integration**: Naturally integrate industry-standard terms based on existing experience

TECHNICAL REQUIREMENTS:
- Use the existing technical stack as the foundation for keyword optimization
- Maintain consistent formatting throughout for ATS parsing
- Remove complex LaTeX formatting that might confuse ATS systems
- Ensure proper keyword density without keyword stuffing
- Keep the same overall structure and content length
- Maintain authenticity: enhance rather than fabricate

Resume to optimize:
{resume}

Return the ATS-optimized LaTeX code that maximizes the existing content for ATS success:"#;

/// Company context block. Replace: {name}, {industry}, {size}, {values}
const COMPANY_CONTEXT_TEMPLATE: &str = r#"Company Information:
- Company: {name}
- Industry: {industry}
- Size: {size}
- Values: {values}"#;

/// Builds the full tailoring prompt: instructions, the technology inventory
/// scanned from the template, the optional company block, the job
/// description, and the complete template.
pub fn build_tailor_prompt(
    template: &str,
    job_description: &str,
    company_info: Option<&CompanyInfo>,
) -> String {
    let tech_inventory = inventory::render_inventory_block(template);
    let company_context = company_info.map(render_company_block).unwrap_or_default();

    TAILOR_PROMPT_TEMPLATE
        .replace("{tech_inventory}", &tech_inventory)
        .replace("{company_context}", &company_context)
        .replace("{job_description}", job_description)
        .replace("{template}", template)
}

pub fn build_ats_prompt(resume: &str) -> String {
    ATS_PROMPT_TEMPLATE.replace("{resume}", resume)
}

/// Renders the company block. Missing fields fall back to generic defaults
/// rather than being dropped, keeping the block shape stable.
fn render_company_block(info: &CompanyInfo) -> String {
    COMPANY_CONTEXT_TEMPLATE
        .replace("{name}", info.name.as_deref().unwrap_or("Unknown"))
        .replace("{industry}", info.industry.as_deref().unwrap_or("Technology"))
        .replace("{size}", info.size.as_deref().unwrap_or("Unknown"))
        .replace("{values}", &info.values.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "\\documentclass{article} Python, React";
    const JD: &str = "We need a Rust engineer with Python experience.";

    #[test]
    fn test_tailor_prompt_embeds_jd_and_template() {
        let prompt = build_tailor_prompt(TEMPLATE, JD, None);
        assert!(prompt.contains(JD));
        assert!(prompt.contains(TEMPLATE));
        assert!(prompt.contains("CURRENT RESUME TECHNOLOGY INVENTORY:"));
        assert!(prompt.contains("return ONLY the tailored LaTeX code"));
    }

    #[test]
    fn test_tailor_prompt_without_company_has_no_company_block() {
        let prompt = build_tailor_prompt(TEMPLATE, JD, None);
        assert!(!prompt.contains("Company Information:"));
    }

    #[test]
    fn test_tailor_prompt_with_company_renders_all_fields() {
        let info = CompanyInfo {
            name: Some("Acme".to_string()),
            industry: Some("Robotics".to_string()),
            size: Some("200".to_string()),
            values: vec!["safety".to_string(), "speed".to_string()],
        };
        let prompt = build_tailor_prompt(TEMPLATE, JD, Some(&info));
        assert!(prompt.contains("- Company: Acme"));
        assert!(prompt.contains("- Industry: Robotics"));
        assert!(prompt.contains("- Size: 200"));
        assert!(prompt.contains("- Values: safety, speed"));
    }

    #[test]
    fn test_company_block_defaults_for_missing_fields() {
        let block = render_company_block(&CompanyInfo::default());
        assert!(block.contains("- Company: Unknown"));
        assert!(block.contains("- Industry: Technology"));
        assert!(block.contains("- Size: Unknown"));
        assert!(block.contains("- Values: "));
    }

    #[test]
    fn test_ats_prompt_embeds_resume() {
        let prompt = build_ats_prompt("RESUME BODY");
        assert!(prompt.contains("RESUME BODY"));
        assert!(prompt.contains("Applicant Tracking Systems"));
    }
}
