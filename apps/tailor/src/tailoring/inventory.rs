//! Technology inventory — scans the resume for known technologies so the
//! tailoring prompt can anchor enhancements to skills already present
//! instead of inventing new ones.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// One scanned category: a display label plus the pattern matching its
/// known technologies. Short ambiguous names (C, R, Go, REST, Teams) are
/// matched case-sensitively to avoid picking up ordinary words; the rest
/// are case-insensitive.
struct Category {
    label: &'static str,
    pattern: Regex,
}

static CATEGORIES: Lazy<Vec<Category>> = Lazy::new(|| {
    let category = |label, pattern: &str| Category {
        label,
        pattern: Regex::new(pattern).expect("invalid technology pattern"),
    };

    vec![
        category(
            "Programming Languages",
            r"(?i:\b(?:Python|JavaScript|TypeScript|Java|Kotlin|Swift|Scala|Ruby|Rust|PHP|MATLAB|SQL)\b|\bC\+\+|\bC#)|\bC\b|\bR\b|\bGo\b",
        ),
        category(
            "Web Technologies",
            r"(?i)\b(?:React|Angular|Vue\.js|Node\.js|Express|Flask|Django|HTML|CSS|SASS|SCSS|Bootstrap|Tailwind|jQuery)\b",
        ),
        category(
            "Frameworks & Libraries",
            r"(?i)\b(?:PyTorch|TensorFlow|Pandas|NumPy|Selenium|YOLOv3|CLIP|CLAP|RoBERTa|DistilBERT|wav2vec2|Faiss|Spring|Laravel|Rails)\b",
        ),
        category(
            "Databases",
            r"(?i)\b(?:PostgreSQL|MySQL|MongoDB|Redis|SQLite|Oracle|SQL Server|Cassandra|DynamoDB)\b",
        ),
        category(
            "AI/ML",
            r"(?i)\b(?:PyTorch|TensorFlow|Keras|scikit-learn|OpenCV|NLTK|spaCy|Hugging Face|BERT|GPT|CLIP|YOLO)\b",
        ),
        category(
            "Cloud Platforms",
            r"(?i)\b(?:AWS|Azure|Google Cloud|GCP|Docker|Kubernetes|Jenkins|GitHub|GitLab|Git)\b",
        ),
        category(
            "Tools",
            r"(?i:\b(?:Git|Docker|Jenkins|VS Code|IntelliJ|Eclipse|Jira|Confluence|Slack)\b)|\bTeams\b",
        ),
        category(
            "Methodologies",
            r"(?i:\b(?:Agile|Scrum|DevOps|CI/CD|GraphQL|Microservices)\b)|\b(?:REST|API|ETL|RBAC|JWT)\b",
        ),
    ]
});

/// Scans `resume` and renders the inventory block for the tailoring prompt,
/// one line per non-empty category. Matches are deduplicated
/// case-insensitively and sorted, so the same resume always produces the
/// same prompt text.
pub fn render_inventory_block(resume: &str) -> String {
    let mut block = String::from("CURRENT RESUME TECHNOLOGY INVENTORY:");

    for category in CATEGORIES.iter() {
        let techs = matches_for(&category.pattern, resume);
        if !techs.is_empty() {
            block.push_str("\n- ");
            block.push_str(category.label);
            block.push_str(": ");
            block.push_str(&techs.join(", "));
        }
    }

    block
}

/// Collects unique matches, keyed case-insensitively, keeping the casing of
/// the first occurrence. BTreeMap gives the sorted output order.
fn matches_for(pattern: &Regex, text: &str) -> Vec<String> {
    let mut seen: BTreeMap<String, String> = BTreeMap::new();

    for m in pattern.find_iter(text) {
        seen.entry(m.as_str().to_lowercase())
            .or_insert_with(|| m.as_str().to_string());
    }

    seen.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SKILLS_FIXTURE: &str = "Programming Languages: Python, Java, C, SQL. \
        Web: React, Node.js, Flask. Built ETL jobs with JWT auth and C++ tooling.";

    fn line_for<'a>(block: &'a str, label: &str) -> Option<&'a str> {
        block.lines().find(|l| l.starts_with(&format!("- {label}:")))
    }

    #[test]
    fn test_block_always_has_header() {
        let block = render_inventory_block("nothing technical here");
        assert!(block.starts_with("CURRENT RESUME TECHNOLOGY INVENTORY:"));
    }

    #[test]
    fn test_languages_extracted_from_skills_line() {
        let block = render_inventory_block(SKILLS_FIXTURE);
        let line = line_for(&block, "Programming Languages").unwrap();
        assert!(line.contains("Python"));
        assert!(line.contains("Java"));
        assert!(line.contains("SQL"));
        assert!(line.contains("C++"));
    }

    #[test]
    fn test_short_names_are_case_sensitive() {
        // lowercase standalone letters must not register as C or R
        let block = render_inventory_block("r c go to the store");
        assert!(line_for(&block, "Programming Languages").is_none());
    }

    #[test]
    fn test_java_not_matched_inside_javascript() {
        let block = render_inventory_block("JavaScript only");
        let line = line_for(&block, "Programming Languages").unwrap();
        assert!(line.contains("JavaScript"));
        assert!(!line.contains("JavaScript, Java"), "line was: {line}");
        assert!(!line.ends_with("Java"));
    }

    #[test]
    fn test_empty_categories_are_omitted() {
        let block = render_inventory_block("Python only");
        assert!(line_for(&block, "Programming Languages").is_some());
        assert!(line_for(&block, "Databases").is_none());
        assert!(line_for(&block, "Cloud Platforms").is_none());
    }

    #[test]
    fn test_matches_dedupe_case_insensitively() {
        let techs = matches_for(
            &Regex::new(r"(?i)\b(?:Python)\b").unwrap(),
            "Python python PYTHON",
        );
        assert_eq!(techs, vec!["Python"]);
    }

    #[test]
    fn test_output_is_deterministic_and_sorted() {
        let block_a = render_inventory_block(SKILLS_FIXTURE);
        let block_b = render_inventory_block(SKILLS_FIXTURE);
        assert_eq!(block_a, block_b);

        let line = line_for(&block_a, "Web Technologies").unwrap();
        let techs: Vec<&str> = line
            .trim_start_matches("- Web Technologies: ")
            .split(", ")
            .collect();
        let mut sorted = techs.clone();
        sorted.sort_by_key(|t| t.to_lowercase());
        assert_eq!(techs, sorted);
    }

    #[test]
    fn test_methodologies_found_in_prose() {
        let block = render_inventory_block(SKILLS_FIXTURE);
        let line = line_for(&block, "Methodologies").unwrap();
        assert!(line.contains("ETL"));
        assert!(line.contains("JWT"));
    }

    #[test]
    fn test_base_resume_inventory_covers_known_stack() {
        let block = render_inventory_block(crate::tailoring::BASE_RESUME);
        let languages = line_for(&block, "Programming Languages").unwrap();
        assert!(languages.contains("Python"));
        assert!(languages.contains("SQL"));

        let frameworks = line_for(&block, "Frameworks & Libraries").unwrap();
        assert!(frameworks.contains("PyTorch"));

        let web = line_for(&block, "Web Technologies").unwrap();
        assert!(web.contains("React"));
    }
}
